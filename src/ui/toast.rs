//! Toast notification queue.
//!
//! Toasts are deadline driven: the host calls [`NotificationQueue::tick`]
//! periodically and the queue expires and purges entries whose deadlines
//! have passed. Removal is two-phase. An entry first becomes `Leaving`
//! (exit transition), then is purged once the transition has run. An entry
//! that is already leaving ignores both its expiry and further dismissals,
//! so it is purged exactly once.

use std::fmt;
use std::time::{Duration, Instant};

use crate::config::NotificationConfig;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Error,
    Warning,
    Success,
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Success => "success",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// On screen until `expires_at`.
    Shown { expires_at: Instant },
    /// Playing the exit transition, purged at `purge_at`.
    Leaving { purge_at: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub title: String,
    pub body: String,
    pub created_at: Instant,
    pub phase: ToastPhase,
}

impl Toast {
    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, ToastPhase::Leaving { .. })
    }
}

/// Active toasts in display order.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Vec<Toast>,
    /// Purged by a `push` sweep and not yet reported by `tick`.
    unreported: Vec<ToastId>,
    next_id: ToastId,
    display: Duration,
    exit: Duration,
}

impl NotificationQueue {
    pub fn new(display: Duration, exit: Duration) -> Self {
        Self {
            entries: Vec::new(),
            unreported: Vec::new(),
            next_id: 1,
            display,
            exit,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(
            Duration::from_millis(config.display_ms),
            Duration::from_millis(config.exit_ms),
        )
    }

    /// Show a toast unless one with the same body is still in the queue.
    ///
    /// Deadlines are applied first, so an entry that should already be gone
    /// never suppresses a new one. Returns the new toast's id, or `None` for
    /// a suppressed duplicate.
    pub fn push(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        body: impl Into<String>,
        now: Instant,
    ) -> Option<ToastId> {
        self.sweep(now);

        let body = body.into();
        if self.contains_body(&body) {
            tracing::debug!(body = %body, "Suppressed duplicate toast");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let title = title.into();
        tracing::debug!(id, kind = %kind, title = %title, body = %body, "Toast shown");

        self.entries.push(Toast {
            id,
            kind,
            title,
            body,
            created_at: now,
            phase: ToastPhase::Shown {
                expires_at: now + self.display,
            },
        });
        Some(id)
    }

    /// User dismissal. Starts the exit transition.
    ///
    /// Returns `false` if the toast is unknown or already leaving.
    pub fn dismiss(&mut self, id: ToastId, now: Instant) -> bool {
        let exit = self.exit;
        match self.entries.iter_mut().find(|t| t.id == id) {
            Some(toast) if !toast.is_leaving() => {
                toast.phase = ToastPhase::Leaving {
                    purge_at: now + exit,
                };
                tracing::debug!(id, "Toast dismissed");
                true
            }
            _ => false,
        }
    }

    /// Expire due toasts and purge finished exits.
    ///
    /// Returns the ids purged since the previous call, each exactly once.
    pub fn tick(&mut self, now: Instant) -> Vec<ToastId> {
        self.sweep(now);
        let purged = std::mem::take(&mut self.unreported);
        if !purged.is_empty() {
            tracing::trace!(?purged, "Toasts purged");
        }
        purged
    }

    fn sweep(&mut self, now: Instant) {
        let exit = self.exit;
        for toast in &mut self.entries {
            if let ToastPhase::Shown { expires_at } = toast.phase {
                if expires_at <= now {
                    toast.phase = ToastPhase::Leaving {
                        purge_at: expires_at + exit,
                    };
                }
            }
        }

        let unreported = &mut self.unreported;
        self.entries.retain(|toast| match toast.phase {
            ToastPhase::Leaving { purge_at } if purge_at <= now => {
                unreported.push(toast.id);
                false
            }
            _ => true,
        });
    }

    pub fn contains_body(&self, body: &str) -> bool {
        self.entries.iter().any(|t| t.body == body)
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    /// Toasts that are on screen and not leaving.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().filter(|t| !t.is_leaving())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry at once, e.g. when the host shuts down.
    pub fn drain(&mut self) -> Vec<Toast> {
        self.unreported.clear();
        std::mem::take(&mut self.entries)
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}
