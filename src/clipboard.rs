//! Clipboard collaborator.

use arboard::Clipboard;
use parking_lot::Mutex;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ClipboardError(pub String);

/// Destination for copied diagram source.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard via `arboard`.
///
/// The platform clipboard is opened on first use so that hosts without a
/// display can still construct the controller.
///
/// On X11 and Wayland the copying process has to serve the contents itself,
/// and they vanish when it exits unless a clipboard manager takes them over.
/// A process that exits right after copying should use
/// [`SystemClipboard::holding_for`]: `set_text` then blocks, serving the
/// contents until another program replaces them or the hold runs out. Other
/// platforms keep the contents after exit and ignore the hold.
pub struct SystemClipboard {
    clipboard: Mutex<Option<Clipboard>>,
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            clipboard: Mutex::new(None),
            hold: None,
        }
    }

    /// Clipboard for short-lived processes, see the type docs.
    pub fn holding_for(hold: Duration) -> Self {
        Self {
            clipboard: Mutex::new(None),
            hold: Some(hold).filter(|hold| !hold.is_zero()),
        }
    }

    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn write_text(clipboard: &mut Clipboard, text: &str, hold: Option<Duration>) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => {
            tracing::debug!(hold_ms = hold.as_millis() as u64, "Serving clipboard contents");
            clipboard
                .set()
                .wait_until(std::time::Instant::now() + hold)
                .text(text)
        }
        None => clipboard.set_text(text),
    }
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn write_text(clipboard: &mut Clipboard, text: &str, _hold: Option<Duration>) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self.clipboard.lock();
        if guard.is_none() {
            let clipboard = Clipboard::new()
                .map_err(|e| ClipboardError(format!("Clipboard unavailable: {}", e)))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => write_text(clipboard, text, self.hold)
                .map_err(|e| ClipboardError(format!("Failed to set clipboard text: {}", e))),
            None => Err(ClipboardError("Clipboard unavailable".to_string())),
        }
    }
}
