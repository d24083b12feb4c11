//! Request lifecycle state.

use crate::ui::mvi::UiState;

/// Where the request/response cycle currently is.
///
/// Every submission carries a `request_id`; only outcomes tagged with the
/// id of the current `Loading` state may leave it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Waiting for input.
    #[default]
    Idle,

    /// A generation request is in flight.
    Loading { request_id: u64 },

    /// The last request produced a rendered diagram.
    Success { request_id: u64 },

    /// The last request failed. The prompt is shown again.
    Error {
        request_id: u64,
        title: String,
        message: String,
    },
}

impl UiState for LifecycleState {}

/// Visibility of the view regions for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub prompt: bool,
    pub loading: bool,
    pub diagram: bool,
    pub export_controls: bool,
    pub submit_enabled: bool,
}

impl LifecycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Id of the in-flight request, if any.
    pub fn loading_request(&self) -> Option<u64> {
        match self {
            Self::Loading { request_id } => Some(*request_id),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn regions(&self) -> Regions {
        match self {
            Self::Idle | Self::Error { .. } => Regions {
                prompt: true,
                loading: false,
                diagram: false,
                export_controls: false,
                submit_enabled: true,
            },
            Self::Loading { .. } => Regions {
                prompt: false,
                loading: true,
                diagram: false,
                export_controls: false,
                submit_enabled: false,
            },
            Self::Success { .. } => Regions {
                prompt: false,
                loading: false,
                diagram: true,
                export_controls: true,
                submit_enabled: true,
            },
        }
    }
}
