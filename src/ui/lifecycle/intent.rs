//! Intents for the request lifecycle.

use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum LifecycleIntent {
    /// Validation passed and request `request_id` is about to be sent.
    Submit { request_id: u64 },

    /// The diagram for `request_id` was stored and rendered.
    Succeeded { request_id: u64 },

    /// Request `request_id` failed.
    Failed {
        request_id: u64,
        title: String,
        message: String,
    },

    /// Request `request_id` ended without an outcome (panic or dropped
    /// future). Returns to `Idle` if it was still loading.
    Abandoned { request_id: u64 },
}

impl Intent for LifecycleIntent {}
