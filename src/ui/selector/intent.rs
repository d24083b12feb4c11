//! Intents for the model selector.

use crate::api::ModelOption;
use crate::provider::Provider;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SelectorIntent {
    /// User picked a provider (or cleared it). `request_id` tags the
    /// model-list fetch that may follow.
    ProviderChanged {
        provider: Option<Provider>,
        request_id: u64,
    },

    /// `/api/models` answered for fetch `request_id`.
    OptionsLoaded {
        request_id: u64,
        options: Vec<ModelOption>,
    },

    /// `/api/models` failed for fetch `request_id`.
    OptionsFailed { request_id: u64 },

    /// User picked a list entry.
    ModelSelected { value: String },

    /// User typed in the free-text model field.
    ManualModelEdited { value: String },
}

impl Intent for SelectorIntent {}
