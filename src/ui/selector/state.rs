//! Model selector state.

use crate::api::ModelOption;
use crate::provider::{Provider, ProviderMode};
use crate::ui::mvi::UiState;

/// Label of the leading "nothing selected" option.
pub const UNSELECTED_LABEL: &str = "Select Model";

/// Provider/model picker.
///
/// `options` always starts with the unselected sentinel (empty value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelectorState {
    pub provider: Option<Provider>,
    pub options: Vec<ModelOption>,
    /// Whether the list control accepts a selection.
    pub list_enabled: bool,
    /// Value of the selected list option, empty for the sentinel.
    pub selected: String,
    /// Free-text model name for manual-entry providers.
    pub manual_value: String,
    pub placeholder: Option<&'static str>,
    /// Token of the model-list fetch whose response is still wanted.
    pub pending_fetch: Option<u64>,
}

impl UiState for ModelSelectorState {}

impl Default for ModelSelectorState {
    fn default() -> Self {
        Self {
            provider: None,
            options: vec![sentinel()],
            list_enabled: false,
            selected: String::new(),
            manual_value: String::new(),
            placeholder: None,
            pending_fetch: None,
        }
    }
}

pub(crate) fn sentinel() -> ModelOption {
    ModelOption::new("", UNSELECTED_LABEL)
}

impl ModelSelectorState {
    pub fn mode(&self) -> Option<ProviderMode> {
        self.provider.map(Provider::mode)
    }

    pub fn is_manual(&self) -> bool {
        self.mode() == Some(ProviderMode::ManualEntry)
    }

    /// The list control is shown for every state except manual entry.
    pub fn list_visible(&self) -> bool {
        !self.is_manual()
    }

    pub fn manual_visible(&self) -> bool {
        self.is_manual()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_fetch.is_some()
    }

    /// Options without the sentinel.
    pub fn choices(&self) -> &[ModelOption] {
        self.options.get(1..).unwrap_or(&[])
    }

    /// Model to submit: trimmed free text in manual mode, else the list value.
    pub fn selected_model(&self) -> String {
        if self.is_manual() {
            self.manual_value.trim().to_string()
        } else {
            self.selected.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single_disabled_sentinel() {
        let state = ModelSelectorState::default();
        assert_eq!(state.options, vec![ModelOption::new("", "Select Model")]);
        assert!(!state.list_enabled);
        assert!(state.choices().is_empty());
        assert_eq!(state.selected_model(), "");
    }

    #[test]
    fn manual_model_is_trimmed() {
        let state = ModelSelectorState {
            provider: Some(Provider::Ollama),
            manual_value: "  llama3:8b \n".into(),
            ..ModelSelectorState::default()
        };
        assert_eq!(state.selected_model(), "llama3:8b");
        assert!(state.manual_visible());
        assert!(!state.list_visible());
    }
}
