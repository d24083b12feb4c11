//! Reducer for the model selector.

use crate::provider::ProviderMode;
use crate::ui::mvi::Reducer;

use super::intent::SelectorIntent;
use super::state::{sentinel, ModelSelectorState};

pub struct SelectorReducer;

impl Reducer for SelectorReducer {
    type State = ModelSelectorState;
    type Intent = SelectorIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SelectorIntent::ProviderChanged {
                provider,
                request_id,
            } => {
                // Any in-flight fetch for the previous provider is abandoned.
                let base = ModelSelectorState {
                    provider,
                    ..ModelSelectorState::default()
                };
                match provider.map(|p| (p, p.mode())) {
                    Some((p, ProviderMode::ManualEntry)) => ModelSelectorState {
                        placeholder: p.manual_placeholder(),
                        ..base
                    },
                    Some((_, ProviderMode::EnumeratedList)) => ModelSelectorState {
                        pending_fetch: Some(request_id),
                        ..base
                    },
                    None => base,
                }
            }

            SelectorIntent::OptionsLoaded {
                request_id,
                options,
            } => {
                if state.pending_fetch != Some(request_id) {
                    return state;
                }
                let mut all = Vec::with_capacity(options.len() + 1);
                all.push(sentinel());
                all.extend(options);
                ModelSelectorState {
                    options: all,
                    list_enabled: true,
                    selected: String::new(),
                    pending_fetch: None,
                    ..state
                }
            }

            SelectorIntent::OptionsFailed { request_id } => {
                if state.pending_fetch != Some(request_id) {
                    return state;
                }
                ModelSelectorState {
                    options: vec![sentinel()],
                    list_enabled: false,
                    selected: String::new(),
                    pending_fetch: None,
                    ..state
                }
            }

            SelectorIntent::ModelSelected { value } => {
                let known = state.list_enabled && state.options.iter().any(|o| o.value == value);
                ModelSelectorState {
                    selected: if known { value } else { String::new() },
                    ..state
                }
            }

            SelectorIntent::ManualModelEdited { value } => {
                if state.is_manual() {
                    ModelSelectorState {
                        manual_value: value,
                        ..state
                    }
                } else {
                    state
                }
            }
        }
    }
}
