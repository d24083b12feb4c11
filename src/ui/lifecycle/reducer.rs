//! Reducer for the request lifecycle.

use crate::ui::mvi::Reducer;

use super::intent::LifecycleIntent;
use super::state::LifecycleState;

pub struct LifecycleReducer;

impl Reducer for LifecycleReducer {
    type State = LifecycleState;
    type Intent = LifecycleIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LifecycleIntent::Submit { request_id } => match state {
                // Single flight: a second submit never replaces the first.
                LifecycleState::Loading { .. } => state,
                _ => LifecycleState::Loading { request_id },
            },

            LifecycleIntent::Succeeded { request_id } => {
                if state.loading_request() == Some(request_id) {
                    LifecycleState::Success { request_id }
                } else {
                    state
                }
            }

            LifecycleIntent::Failed {
                request_id,
                title,
                message,
            } => {
                if state.loading_request() == Some(request_id) {
                    LifecycleState::Error {
                        request_id,
                        title,
                        message,
                    }
                } else {
                    state
                }
            }

            LifecycleIntent::Abandoned { request_id } => {
                if state.loading_request() == Some(request_id) {
                    LifecycleState::Idle
                } else {
                    state
                }
            }
        }
    }
}
