//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// Pure state transition: (State, Intent) -> State.
///
/// Side effects (network calls, rendering, toasts) stay in the controller;
/// reducers only decide what the next state is, including ignoring
/// intents tagged with a stale request id.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
