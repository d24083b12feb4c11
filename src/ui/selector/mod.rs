//! Provider and model selection.
//!
//! Uses the MVI pattern:
//! - `state.rs` - Selector state and the submit-time model accessor
//! - `intent.rs` - Provider/model edits and fetch outcomes
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::SelectorIntent;
pub use reducer::SelectorReducer;
pub use state::{ModelSelectorState, UNSELECTED_LABEL};
