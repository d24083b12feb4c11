//! Request lifecycle: Idle → Loading → Success | Error.
//!
//! Uses the MVI pattern:
//! - `state.rs` - Lifecycle state and region visibility
//! - `intent.rs` - Submission and outcome events
//! - `reducer.rs` - State transitions

mod intent;
mod reducer;
mod state;

pub use intent::LifecycleIntent;
pub use reducer::LifecycleReducer;
pub use state::{LifecycleState, Regions};
