//! Model-View-Intent (MVI) primitives.
//!
//! Controller state is split into small state machines, each advanced only
//! by its reducer:
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View (regions, selector, toasts)
//!    ↑                              │
//!    └──── user edits / API ────────┘
//! ```
//!
//! - **State**: plain data describing what the view shows
//! - **Intent**: user edits or collaborator outcomes
//! - **Reducer**: pure function from (State, Intent) to State

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
