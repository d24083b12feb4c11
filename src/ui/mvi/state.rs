//! Base trait for UI state.

/// Marker trait for UI state objects.
///
/// States are cloned out of the controller for the view and compared to
/// detect changes, so they must be `Clone + PartialEq`, and `Default` is the
/// state shown before any input.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
