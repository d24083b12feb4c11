//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User edits (provider change, model pick, submit)
/// - Collaborator outcomes (API responses, fetch failures)
pub trait Intent: Send + 'static {}
