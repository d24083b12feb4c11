//! Credential handling.
//!
//! API keys travel from the config file or the command line into request
//! bodies. They are wrapped so that `Debug`/`Display` output and log events
//! never contain the key itself.

use serde::{Serialize, Serializer};

use super::types::ApiConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Serializes the real value: the only consumer is the request body.
impl Serialize for SecureString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0.trim())
    }
}

impl ApiConfig {
    /// API key from the config file, if one is set and non-blank.
    pub fn resolve_api_key(&self) -> Option<SecureString> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(SecureString::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key");

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn test_secure_string_serializes_trimmed_value() {
        let secret = SecureString::new("  sk-123  ");
        assert_eq!(serde_json::to_string(&secret).unwrap(), "\"sk-123\"");
    }

    #[test]
    fn test_blank_api_key_resolves_to_none() {
        let api = ApiConfig {
            api_key: Some("   ".to_string()),
            ..ApiConfig::default()
        };
        assert!(api.resolve_api_key().is_none());

        let api = ApiConfig {
            api_key: Some("hf_abc".to_string()),
            ..ApiConfig::default()
        };
        assert_eq!(api.resolve_api_key().unwrap().expose(), "hf_abc");
    }
}
