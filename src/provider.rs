//! Providers, provider modes and diagram templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend generation service selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "huggingface-openai")]
    HuggingFaceOpenAi,
    #[serde(rename = "huggingface-text")]
    HuggingFaceText,
    #[serde(rename = "ollama")]
    Ollama,
}

/// How the model identifier is entered for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Free-text model name (local or self-hosted providers).
    ManualEntry,
    /// Model chosen from a list served by `/api/models`.
    EnumeratedList,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown provider '{0}'")]
pub struct UnknownProvider(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAi,
        Provider::Gemini,
        Provider::HuggingFaceOpenAi,
        Provider::HuggingFaceText,
        Provider::Ollama,
    ];

    /// Wire identifier, as sent in `provider` fields and query strings.
    pub fn id(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::HuggingFaceOpenAi => "huggingface-openai",
            Provider::HuggingFaceText => "huggingface-text",
            Provider::Ollama => "ollama",
        }
    }

    pub fn mode(self) -> ProviderMode {
        match self {
            Provider::HuggingFaceOpenAi | Provider::HuggingFaceText | Provider::Ollama => {
                ProviderMode::ManualEntry
            }
            Provider::OpenAi | Provider::Gemini => ProviderMode::EnumeratedList,
        }
    }

    /// Hint shown in the free-text model field. `None` for list providers.
    pub fn manual_placeholder(self) -> Option<&'static str> {
        match self {
            Provider::HuggingFaceOpenAi | Provider::HuggingFaceText => {
                Some("Enter Hugging Face model name")
            }
            Provider::Ollama => Some("Enter Ollama model name"),
            Provider::OpenAi | Provider::Gemini => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == trimmed)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Diagram family the server is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiagramTemplate {
    #[default]
    Flowchart,
    Mindmap,
    Timeline,
    UserJourney,
    EntityRelationship,
    Sequence,
    State,
}

impl DiagramTemplate {
    pub const ALL: [DiagramTemplate; 7] = [
        DiagramTemplate::Flowchart,
        DiagramTemplate::Mindmap,
        DiagramTemplate::Timeline,
        DiagramTemplate::UserJourney,
        DiagramTemplate::EntityRelationship,
        DiagramTemplate::Sequence,
        DiagramTemplate::State,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DiagramTemplate::Flowchart => "FLOWCHART",
            DiagramTemplate::Mindmap => "MINDMAP",
            DiagramTemplate::Timeline => "TIMELINE",
            DiagramTemplate::UserJourney => "USERJOURNEY",
            DiagramTemplate::EntityRelationship => "ENTITYRELATIONSHIP",
            DiagramTemplate::Sequence => "SEQUENCE",
            DiagramTemplate::State => "STATE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiagramTemplate::Flowchart => "Flowchart",
            DiagramTemplate::Mindmap => "Mindmap",
            DiagramTemplate::Timeline => "Timeline",
            DiagramTemplate::UserJourney => "User Journey",
            DiagramTemplate::EntityRelationship => "Entity Relationship",
            DiagramTemplate::Sequence => "Sequence Diagram",
            DiagramTemplate::State => "State Diagram",
        }
    }
}

impl fmt::Display for DiagramTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DiagramTemplate {
    type Err = UnknownTemplate;

    /// Accepts the wire id in any case (`flowchart`, `FLOWCHART`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        DiagramTemplate::ALL
            .into_iter()
            .find(|t| t.id() == upper)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}
