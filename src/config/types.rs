use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::provider::{DiagramTemplate, Provider};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
}

/// Generation server connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the server exposing `/api/ask` and `/api/models`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds. Generation can be slow.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Provider API key forwarded in the request body.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Form values used when the command line does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub template: DiagramTemplate,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Toast timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a toast stays up before it starts leaving.
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
    /// Length of the exit transition before the toast is purged.
    #[serde(default = "default_exit_ms")]
    pub exit_ms: u64,
}

/// SVG export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_width")]
    pub width: String,
    #[serde(default = "default_export_height")]
    pub height: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Directory that receives exported files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// External Mermaid renderer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Renderer executable (mermaid-cli by default).
    #[serde(default = "default_renderer_program")]
    pub program: String,
    /// Extra arguments appended after `-i <in> -o <out>`.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout() -> u32 {
    120
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_display_ms() -> u64 {
    5000
}

fn default_exit_ms() -> u64 {
    300
}

fn default_export_width() -> String {
    "1600px".to_string()
}

fn default_export_height() -> String {
    "1200px".to_string()
}

fn default_file_prefix() -> String {
    "diagram_chart".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_renderer_program() -> String {
    "mmdc".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            api_key: None,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            provider: None,
            template: DiagramTemplate::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
            exit_ms: default_exit_ms(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: default_export_width(),
            height: default_export_height(),
            file_prefix: default_file_prefix(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: default_renderer_program(),
            args: Vec::new(),
        }
    }
}
