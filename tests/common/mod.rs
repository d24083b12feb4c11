//! Shared test utilities and fake collaborators.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use diagram_studio::api::{ApiError, GenerationApi, GenerationRequest, GenerationResponse, ModelOption};
use diagram_studio::clipboard::{ClipboardError, ClipboardSink};
use diagram_studio::config::Config;
use diagram_studio::export::DownloadSink;
use diagram_studio::provider::Provider;
use diagram_studio::render::{RenderError, Renderer};
use diagram_studio::ui::controller::{Collaborators, DiagramController};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Generation API -----------------------------------------------------------

type ModelReply = (Duration, Result<Vec<ModelOption>, ApiError>);

/// Scripted [`GenerationApi`].
#[derive(Default)]
pub struct FakeApi {
    models: Mutex<HashMap<Provider, ModelReply>>,
    replies: Mutex<VecDeque<Result<GenerationResponse, ApiError>>>,
    generate_delay: Mutex<Duration>,
    pub requests: Mutex<Vec<GenerationRequest>>,
    pub model_calls: Mutex<Vec<Provider>>,
}

impl FakeApi {
    pub fn set_models(&self, provider: Provider, delay: Duration, reply: Result<Vec<ModelOption>, ApiError>) {
        self.models.lock().insert(provider, (delay, reply));
    }

    pub fn reply_text(&self, text: &str) {
        self.replies.lock().push_back(Ok(GenerationResponse {
            text: Some(text.to_string()),
        }));
    }

    pub fn reply(&self, reply: Result<GenerationResponse, ApiError>) {
        self.replies.lock().push_back(reply);
    }

    pub fn delay_generation(&self, delay: Duration) {
        *self.generate_delay.lock() = delay;
    }
}

#[async_trait]
impl GenerationApi for FakeApi {
    async fn list_models(&self, provider: Provider) -> Result<Vec<ModelOption>, ApiError> {
        self.model_calls.lock().push(provider);
        let (delay, reply) = self
            .models
            .lock()
            .get(&provider)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        tokio::time::sleep(delay).await;
        reply
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError> {
        self.requests.lock().push(request.clone());
        let delay = *self.generate_delay.lock();
        tokio::time::sleep(delay).await;
        self.replies
            .lock()
            .pop_front()
            .unwrap_or(Ok(GenerationResponse::default()))
    }
}

// -- Renderer -----------------------------------------------------------------

/// Renders to `<svg width="100%" height="400">…</svg>`.
#[derive(Default)]
pub struct FakeRenderer {
    surface: Mutex<Option<String>>,
    pub fail: AtomicBool,
    pub panic: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
    pub rendered: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn panic_next(&self) {
        self.panic.store(true, Ordering::SeqCst);
    }

    /// Block the calling thread for `delay` on the next render.
    pub fn stall_next(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }
}

impl Renderer for FakeRenderer {
    fn render(&self, source: &str) -> Result<(), RenderError> {
        *self.surface.lock() = None;
        if let Some(delay) = self.delay.lock().take() {
            std::thread::sleep(delay);
        }
        if self.panic.swap(false, Ordering::SeqCst) {
            panic!("renderer exploded");
        }
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(RenderError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "Parse error on line 1".to_string(),
            });
        }
        self.rendered.lock().push(source.to_string());
        *self.surface.lock() = Some(format!(
            r#"<svg width="100%" height="400" viewBox="0 0 10 10"><text>{}</text></svg>"#,
            source
        ));
        Ok(())
    }

    fn rendered_svg(&self) -> Option<String> {
        self.surface.lock().clone()
    }
}

// -- Clipboard and downloads --------------------------------------------------

#[derive(Default)]
pub struct FakeClipboard {
    pub copied: Mutex<Vec<String>>,
    pub unavailable: AtomicBool,
}

impl ClipboardSink for FakeClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClipboardError("Clipboard unavailable".to_string()));
        }
        self.copied.lock().push(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SavedFile {
    pub file_name: String,
    pub mime: String,
    pub content: String,
}

#[derive(Default)]
pub struct FakeDownloads {
    pub saved: Mutex<Vec<SavedFile>>,
}

impl DownloadSink for FakeDownloads {
    fn save(&self, file_name: &str, mime: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        self.saved.lock().push(SavedFile {
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            content: String::from_utf8_lossy(bytes).into_owned(),
        });
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

// -- Composite builders -------------------------------------------------------

/// Handles on every fake wired into a controller.
#[derive(Clone, Default)]
pub struct Fakes {
    pub api: Arc<FakeApi>,
    pub renderer: Arc<FakeRenderer>,
    pub clipboard: Arc<FakeClipboard>,
    pub downloads: Arc<FakeDownloads>,
}

impl Fakes {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            api: self.api.clone(),
            renderer: self.renderer.clone(),
            clipboard: self.clipboard.clone(),
            downloads: self.downloads.clone(),
        }
    }
}

pub fn make_controller() -> (DiagramController, Fakes) {
    let fakes = Fakes::default();
    let controller = DiagramController::new(fakes.collaborators(), &Config::default());
    (controller, fakes)
}

/// Controller with a manual-entry provider and model already chosen.
pub async fn ready_controller() -> (DiagramController, Fakes) {
    let (controller, fakes) = make_controller();
    controller
        .change_provider(Some(Provider::Ollama))
        .await
        .unwrap();
    controller.edit_manual_model("llama3");
    (controller, fakes)
}
