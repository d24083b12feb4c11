//! Request lifecycle controller.
//!
//! Owns the lifecycle, selector and toast state plus the current diagram,
//! and drives the injected collaborators. All methods take `&self`: state
//! sits behind a mutex that is never held across an `.await`, so one
//! controller can be shared between tasks. A single-flight guard rejects a
//! second `submit` while one is running, and every request or model-list
//! fetch carries a monotonic token so stale outcomes are dropped.

use chrono::Utc;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::api::{GenerationApi, GenerationRequest};
use crate::clipboard::ClipboardSink;
use crate::config::{Config, Defaults, ExportConfig, SecureString};
use crate::error::{ClientError, NO_SOURCE_MESSAGE, NO_SVG_MESSAGE, REQUIRED_FIELDS_MESSAGE};
use crate::export::{DownloadSink, SvgExport, SVG_MIME};
use crate::provider::{DiagramTemplate, Provider, ProviderMode};
use crate::render::Renderer;
use crate::ui::lifecycle::{LifecycleIntent, LifecycleReducer, LifecycleState, Regions};
use crate::ui::mvi::Reducer;
use crate::ui::selector::{ModelSelectorState, SelectorIntent, SelectorReducer};
use crate::ui::toast::{NotificationQueue, Toast, ToastId, ToastKind};

pub const COPY_SUCCESS_MESSAGE: &str = "Mermaid code copied to clipboard!";

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($state:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $state.$field = <$reducer>::reduce(std::mem::take(&mut $state.$field), $intent);
    };
}

/// Called with the new region visibility after every lifecycle change.
pub type ViewObserver = Arc<dyn Fn(Regions) + Send + Sync>;

/// External collaborators, injected at construction.
#[derive(Clone)]
pub struct Collaborators {
    pub api: Arc<dyn GenerationApi>,
    pub renderer: Arc<dyn Renderer>,
    pub clipboard: Arc<dyn ClipboardSink>,
    pub downloads: Arc<dyn DownloadSink>,
}

/// Form fields read at submission time. Provider and model come from the
/// selector.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationForm {
    pub input: String,
    pub template: DiagramTemplate,
    pub api_key: SecureString,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationForm {
    pub fn new(input: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            input: input.into(),
            template: defaults.template,
            api_key: SecureString::default(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
        }
    }
}

/// The single current diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub diagram_source: String,
}

/// Check the submit gate and assemble the request body.
pub fn validate_form(
    form: &GenerationForm,
    provider: Option<Provider>,
    model: &str,
) -> Result<GenerationRequest, ClientError> {
    let provider = match provider {
        Some(provider) if !form.input.trim().is_empty() && !model.is_empty() => provider,
        _ => return Err(ClientError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())),
    };

    if !(0.0..=1.0).contains(&form.temperature) {
        return Err(ClientError::Validation(
            "Temperature must be between 0 and 1.".to_string(),
        ));
    }

    if form.max_tokens == 0 {
        return Err(ClientError::Validation(
            "Max tokens must be greater than 0.".to_string(),
        ));
    }

    Ok(GenerationRequest {
        input: form.input.clone(),
        selected_template: form.template,
        provider,
        model: model.to_string(),
        api_key: form.api_key.clone(),
        temperature: form.temperature,
        max_tokens: form.max_tokens,
    })
}

struct ControllerState {
    lifecycle: LifecycleState,
    selector: ModelSelectorState,
    toasts: NotificationQueue,
    current: Option<GenerationResult>,
}

pub struct DiagramController {
    collaborators: Collaborators,
    export: ExportConfig,
    state: Mutex<ControllerState>,
    observer: Option<ViewObserver>,
    in_flight: AtomicBool,
    last_request: AtomicU64,
    last_fetch: AtomicU64,
}

impl DiagramController {
    pub fn new(collaborators: Collaborators, config: &Config) -> Self {
        Self {
            collaborators,
            export: config.export.clone(),
            state: Mutex::new(ControllerState {
                lifecycle: LifecycleState::default(),
                selector: ModelSelectorState::default(),
                toasts: NotificationQueue::from_config(&config.notifications),
                current: None,
            }),
            observer: None,
            in_flight: AtomicBool::new(false),
            last_request: AtomicU64::new(0),
            last_fetch: AtomicU64::new(0),
        }
    }

    pub fn with_observer(mut self, observer: ViewObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    // -- Model selector -----------------------------------------------------

    /// Switch provider. List providers fetch their models; a failed fetch is
    /// reported as a toast and leaves the list disabled.
    pub async fn change_provider(&self, provider: Option<Provider>) -> Result<(), ClientError> {
        let request_id = self.last_fetch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock();
            dispatch_mvi!(
                state,
                selector,
                SelectorReducer,
                SelectorIntent::ProviderChanged {
                    provider,
                    request_id
                }
            );
        }
        tracing::debug!(provider = ?provider.map(Provider::id), request_id, "Provider changed");

        let provider = match provider {
            Some(p) if p.mode() == ProviderMode::EnumeratedList => p,
            _ => return Ok(()),
        };

        let result = self.collaborators.api.list_models(provider).await;

        let mut state = self.state.lock();
        if state.selector.pending_fetch != Some(request_id) {
            tracing::debug!(provider = %provider, request_id, "Discarding stale model list");
            return Ok(());
        }

        match result {
            Ok(options) => {
                dispatch_mvi!(
                    state,
                    selector,
                    SelectorReducer,
                    SelectorIntent::OptionsLoaded {
                        request_id,
                        options
                    }
                );
                Ok(())
            }
            Err(err) => {
                let err = ClientError::from_model_list(err);
                tracing::warn!(provider = %provider, error = %err, "Model list fetch failed");
                dispatch_mvi!(
                    state,
                    selector,
                    SelectorReducer,
                    SelectorIntent::OptionsFailed { request_id }
                );
                state
                    .toasts
                    .push(err.kind(), err.title(), err.body(), Instant::now());
                Err(err)
            }
        }
    }

    pub fn select_model(&self, value: &str) {
        let mut state = self.state.lock();
        dispatch_mvi!(
            state,
            selector,
            SelectorReducer,
            SelectorIntent::ModelSelected {
                value: value.to_string()
            }
        );
    }

    pub fn edit_manual_model(&self, value: &str) {
        let mut state = self.state.lock();
        dispatch_mvi!(
            state,
            selector,
            SelectorReducer,
            SelectorIntent::ManualModelEdited {
                value: value.to_string()
            }
        );
    }

    /// Model that a submission right now would use.
    pub fn selected_model(&self) -> String {
        self.state.lock().selector.selected_model()
    }

    // -- Request lifecycle --------------------------------------------------

    /// Validate, send, store and render.
    ///
    /// Every failure is also pushed as a toast, except `Busy`.
    pub async fn submit(&self, form: &GenerationForm) -> Result<GenerationResult, ClientError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("Submit rejected, a request is already in flight");
            return Err(ClientError::Busy);
        }
        let _flight = scopeguard::guard((), |_| self.in_flight.store(false, Ordering::SeqCst));

        let request = {
            let state = self.state.lock();
            validate_form(form, state.selector.provider, &state.selector.selected_model())
        };
        let request = match request {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "Submission failed validation");
                self.notify(&err);
                return Err(err);
            }
        };

        let request_id = self.last_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch_lifecycle(LifecycleIntent::Submit { request_id });
        // Leaves Loading even if the renderer panics or this future is dropped.
        let _loading = scopeguard::guard((), |_| {
            self.dispatch_lifecycle(LifecycleIntent::Abandoned { request_id })
        });

        tracing::info!(
            request_id,
            provider = %request.provider,
            model = %request.model,
            template = %request.selected_template,
            "Submitting generation request"
        );

        match self.run_request(&request).await {
            Ok(result) => {
                self.dispatch_lifecycle(LifecycleIntent::Succeeded { request_id });
                tracing::info!(request_id, source_len = result.diagram_source.len(), "Diagram ready");
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(request_id, error = %err, "Generation failed");
                self.notify(&err);
                self.dispatch_lifecycle(LifecycleIntent::Failed {
                    request_id,
                    title: err.title(),
                    message: err.body(),
                });
                Err(err)
            }
        }
    }

    async fn run_request(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ClientError> {
        let response = self
            .collaborators
            .api
            .generate(request)
            .await
            .map_err(ClientError::from_generation)?;

        let source = response
            .diagram_source()
            .ok_or(ClientError::EmptyResult)?
            .to_string();

        let result = GenerationResult {
            diagram_source: source,
        };
        self.state.lock().current = Some(result.clone());

        // Rendering shells out, so it runs off the async workers.
        let renderer = self.collaborators.renderer.clone();
        let source = result.diagram_source.clone();
        match tokio::task::spawn_blocking(move || renderer.render(&source)).await {
            Ok(rendered) => rendered.map_err(|e| ClientError::Render(e.to_string()))?,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => return Err(ClientError::Render(e.to_string())),
        }

        Ok(result)
    }

    fn dispatch_lifecycle(&self, intent: LifecycleIntent) {
        let changed = {
            let mut state = self.state.lock();
            let before = state.lifecycle.clone();
            dispatch_mvi!(state, lifecycle, LifecycleReducer, intent);
            (state.lifecycle != before).then(|| state.lifecycle.regions())
        };

        if let (Some(regions), Some(observer)) = (changed, &self.observer) {
            observer(regions);
        }
    }

    // -- Export pipeline ----------------------------------------------------

    /// Save the rendered SVG resized to the export dimensions.
    pub fn export_vector(&self) -> Result<PathBuf, ClientError> {
        let Some(svg) = self.collaborators.renderer.rendered_svg() else {
            let err = ClientError::ExportPrecondition(NO_SVG_MESSAGE.to_string());
            self.notify(&err);
            return Err(err);
        };

        let export = SvgExport::prepare(&svg, &self.export, Utc::now());
        self.collaborators
            .downloads
            .save(&export.file_name, SVG_MIME, export.content.as_bytes())
            .map_err(|e| {
                let err = ClientError::Download {
                    file_name: export.file_name.clone(),
                    message: e.to_string(),
                };
                self.notify(&err);
                err
            })
    }

    /// Copy the current diagram source (not the SVG) to the clipboard.
    pub fn copy_source(&self) -> Result<(), ClientError> {
        let source = self
            .state
            .lock()
            .current
            .as_ref()
            .map(|result| result.diagram_source.clone());

        let Some(source) = source else {
            let err = ClientError::ExportPrecondition(NO_SOURCE_MESSAGE.to_string());
            self.notify(&err);
            return Err(err);
        };

        match self.collaborators.clipboard.set_text(&source) {
            Ok(()) => {
                self.state.lock().toasts.push(
                    ToastKind::Success,
                    "Success",
                    COPY_SUCCESS_MESSAGE,
                    Instant::now(),
                );
                Ok(())
            }
            Err(e) => {
                let err = ClientError::Clipboard(e.to_string());
                self.notify(&err);
                Err(err)
            }
        }
    }

    // -- Notifications ------------------------------------------------------

    fn notify(&self, err: &ClientError) {
        self.state
            .lock()
            .toasts
            .push(err.kind(), err.title(), err.body(), Instant::now());
    }

    /// Advance toast timers. Hosts call this periodically.
    pub fn tick(&self) -> Vec<ToastId> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&self, now: Instant) -> Vec<ToastId> {
        self.state.lock().toasts.tick(now)
    }

    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        self.state.lock().toasts.dismiss(id, Instant::now())
    }

    // -- Snapshots ----------------------------------------------------------

    pub fn toasts(&self) -> Vec<Toast> {
        self.state.lock().toasts.entries().to_vec()
    }

    /// Remove and return every toast.
    pub fn take_toasts(&self) -> Vec<Toast> {
        self.state.lock().toasts.drain()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.lock().lifecycle.clone()
    }

    pub fn regions(&self) -> Regions {
        self.state.lock().lifecycle.regions()
    }

    pub fn selector(&self) -> ModelSelectorState {
        self.state.lock().selector.clone()
    }

    pub fn current_diagram(&self) -> Option<GenerationResult> {
        self.state.lock().current.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}
