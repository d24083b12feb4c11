//! Diagram renderer collaborator.
//!
//! The controller hands diagram source to a [`Renderer`], which owns the
//! rendered surface. The export pipeline later reads the SVG back from it.

use parking_lot::Mutex;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;
use uuid::Uuid;

use crate::config::RendererConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Failed to start renderer '{program}': {message}")]
    Spawn { program: String, message: String },

    #[error("Renderer failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Renderer I/O error: {0}")]
    Io(String),

    #[error("Renderer produced no SVG output")]
    NoOutput,
}

/// Rendering surface for diagram source.
pub trait Renderer: Send + Sync {
    /// Replace the surface contents with a fresh render of `source`.
    fn render(&self, source: &str) -> Result<(), RenderError>;

    /// The single rendered SVG node, serialized. `None` when nothing is
    /// rendered.
    fn rendered_svg(&self) -> Option<String>;
}

/// Renders through the Mermaid CLI (`mmdc -i <in.mmd> -o <out.svg>`).
pub struct MermaidCliRenderer {
    program: String,
    args: Vec<String>,
    work_dir: PathBuf,
    surface: Mutex<Option<String>>,
}

impl MermaidCliRenderer {
    pub fn new(config: &RendererConfig) -> Self {
        Self::with_work_dir(config, std::env::temp_dir())
    }

    /// Use `work_dir` for the intermediate `.mmd`/`.svg` files.
    pub fn with_work_dir(config: &RendererConfig, work_dir: PathBuf) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            work_dir,
            surface: Mutex::new(None),
        }
    }

    fn run(&self, source: &str) -> Result<String, RenderError> {
        let stem = format!("diagram-studio-{}", Uuid::new_v4());
        let input = self.work_dir.join(format!("{}.mmd", stem));
        let output = self.work_dir.join(format!("{}.svg", stem));

        // Armed before the write so a partially written input is removed too.
        let _cleanup = scopeguard::guard((input.clone(), output.clone()), |(input, output)| {
            let _ = fs::remove_file(input);
            let _ = fs::remove_file(output);
        });
        fs::write(&input, source).map_err(|e| RenderError::Io(e.to_string()))?;

        tracing::debug!(program = %self.program, input = %input.display(), "Running renderer");
        let result = Command::new(&self.program)
            .arg("-i")
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .args(&self.args)
            .output()
            .map_err(|e| RenderError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !result.status.success() {
            return Err(RenderError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let svg = fs::read_to_string(&output).map_err(|e| RenderError::Io(e.to_string()))?;
        if !svg.contains("<svg") {
            return Err(RenderError::NoOutput);
        }
        Ok(svg)
    }
}

impl Renderer for MermaidCliRenderer {
    fn render(&self, source: &str) -> Result<(), RenderError> {
        // The previous render is gone even if this one fails.
        *self.surface.lock() = None;
        let svg = self.run(source)?;
        tracing::debug!(svg_len = svg.len(), "Diagram rendered");
        *self.surface.lock() = Some(svg);
        Ok(())
    }

    fn rendered_svg(&self) -> Option<String> {
        self.surface.lock().clone()
    }
}
