//! Command-line front end.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, SecureString};
use crate::provider::{DiagramTemplate, Provider};
use crate::ui::controller::GenerationForm;

#[derive(Debug, Parser)]
#[command(name = "diagram-studio")]
#[command(about = "Turn natural-language descriptions into Mermaid diagrams")]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the generation server base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a diagram and print its Mermaid source
    Generate(GenerateArgs),

    /// List models the server offers for a provider
    Models {
        #[arg(long)]
        provider: Provider,
    },

    /// List diagram templates
    Templates,

    /// List providers and how their model is chosen
    Providers,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Natural-language description of the diagram
    pub input: String,

    #[arg(long)]
    pub provider: Option<Provider>,

    /// Model id (list providers) or free-text model name
    #[arg(long, default_value = "")]
    pub model: String,

    #[arg(long)]
    pub template: Option<DiagramTemplate>,

    /// Provider API key, overrides `api.api_key`
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    #[arg(long)]
    pub temperature: Option<f32>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Save the rendered SVG
    #[arg(long)]
    pub export: bool,

    /// Directory for exported files, overrides `export.output_dir`
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Copy the diagram source to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Seconds to keep serving copied source before exiting (X11/Wayland)
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub copy_hold: u64,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }

        if let Command::Generate(args) = &self.command {
            if let Some(dir) = &args.out_dir {
                config.export.output_dir = dir.clone();
            }
            if args.provider.is_some() {
                config.defaults.provider = args.provider;
            }
        }
    }
}

impl GenerateArgs {
    /// Build the submission form, falling back to config defaults.
    pub fn to_form(&self, config: &Config) -> GenerationForm {
        let mut form = GenerationForm::new(self.input.clone(), &config.defaults);
        if let Some(template) = self.template {
            form.template = template;
        }
        if let Some(temperature) = self.temperature {
            form.temperature = temperature;
        }
        if let Some(max_tokens) = self.max_tokens {
            form.max_tokens = max_tokens;
        }
        form.api_key = self
            .api_key
            .as_deref()
            .map(SecureString::new)
            .or_else(|| config.api.resolve_api_key())
            .unwrap_or_default();
        form
    }
}
