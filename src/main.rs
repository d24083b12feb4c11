use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use diagram_studio::api::HttpApiClient;
use diagram_studio::cli::{Cli, Command, GenerateArgs};
use diagram_studio::clipboard::SystemClipboard;
use diagram_studio::config::Config;
use diagram_studio::error::ClientError;
use diagram_studio::export::DirectoryDownloads;
use diagram_studio::logging::init_tracing;
use diagram_studio::provider::{DiagramTemplate, Provider, ProviderMode};
use diagram_studio::render::MermaidCliRenderer;
use diagram_studio::ui::controller::{Collaborators, DiagramController};
use diagram_studio::ui::toast::Toast;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    match &cli.command {
        Command::Templates => {
            for template in DiagramTemplate::ALL {
                println!("{}\t{}", template.id(), template.label());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Providers => {
            for provider in Provider::ALL {
                let mode = match provider.mode() {
                    ProviderMode::ManualEntry => "manual",
                    ProviderMode::EnumeratedList => "list",
                };
                println!("{}\t{}", provider.id(), mode);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Models { provider } => list_models(&config, *provider).await,
        Command::Generate(args) => generate(&config, args).await,
    }
}

fn build_controller(config: &Config, clipboard: SystemClipboard) -> Result<DiagramController> {
    let api = HttpApiClient::new(&config.api).context("Failed to create API client")?;
    tracing::debug!(base_url = %api.base_url(), "Using generation server");

    let collaborators = Collaborators {
        api: Arc::new(api),
        renderer: Arc::new(MermaidCliRenderer::new(&config.renderer)),
        clipboard: Arc::new(clipboard),
        downloads: Arc::new(DirectoryDownloads::new(config.export.output_dir.clone())),
    };
    Ok(DiagramController::new(collaborators, config))
}

async fn list_models(config: &Config, provider: Provider) -> Result<ExitCode> {
    if provider.mode() == ProviderMode::ManualEntry {
        eprintln!(
            "{} takes a free-text model name ({})",
            provider,
            provider.manual_placeholder().unwrap_or_default()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let controller = build_controller(config, SystemClipboard::new())?;
    let result = controller.change_provider(Some(provider)).await;
    print_toasts(controller.take_toasts());
    if result.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    for option in controller.selector().choices() {
        println!("{}\t{}", option.value, option.label);
    }
    Ok(ExitCode::SUCCESS)
}

async fn generate(config: &Config, args: &GenerateArgs) -> Result<ExitCode> {
    // The process exits right after copying, so the clipboard has to hold.
    let clipboard = SystemClipboard::holding_for(Duration::from_secs(args.copy_hold));
    let controller = build_controller(config, clipboard)?;

    if controller
        .change_provider(config.defaults.provider)
        .await
        .is_err()
    {
        print_toasts(controller.take_toasts());
        return Ok(ExitCode::FAILURE);
    }
    if controller.selector().is_manual() {
        controller.edit_manual_model(&args.model);
    } else {
        controller.select_model(&args.model);
    }

    let form = args.to_form(config);
    let outcome = tokio::select! {
        outcome = controller.submit(&form) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, abandoning request");
            Err(ClientError::Request("Interrupted".to_string()))
        }
    };

    let mut code = ExitCode::SUCCESS;
    match outcome {
        Ok(result) => {
            println!("{}", result.diagram_source);
            if args.export {
                match controller.export_vector() {
                    Ok(path) => eprintln!("Saved {}", path.display()),
                    Err(_) => code = ExitCode::FAILURE,
                }
            }
            if args.copy {
                if args.copy_hold > 0 {
                    eprintln!(
                        "Serving clipboard for up to {}s (until another copy replaces it)...",
                        args.copy_hold
                    );
                }
                if tokio::task::block_in_place(|| controller.copy_source()).is_err() {
                    code = ExitCode::FAILURE;
                }
            }
        }
        Err(_) => {
            // Source is kept even when only the render step failed.
            if let Some(result) = controller.current_diagram() {
                println!("{}", result.diagram_source);
            }
            code = ExitCode::FAILURE;
        }
    }

    print_toasts(controller.take_toasts());
    Ok(code)
}

fn print_toasts(toasts: Vec<Toast>) {
    for toast in toasts {
        eprintln!("{}", format_toast(&toast));
    }
}

fn format_toast(toast: &Toast) -> String {
    format!("[{}] {}: {}", toast.kind, toast.title, toast.body)
}
