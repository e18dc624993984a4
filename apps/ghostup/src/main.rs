//! ghostup - build and install Ghostty from signed source releases
//!
//! Parses the command line, merges configuration, runs the install pipeline
//! and renders its events while it works.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::Cli;
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use ghostup_config::{Config, InstallLayout};
use ghostup_events::EventReceiver;
use ghostup_install::{InstallContext, InstallPipeline, PipelineFailure};
use ghostup_types::{BuildMode, ColorChoice, InstallReport};
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e.summary());
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting ghostup v{}", env!("CARGO_PKG_VERSION"));

    // Precedence: file (or defaults), then environment, then flags
    let mut config = Config::load_or_default(&cli.global.config).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli);

    let layout = InstallLayout::resolve(&config)?;
    let (event_sender, event_receiver) = ghostup_events::channel();

    let mode = if cli.install.container {
        BuildMode::Container
    } else {
        BuildMode::Local
    };
    let ctx = InstallContext::from_config(&config, layout)?
        .with_mode(mode)
        .with_no_cache(cli.install.no_cache)
        .with_pull_always(cli.install.pull_always)
        .with_skip_build(cli.install.skip_build)
        .with_event_sender(event_sender);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.global.debug);
    let renderer = OutputRenderer::new(cli.global.json, colors_enabled);

    let report =
        run_pipeline_with_events(InstallPipeline::new(ctx), event_receiver, &mut event_handler)
            .await?;

    renderer.render_report(&report)?;
    info!("Install completed");
    Ok(())
}

/// Run the pipeline while draining its events
async fn run_pipeline_with_events(
    pipeline: InstallPipeline,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<InstallReport, PipelineFailure> {
    let mut pipeline_future = Box::pin(async move { pipeline.run().await });

    loop {
        select! {
            result = &mut pipeline_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }
    if let Some(version) = &cli.version {
        config.install.version = version.to_string();
    }
    if let Some(zig_version) = &cli.install.zig_version {
        config.install.zig_version = zig_version.to_string();
    }
    if let Some(prefix) = &cli.install.prefix {
        config.install.prefix = Some(prefix.clone());
    }
    if let Some(work_dir) = &cli.install.work_dir {
        config.install.work_dir = Some(work_dir.clone());
    }
}
