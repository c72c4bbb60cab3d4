//! Entry point for blockview: a textured block previewer.

mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use asset::{BlockPreview, launcher};

use crate::cli::CliArgs;

fn resolve_model_path(cli: &CliArgs) -> Result<PathBuf> {
    if let Some(model) = &cli.model {
        log::info!("Model given on the command line: {:?}", model);
        return Ok(model.clone());
    }
    let path_file = match &cli.path_file {
        Some(p) => p.clone(),
        None => launcher::default_path_file()?,
    };
    launcher::read_model_path(&path_file)
        .with_context(|| format!("Cannot resolve model from {}", path_file.display()))
}

fn run(cli: &CliArgs) -> Result<()> {
    let model_path = resolve_model_path(cli)?;
    let block = BlockPreview::load(&model_path)
        .with_context(|| format!("Could not prepare block from {}", model_path.display()))?;

    platform::run_viewer(cli.viewer_config(), block)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = CliArgs::parse(std::env::args());
    log::info!(
        "Starting blockview. Backend: {:?}, show_fps={}, window_size={}x{}",
        cli.backends,
        cli.show_fps,
        cli.width,
        cli.height
    );

    if let Err(err) = run(&cli) {
        log::error!("{err:#}");
        std::process::exit(1);
    }

    log::info!("Graceful shutdown. Bye!");
}
