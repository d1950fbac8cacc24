use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ghflow_gen::{RenderOptions, render, write_workflow};
use tracing::debug;

mod presets;

use presets::Preset;

/// Render CI workflow files authored with the ghflow DSL.
#[derive(Parser, Debug)]
#[command(name = "ghflow", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a bundled workflow as YAML.
    Render {
        /// Workflow to render
        #[arg(long, value_enum, default_value_t = Preset::NodeCi)]
        preset: Preset,

        /// Sort mapping keys in the output
        #[arg(long)]
        sort_keys: bool,

        /// YAML file with render options (`sort_keys`, `no_refs`)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List bundled workflows.
    Presets,
}

/// CLI entry point
fn main() -> Result<()> {
    init_tracing();
    match Args::parse().command {
        Command::Render {
            preset,
            sort_keys,
            options,
            output,
        } => run_render(preset, sort_keys, options, output),
        Command::Presets => list_presets(),
    }
}

// Logs go to stderr so rendered YAML on stdout can be piped.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run_render(preset: Preset, sort_keys: bool, options_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let mut options = match &options_path {
        Some(path) => RenderOptions::load(path)?,
        None => RenderOptions::default(),
    }
    .with_env_overrides()?;
    if sort_keys {
        options.sort_keys = true;
    }
    debug!(?preset, ?options, "rendering preset");

    let workflow = preset.build();
    match output {
        Some(path) => write_workflow(&workflow, &options, &path),
        None => {
            let text = render(&workflow, &options)?;
            io::stdout().write_all(text.as_bytes()).context("write to stdout")
        }
    }
}

fn list_presets() -> Result<()> {
    let mut stdout = io::stdout().lock();
    for preset in Preset::value_variants() {
        let name = preset
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        writeln!(stdout, "{name:<10} {}", preset.describe())?;
    }
    Ok(())
}
