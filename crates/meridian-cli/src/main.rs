//! Meridian CLI Application
//!
//! Command-line interface for the meridian local-time adapter.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use meridian_core::{FixedOffset, OffsetSource, SystemOffset, UtcOffset};
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        offset,
        config,
        no_color,
        command,
    } = Args::parse();

    let offset: Box<dyn OffsetSource> = match offset {
        Some(minutes) => Box::new(FixedOffset(
            UtcOffset::from_minutes(minutes).context("Invalid --offset")?,
        )),
        None => Box::new(SystemOffset),
    };

    let cli = Cli::new(offset, config, TerminalRenderer::new(!no_color));

    info!("Meridian started");

    match command {
        Format(args) => cli.format(args),
        Field(args) => cli.field(args),
        Page(args) => cli.page(args),
        Config { command } => cli.handle_config_command(command),
    }
}
