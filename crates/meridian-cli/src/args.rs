use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ConfigCommands, FieldArgs, FormatArgs, PageArgs};

/// Convert UTC times in server-rendered pages to visitor-local time
///
/// Meridian runs the page scripts of a server-rendered site outside the
/// browser: time labels become long-form local text, datetime-local fields
/// are shifted to local time once per form, and the hidden offset fields are
/// filled in for the server to add back on submit.
#[derive(Parser)]
#[command(version, about, name = "meridian")]
pub struct Args {
    /// Visitor offset in minutes east of UTC (e.g. -300 for UTC-05:00).
    /// Defaults to the host's time zone
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub offset: Option<i32>,

    /// Path to the config file. Defaults to
    /// $XDG_CONFIG_HOME/meridian/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Meridian CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Format UTC timestamps as local display labels
    #[command(alias = "f")]
    Format(FormatArgs),
    /// Convert a datetime-local field value between UTC and local time
    Field(FieldArgs),
    /// Run the page scripts over an HTML or JSON document
    #[command(alias = "p")]
    Page(PageArgs),
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
