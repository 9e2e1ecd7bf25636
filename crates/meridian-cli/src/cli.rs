//! Command handlers and their clap argument structures.
//!
//! Each subcommand has an argument struct here; [`Cli`] holds what the
//! global options resolved to and runs the commands against
//! `meridian-core`.

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::Timestamp;
use log::{debug, info};
use meridian_core::{
    format_long, local_wire_to_utc,
    timestamp::{format_wire, to_local},
    utc_text_to_display, utc_to_local_wire, AdapterConfig, Document, OffsetSource,
    PageAdapterBuilder, UtcOffset,
};

use crate::renderer::TerminalRenderer;

/// Format UTC timestamps as local display labels
///
/// Accepts ISO-8601 text with or without a zone designator; zone-less text
/// is read as UTC. Prints one label per timestamp, or the current time when
/// none is given.
#[derive(Args)]
pub struct FormatArgs {
    #[arg(help = "UTC timestamps, e.g. 2025-01-05T20:07:00")]
    pub timestamps: Vec<String>,
}

/// Convert a datetime-local field value
///
/// By default the value is read as UTC (as the server renders it) and the
/// local value is printed. With --to-utc the value is read as local time and
/// the UTC value the server would store is printed.
#[derive(Args)]
pub struct FieldArgs {
    #[arg(help = "Field value in YYYY-MM-DDTHH:MM form")]
    pub value: String,
    #[arg(long, help = "Convert a local value back to UTC")]
    pub to_utc: bool,
}

/// Document encodings the page command reads and writes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Html,
    Json,
}

impl DocumentFormat {
    /// Guesses from a file extension; anything but `.json` is HTML.
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Html,
        }
    }
}

/// Run the page scripts over a document
///
/// The converted document is written to stdout (or --output) and a report of
/// what each script did is written to stderr.
#[derive(Args)]
pub struct PageArgs {
    #[arg(help = "Document to convert, or '-' for stdin")]
    pub input: PathBuf,
    #[arg(
        long,
        value_enum,
        help = "Input encoding. Defaults to json for .json files, html otherwise"
    )]
    pub input_format: Option<DocumentFormat>,
    #[arg(long, value_enum, help = "Output encoding. Defaults to the input encoding")]
    pub output_format: Option<DocumentFormat>,
    #[arg(short, long, help = "Write the converted document to a file")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Exit with an error if any element was left unconverted")]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default config file
    Init {
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
    /// Print the effective configuration as JSON
    Show,
}

/// Runs commands with the resolved global options.
pub struct Cli {
    offset: Box<dyn OffsetSource>,
    config_path: Option<PathBuf>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(
        offset: Box<dyn OffsetSource>,
        config_path: Option<PathBuf>,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            offset,
            config_path,
            renderer,
        }
    }

    fn resolve_offset(&self) -> Result<UtcOffset> {
        let offset = self
            .offset
            .resolve()
            .context("Failed to determine the visitor offset")?;
        debug!("using offset {offset}");
        Ok(offset)
    }

    pub fn format(&self, args: FormatArgs) -> Result<()> {
        let offset = self.resolve_offset()?;

        if args.timestamps.is_empty() {
            println!("{}", format_long(&to_local(Timestamp::now(), offset)));
            return Ok(());
        }

        for text in &args.timestamps {
            let label = utc_text_to_display(text, offset)
                .with_context(|| format!("Failed to format '{text}'"))?;
            println!("{label}");
        }
        Ok(())
    }

    pub fn field(&self, args: FieldArgs) -> Result<()> {
        let offset = self.resolve_offset()?;

        let converted = if args.to_utc {
            format_wire(local_wire_to_utc(&args.value, offset)?)
        } else {
            utc_to_local_wire(&args.value, offset)?
        };
        println!("{converted}");
        Ok(())
    }

    pub fn page(self, args: PageArgs) -> Result<()> {
        let input_format = args
            .input_format
            .unwrap_or_else(|| DocumentFormat::from_path(&args.input));
        let output_format = args.output_format.unwrap_or(input_format);

        let source = read_input(&args.input)?;
        let mut doc = match input_format {
            DocumentFormat::Html => Document::parse_html(&source),
            DocumentFormat::Json => {
                Document::from_json(&source).context("Failed to parse JSON document")?
            }
        };

        let adapter = PageAdapterBuilder::new()
            .with_config_path(self.config_path.as_ref())
            .with_offset_source(self.offset)
            .build()
            .context("Failed to initialize page adapter")?;

        let report = adapter.run(&mut doc);
        info!("converted {}", args.input.display());

        let output = match output_format {
            DocumentFormat::Html => doc.to_html(),
            DocumentFormat::Json => doc.to_json_pretty()?,
        };
        match &args.output {
            Some(path) => fs::write(path, &output)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(output.as_bytes())?;
                writeln!(stdout)?;
            }
        }

        self.renderer
            .render_to(&mut io::stderr().lock(), &report.to_string())?;

        if args.strict && !report.is_clean() {
            bail!("{} element(s) left unconverted", report.failure_count());
        }
        Ok(())
    }

    pub fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Init { force } => self.init_config(force),
            ConfigCommands::Show => {
                let config = match &self.config_path {
                    Some(path) => AdapterConfig::load(path),
                    None => AdapterConfig::load_default(),
                }
                .context("Failed to load config")?;
                let json = config
                    .to_json_pretty()
                    .context("Failed to serialize config")?;
                println!("{json}");
                Ok(())
            }
        }
    }

    fn init_config(&self, force: bool) -> Result<()> {
        let config = AdapterConfig::default();

        let path = match &self.config_path {
            Some(path) => {
                if path.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", path.display());
                }
                config.write(path)?;
                path.clone()
            }
            None => {
                if let Some(existing) = AdapterConfig::default_path() {
                    if !force {
                        bail!(
                            "{} already exists (use --force to overwrite)",
                            existing.display()
                        );
                    }
                }
                config.write_default()?
            }
        };

        self.renderer
            .render(&format!("Wrote default config to `{}`\n", path.display()))
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
