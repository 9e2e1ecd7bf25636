//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        self.render_to(&mut io::stdout().lock(), markdown)
    }

    /// Render markdown text to `out`
    ///
    /// Reports share stdout with converted documents, so the page command
    /// sends them to stderr instead.
    pub fn render_to(&self, out: &mut impl Write, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Headers keep their hash symbols
            for line in markdown.lines() {
                if line.starts_with('#') {
                    writeln!(out, "\x1b[34m{line}\x1b[0m")?;
                } else {
                    writeln!(out, "{}", self.skin.inline(line))?;
                }
            }
        } else {
            write!(out, "{markdown}")?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
