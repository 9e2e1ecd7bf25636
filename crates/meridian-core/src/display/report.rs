//! Display implementations for page reports.
//!
//! Output is markdown, matching what the CLI renderer expects.

use std::fmt;

use crate::report::{ConversionReport, PageReport};

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}**: {} converted", self.script.as_str(), self.converted)?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        if !self.failures.is_empty() {
            write!(f, ", {} failed", self.failures.len())?;
        }
        writeln!(f)?;

        for failure in &self.failures {
            writeln!(f, "  - {}", failure.error)?;
        }
        Ok(())
    }
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Page conversion")?;
        writeln!(f)?;
        match self.offset {
            Some(offset) => writeln!(f, "**Offset:** {offset}")?,
            None => writeln!(f, "**Offset:** not resolved")?,
        }
        writeln!(f)?;

        for script in &self.scripts {
            write!(f, "{script}")?;
        }

        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Errors")?;
            writeln!(f)?;
            for error in &self.errors {
                writeln!(f, "- {error}")?;
            }
        }
        Ok(())
    }
}
