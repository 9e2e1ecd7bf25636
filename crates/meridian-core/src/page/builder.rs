//! Builder for creating and configuring PageAdapter instances.

use std::path::{Path, PathBuf};

use super::PageAdapter;
use crate::{
    config::AdapterConfig,
    error::Result,
    offset::{OffsetSource, SystemOffset},
};

/// Builder for creating and configuring PageAdapter instances.
pub struct PageAdapterBuilder {
    config: Option<AdapterConfig>,
    config_path: Option<PathBuf>,
    offset: Option<Box<dyn OffsetSource>>,
}

impl PageAdapterBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            config_path: None,
            offset: None,
        }
    }

    /// Uses an in-memory configuration. Takes precedence over a path.
    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom configuration file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_CONFIG_HOME/meridian/config.json` when that file exists, and
    /// built-in defaults otherwise.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets where the visitor offset comes from. Defaults to the host's
    /// time zone.
    pub fn with_offset_source<S: OffsetSource + 'static>(mut self, source: S) -> Self {
        self.offset = Some(Box::new(source));
        self
    }

    /// Builds the configured adapter.
    ///
    /// # Errors
    ///
    /// Returns `MeridianError::FileSystem` if the config file cannot be read
    /// Returns `MeridianError::Serialization` if it is not valid config JSON
    /// Returns `MeridianError::InvalidSelector` if a selector does not parse
    pub fn build(self) -> Result<PageAdapter> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => AdapterConfig::load(&path)?,
            (None, None) => AdapterConfig::load_default()?,
        };
        let selectors = config.compile()?;
        let offset = self.offset.unwrap_or_else(|| Box::new(SystemOffset));

        Ok(PageAdapter::new(selectors, offset))
    }
}

impl Default for PageAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
