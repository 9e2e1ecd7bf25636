//! CSS selectors for the document model.
//!
//! Parsing and matching are delegated to `scraper`, which runs Servo's
//! `selectors` engine, so any selector a browser's
//! `Element.querySelectorAll` accepts works here and matching sees the same
//! ancestors it would.

use std::fmt;
use std::str::FromStr;

use crate::{
    document::{Document, NodeId},
    error::{MeridianError, Result},
};

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    inner: scraper::Selector,
}

impl Selector {
    /// Parses selector text.
    pub fn parse(source: &str) -> Result<Self> {
        let inner =
            scraper::Selector::parse(source).map_err(|e| MeridianError::InvalidSelector {
                selector: source.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            source: source.trim().to_string(),
            inner,
        })
    }

    /// The selector text as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `node` is an element matched by any group of this selector.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        doc.element_ref(node)
            .is_some_and(|element| self.inner.matches(&element))
    }
}

impl FromStr for Selector {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
