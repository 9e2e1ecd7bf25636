//! Outcome records for page scripts.
//!
//! Every script contains its failures per element: a bad element is left as
//! the server rendered it and recorded here, and the script moves on.
//! Display implementations live in [`crate::display`].

use crate::{document::NodeId, error::MeridianError, offset::UtcOffset};

/// The page scripts, in the order a page load runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    JsMarkers,
    OffsetFields,
    Checkboxes,
    Labels,
    DateTimeFields,
    FormCounters,
    FieldGroups,
}

impl Script {
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::JsMarkers => "javascript markers",
            Script::OffsetFields => "timezone offset fields",
            Script::Checkboxes => "checkbox values",
            Script::Labels => "time labels",
            Script::DateTimeFields => "datetime fields",
            Script::FormCounters => "form counters",
            Script::FieldGroups => "field groups",
        }
    }
}

/// An element a script could not process.
#[derive(Debug)]
pub struct ElementFailure {
    pub node: NodeId,
    pub error: MeridianError,
}

/// What one script run did.
#[derive(Debug)]
pub struct ConversionReport {
    pub script: Script,
    /// Elements changed.
    pub converted: usize,
    /// Elements deliberately left alone (e.g. already-converted forms).
    pub skipped: usize,
    pub failures: Vec<ElementFailure>,
}

impl ConversionReport {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            converted: 0,
            skipped: 0,
            failures: Vec::new(),
        }
    }

    /// Records a contained failure and logs it.
    pub fn fail(&mut self, node: NodeId, error: MeridianError) {
        log::warn!("{}: left element unchanged: {error}", self.script.as_str());
        self.failures.push(ElementFailure { node, error });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Everything a page run did.
#[derive(Debug, Default)]
pub struct PageReport {
    /// Offset the run resolved, if any script needed one.
    pub offset: Option<UtcOffset>,
    pub scripts: Vec<ConversionReport>,
    /// Scripts that failed as a whole (e.g. no offset available).
    pub errors: Vec<MeridianError>,
}

impl PageReport {
    pub fn failure_count(&self) -> usize {
        self.errors.len() + self.scripts.iter().map(|r| r.failures.len()).sum::<usize>()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// The report for one script, if it ran.
    pub fn script(&self, script: Script) -> Option<&ConversionReport> {
        self.scripts.iter().find(|r| r.script == script)
    }
}
