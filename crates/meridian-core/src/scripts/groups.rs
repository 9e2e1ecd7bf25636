//! Enabling and disabling grouped form fields from a checkbox.
//!
//! Optional form sections (an event's location, a private event's password)
//! sit in a group toggled by a checkbox. Unchecking disables the group's
//! controls and strips `required` from its inputs; checking restores both.
//!
//! Once `required` is stripped the inputs can no longer be found by
//! selector, so the set of originally required inputs is remembered in a
//! [`RequiredInputCache`] owned by the caller.

use std::collections::HashMap;

use log::debug;

use crate::{
    document::{Document, NodeId},
    error::Result,
    report::{ConversionReport, Script},
    selector::Selector,
    scripts::checkbox::is_checked,
};

#[derive(Debug, Clone)]
struct CacheEntry {
    inputs: Vec<NodeId>,
    built_at: u64,
}

/// Required inputs per group, keyed by the group's selector text.
///
/// An entry is rebuilt when the document's structural version has moved
/// since it was built. The rebuild keeps remembered inputs that are still
/// inside the group and adds any that are currently marked required, so
/// inputs stripped by an earlier toggle are not forgotten.
#[derive(Debug, Clone, Default)]
pub struct RequiredInputCache {
    entries: HashMap<String, CacheEntry>,
}

impl RequiredInputCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered required inputs of `group`, in document order.
    pub fn required_inputs(
        &mut self,
        doc: &Document,
        key: &str,
        group: NodeId,
        required_selector: &Selector,
    ) -> &[NodeId] {
        let version = doc.structure_version();
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CacheEntry {
                inputs: Vec::new(),
                built_at: u64::MAX,
            });

        if entry.built_at != version {
            let current = doc.select_within(group, required_selector);
            let inputs = doc
                .descendants(group)
                .into_iter()
                .filter(|node| entry.inputs.contains(node) || current.contains(node))
                .collect();
            debug!("rebuilt required inputs for '{key}'");
            entry.inputs = inputs;
            entry.built_at = version;
        }

        &entry.inputs
    }

    /// Forgets one group.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Selectors describing a group's contents.
#[derive(Debug, Clone)]
pub struct GroupSelectors {
    /// Inputs that are required while the group is enabled.
    pub required: Selector,
    /// Controls disabled while the group is disabled.
    pub controls: Selector,
}

impl GroupSelectors {
    pub fn parse(required: &str, controls: &str) -> Result<Self> {
        Ok(Self {
            required: Selector::parse(required)?,
            controls: Selector::parse(controls)?,
        })
    }
}

/// Applies `checkbox`'s state to the first element matching `group`.
///
/// A missing checkbox or group is a no-op, as pages only render the
/// sections they need. `converted` counts attribute changes made.
pub fn set_group_enabled(
    doc: &mut Document,
    checkbox: Option<NodeId>,
    group: &Selector,
    selectors: &GroupSelectors,
    cache: &mut RequiredInputCache,
) -> ConversionReport {
    let mut report = ConversionReport::new(Script::FieldGroups);

    let Some(checkbox) = checkbox.filter(|c| doc.contains(*c)) else {
        return report;
    };
    let Some(group_node) = doc.select_first(group) else {
        return report;
    };

    let enabled = is_checked(doc, checkbox);
    let required = cache
        .required_inputs(doc, group.as_str(), group_node, &selectors.required)
        .to_vec();

    for input in required {
        if enabled {
            doc.set_attr(input, "required", "");
        } else {
            doc.remove_attr(input, "required");
        }
        report.converted += 1;
    }

    for control in doc.select_within(group_node, &selectors.controls) {
        if enabled {
            doc.remove_attr(control, "disabled");
        } else {
            doc.set_attr(control, "disabled", "");
        }
        report.converted += 1;
    }

    debug!(
        "group '{}' {}",
        group.as_str(),
        if enabled { "enabled" } else { "disabled" }
    );
    report
}
