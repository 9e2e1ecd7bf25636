//! The page adapter: every script wired to page events.

mod builder;

use std::cell::RefCell;
use std::rc::Rc;

use log::info;

pub use builder::PageAdapterBuilder;

use crate::{
    config::Selectors,
    document::{Document, NodeId},
    error::Result,
    events::{EventKind, EventRegistry, HandlerOutcome, Subscription},
    offset::{CachedOffset, OffsetSource, UtcOffset},
    report::{ConversionReport, PageReport, Script},
    scripts::{
        checkbox::{mirror_all_checkboxes, mirror_checkbox},
        fields::{convert_datetime_fields, fill_offset_fields},
        groups::{set_group_enabled, RequiredInputCache},
        labels::convert_labels,
        markers::clear_js_markers,
        widgets::remove_duplicate_counters,
    },
};

type SharedOffset = Rc<CachedOffset<Box<dyn OffsetSource>>>;

/// Runs the page scripts against a document.
///
/// The visitor offset is resolved at most once per adapter and only when a
/// script needs it. Group toggles share one [`RequiredInputCache`] per
/// installation, so required inputs seen at load are remembered across
/// later change events.
pub struct PageAdapter {
    selectors: Rc<Selectors>,
    offset: SharedOffset,
}

impl PageAdapter {
    fn new(selectors: Selectors, offset: Box<dyn OffsetSource>) -> Self {
        Self {
            selectors: Rc::new(selectors),
            offset: Rc::new(CachedOffset::new(offset)),
        }
    }

    /// Registers every script with `registry`.
    ///
    /// Load handlers go on the document root in run order; change handlers
    /// on each configured group checkbox present in `doc`; the counter
    /// cleanup also runs on `Shown` at the root.
    pub fn install(&self, doc: &Document, registry: &mut EventRegistry) -> Vec<Subscription> {
        let root = doc.root();
        let cache = Rc::new(RefCell::new(RequiredInputCache::new()));
        let mut subscriptions = Vec::new();

        let s = Rc::clone(&self.selectors);
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            Ok(clear_js_markers(doc, &s.js_enable_class, &s.js_required))
        }));

        let (s, offset) = (Rc::clone(&self.selectors), Rc::clone(&self.offset));
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            if doc.select_first(&s.offset_fields).is_none() {
                return Ok(ConversionReport::new(Script::OffsetFields));
            }
            Ok(fill_offset_fields(doc, &s.offset_fields, offset.resolve()?))
        }));

        let s = Rc::clone(&self.selectors);
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            Ok(mirror_all_checkboxes(doc, &s.checkboxes))
        }));

        let (s, offset) = (Rc::clone(&self.selectors), Rc::clone(&self.offset));
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            if doc.select_first(&s.labels).is_none() {
                return Ok(ConversionReport::new(Script::Labels));
            }
            Ok(convert_labels(doc, &s.labels, offset.resolve()?))
        }));

        let (s, offset) = (Rc::clone(&self.selectors), Rc::clone(&self.offset));
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            convert_datetime_fields(doc, &s.flags, &s.datetime_inputs, &*offset)
        }));

        for kind in [EventKind::Load, EventKind::Shown] {
            let s = Rc::clone(&self.selectors);
            subscriptions.push(registry.on(root, kind, move |doc: &mut Document, _| {
                Ok(remove_duplicate_counters(doc, &s.form_helpers, &s.form_counters))
            }));
        }

        let (s, groups_cache) = (Rc::clone(&self.selectors), Rc::clone(&cache));
        subscriptions.push(registry.on(root, EventKind::Load, move |doc: &mut Document, _| {
            let mut report = ConversionReport::new(Script::FieldGroups);
            for binding in &s.groups {
                let checkbox = doc.select_first(&binding.checkbox);
                let group = set_group_enabled(
                    doc,
                    checkbox,
                    &binding.group,
                    &s.group_contents,
                    &mut groups_cache.borrow_mut(),
                );
                report.converted += group.converted;
            }
            Ok(report)
        }));

        for (index, binding) in self.selectors.groups.iter().enumerate() {
            let Some(checkbox) = doc.select_first(&binding.checkbox) else {
                continue;
            };
            let (s, groups_cache) = (Rc::clone(&self.selectors), Rc::clone(&cache));
            subscriptions.push(registry.on(
                checkbox,
                EventKind::Change,
                move |doc: &mut Document, target: NodeId| {
                    mirror_checkbox(doc, target);
                    Ok(set_group_enabled(
                        doc,
                        Some(target),
                        &s.groups[index].group,
                        &s.group_contents,
                        &mut groups_cache.borrow_mut(),
                    ))
                },
            ));
        }

        subscriptions
    }

    /// Installs the scripts into a fresh registry and fires `Load`.
    pub fn run(&self, doc: &mut Document) -> PageReport {
        let mut registry = EventRegistry::new();
        let _subscriptions = self.install(doc, &mut registry);
        let root = doc.root();
        let outcomes = registry.dispatch(doc, root, EventKind::Load);
        let report = self.collect(outcomes);

        info!(
            "page run finished: {} scripts, {} failures",
            report.scripts.len(),
            report.failure_count()
        );
        report
    }

    /// Folds handler outcomes into a page report.
    pub fn collect(&self, outcomes: Vec<HandlerOutcome>) -> PageReport {
        let mut report = PageReport {
            offset: self.offset.get(),
            ..PageReport::default()
        };
        for outcome in outcomes {
            match outcome.result {
                Ok(script) => report.scripts.push(script),
                Err(error) => report.errors.push(error),
            }
        }
        report
    }

    /// The offset, once some script has resolved it.
    pub fn resolved_offset(&self) -> Option<UtcOffset> {
        self.offset.get()
    }

    /// Resolves the visitor offset now, sharing the adapter's cache.
    pub fn resolve_offset(&self) -> Result<UtcOffset> {
        self.offset.resolve()
    }
}
