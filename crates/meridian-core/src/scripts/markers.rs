//! JavaScript-enabled markers.
//!
//! Pages render script-dependent controls disabled and show a "JavaScript
//! required" notice. Once scripts run, the controls are enabled and the
//! notice removed.

use crate::{
    document::Document,
    error::MeridianError,
    report::{ConversionReport, Script},
    selector::Selector,
};

/// Class removed from marked controls.
const DISABLED_CLASS: &str = "disabled";

/// Enables every element carrying `marker_class` and removes the notice.
///
/// The marker class itself is dropped too, so a second run finds nothing.
/// A missing notice is reported, not fatal.
pub fn clear_js_markers(
    doc: &mut Document,
    marker_class: &str,
    notice_selector: &Selector,
) -> ConversionReport {
    let mut report = ConversionReport::new(Script::JsMarkers);

    let marked: Vec<_> = doc
        .descendants(doc.root())
        .into_iter()
        .filter(|node| doc.has_class(*node, marker_class))
        .collect();
    for node in marked {
        doc.remove_class(node, DISABLED_CLASS);
        doc.remove_class(node, marker_class);
        report.converted += 1;
    }

    match doc.select_first(notice_selector) {
        Some(notice) => {
            doc.remove(notice);
            report.converted += 1;
        }
        None => report.fail(
            doc.root(),
            MeridianError::missing_element(notice_selector.as_str()),
        ),
    }

    report
}
