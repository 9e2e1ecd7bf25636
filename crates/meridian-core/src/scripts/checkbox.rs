//! Checkbox value mirroring.
//!
//! Unchecked checkboxes are not submitted at all, so every checkbox carries
//! its state in `value` (`"true"`/`"false"`) for the server to read.

use crate::{
    document::{Document, NodeId},
    report::{ConversionReport, Script},
    selector::Selector,
};

/// Whether the checkbox is checked.
pub fn is_checked(doc: &Document, checkbox: NodeId) -> bool {
    doc.has_attr(checkbox, "checked")
}

/// Writes the checkbox's checked state into its `value`.
pub fn mirror_checkbox(doc: &mut Document, checkbox: NodeId) {
    let value = if is_checked(doc, checkbox) { "true" } else { "false" };
    doc.set_attr(checkbox, "value", value);
}

/// Mirrors every checkbox matching `selector`.
pub fn mirror_all_checkboxes(doc: &mut Document, selector: &Selector) -> ConversionReport {
    let mut report = ConversionReport::new(Script::Checkboxes);
    for checkbox in doc.select(selector) {
        mirror_checkbox(doc, checkbox);
        report.converted += 1;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrors_checked_state() {
        let mut doc = Document::new();
        let on = doc.append_element(doc.root(), "input", &[("type", "checkbox"), ("checked", "")]);
        let off = doc.append_element(doc.root(), "input", &[("type", "checkbox"), ("value", "on")]);
        doc.append_element(doc.root(), "input", &[("type", "text"), ("value", "keep")]);

        let selector = Selector::parse("input[type=\"checkbox\"]").unwrap();
        let report = mirror_all_checkboxes(&mut doc, &selector);

        assert_eq!(report.converted, 2);
        assert_eq!(doc.attr(on, "value"), Some("true"));
        assert_eq!(doc.attr(off, "value"), Some("false"));
        assert_eq!(doc.query("input[value=keep]").unwrap().len(), 1);
    }

    #[test]
    fn test_toggle_updates_value() {
        let mut doc = Document::new();
        let checkbox = doc.append_element(doc.root(), "input", &[("type", "checkbox")]);

        mirror_checkbox(&mut doc, checkbox);
        assert_eq!(doc.attr(checkbox, "value"), Some("false"));

        doc.set_attr(checkbox, "checked", "");
        mirror_checkbox(&mut doc, checkbox);
        assert_eq!(doc.attr(checkbox, "value"), Some("true"));
    }
}
