//! Static label conversion.
//!
//! Read-only labels arrive holding UTC text and leave holding the long local
//! form. The rewrite is one-way: converted text no longer parses as a
//! timestamp, so a second pass over the same labels fails (and leaves them
//! alone) rather than shifting them twice.

use log::debug;

use crate::{
    document::Document,
    offset::UtcOffset,
    report::{ConversionReport, Script},
    selector::Selector,
    timestamp::utc_text_to_display,
};

/// Rewrites every label matching `selector` from UTC to local long form.
pub fn convert_labels(doc: &mut Document, selector: &Selector, offset: UtcOffset) -> ConversionReport {
    let mut report = ConversionReport::new(Script::Labels);

    for label in doc.select(selector) {
        let text = doc.text_content(label);
        match utc_text_to_display(&text, offset) {
            Ok(display) => {
                debug!("label '{}' -> '{display}'", text.trim());
                doc.set_text_content(label, display);
                report.converted += 1;
            }
            Err(error) => report.fail(label, error),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeridianError;

    fn label_page(texts: &[&str]) -> (Document, Vec<crate::document::NodeId>) {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root(), "body", &[]);
        let labels = texts
            .iter()
            .map(|text| {
                let span = doc.append_element(body, "span", &[("class", "js_convert_utc_to_local")]);
                doc.append_text(span, *text);
                span
            })
            .collect();
        (doc, labels)
    }

    fn selector() -> Selector {
        Selector::parse("span.js_convert_utc_to_local").unwrap()
    }

    #[test]
    fn test_converts_label_text() {
        let (mut doc, labels) = label_page(&["2025-01-05T20:07:00"]);
        let report = convert_labels(&mut doc, &selector(), UtcOffset::from_minutes(-300).unwrap());

        assert_eq!(report.converted, 1);
        assert!(report.is_clean());
        assert_eq!(doc.text_content(labels[0]), "Sunday, January 5, 2025 at 3:07 PM");
    }

    #[test]
    fn test_malformed_label_is_contained() {
        let (mut doc, labels) =
            label_page(&["2025-01-05T20:07:00", "not-a-date", "2025-06-01 00:00:00"]);
        let report = convert_labels(&mut doc, &selector(), UtcOffset::UTC);

        assert_eq!(report.converted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].node, labels[1]);
        assert!(matches!(
            report.failures[0].error,
            MeridianError::InvalidTimestamp { .. }
        ));
        assert_eq!(doc.text_content(labels[1]), "not-a-date");
        assert_eq!(doc.text_content(labels[0]), "Sunday, January 5, 2025 at 8:07 PM");
        assert_eq!(doc.text_content(labels[2]), "Sunday, June 1, 2025 at 12:00 AM");
    }

    #[test]
    fn test_second_pass_leaves_converted_text() {
        let (mut doc, labels) = label_page(&["2025-01-05T20:07:00"]);
        let offset = UtcOffset::from_minutes(60).unwrap();
        convert_labels(&mut doc, &selector(), offset);
        let once = doc.text_content(labels[0]);

        let report = convert_labels(&mut doc, &selector(), offset);
        assert_eq!(report.converted, 0);
        assert_eq!(doc.text_content(labels[0]), once);
    }
}
