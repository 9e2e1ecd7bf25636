//! Duplicate form counter removal.
//!
//! The CSS framework's form helpers inject a character counter per input,
//! and inject another one each time a tab holding the input is shown. Only
//! the last counter in each helper is live; the earlier ones are removed.

use crate::{
    document::Document,
    report::{ConversionReport, Script},
    selector::Selector,
};

/// Trims each helper down to its last counter. `converted` counts removals.
pub fn remove_duplicate_counters(
    doc: &mut Document,
    helper_selector: &Selector,
    counter_selector: &Selector,
) -> ConversionReport {
    let mut report = ConversionReport::new(Script::FormCounters);

    for helper in doc.select(helper_selector) {
        // Nested helpers may already have lost counters to an outer pass.
        let counters: Vec<_> = doc
            .select_within(helper, counter_selector)
            .into_iter()
            .filter(|counter| doc.contains(*counter))
            .collect();

        if let Some((_, extras)) = counters.split_last() {
            for counter in extras {
                if doc.remove(*counter) {
                    report.converted += 1;
                }
            }
        }
    }

    report
}
