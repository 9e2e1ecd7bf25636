//! Numeric input sanitization.

use log::debug;

use crate::document::{Document, NodeId};

/// Forces an input's `value` to a non-negative integer.
///
/// Every non-digit character is dropped (so `-12` becomes `12` and `3.5`
/// becomes `35`). An empty remainder, or one too large for `u64`, falls back
/// to `default`. Returns the value written.
pub fn sanitize_non_negative(doc: &mut Document, input: NodeId, default: u64) -> u64 {
    let digits: String = doc
        .attr(input, "value")
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    let value = digits.parse::<u64>().unwrap_or(default);
    debug!("sanitized numeric input to {value}");
    doc.set_attr(input, "value", value.to_string());
    value
}
