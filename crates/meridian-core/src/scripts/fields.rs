//! Editable datetime field conversion and offset field filling.
//!
//! The server renders datetime-local inputs holding UTC values, next to a
//! hidden flag input whose value starts as `"false"`. Converting a form
//! rewrites every datetime input under the flag's parent to local time and
//! flips the flag to `"true"`, so a restored page (back-forward cache) that
//! runs the scripts again is left alone.
//!
//! On submit the server adds the browser offset back; see
//! [`crate::timestamp::local_wire_to_utc`] and [`fill_offset_fields`].

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::{
    document::Document,
    error::{MeridianError, Result},
    offset::{OffsetSource, UtcOffset},
    report::{ConversionReport, Script},
    selector::Selector,
    timestamp::utc_to_local_wire,
};

/// Whether a form's datetime inputs already hold local values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionFlag {
    /// Wire value `"false"`: the inputs still hold UTC.
    NotConverted,
    /// Wire value `"true"`.
    Converted,
}

impl ConversionFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionFlag::NotConverted => "false",
            ConversionFlag::Converted => "true",
        }
    }
}

impl FromStr for ConversionFlag {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "false" => Ok(ConversionFlag::NotConverted),
            "true" => Ok(ConversionFlag::Converted),
            _ => Err(MeridianError::InvalidFlag {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConversionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts every not-yet-converted form marked by `flag_selector`.
///
/// The offset is resolved lazily, once, and only if some form needs it. A
/// failure to resolve it aborts the script before any field is touched.
/// A field whose value does not parse keeps its value and is reported; the
/// flag still flips, since its siblings are now local.
pub fn convert_datetime_fields(
    doc: &mut Document,
    flag_selector: &Selector,
    input_selector: &Selector,
    offset: &dyn OffsetSource,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::new(Script::DateTimeFields);
    let mut resolved: Option<UtcOffset> = None;

    for flag in doc.select(flag_selector) {
        let raw = doc.attr(flag, "value").unwrap_or_default();
        match raw.parse::<ConversionFlag>() {
            Ok(ConversionFlag::Converted) => {
                debug!("form already converted, skipping");
                report.skipped += 1;
                continue;
            }
            Ok(ConversionFlag::NotConverted) => {}
            Err(error) => {
                report.fail(flag, error);
                continue;
            }
        }

        let offset = match resolved {
            Some(offset) => offset,
            None => {
                let offset = offset.resolve()?;
                resolved = Some(offset);
                offset
            }
        };

        let scope = doc.parent(flag).unwrap_or_else(|| doc.root());
        for input in doc.select_within(scope, input_selector) {
            let value = doc.attr(input, "value").unwrap_or_default().to_string();
            match utc_to_local_wire(&value, offset) {
                Ok(local) => {
                    debug!("field '{value}' -> '{local}'");
                    doc.set_attr(input, "value", local);
                    report.converted += 1;
                }
                Err(error) => report.fail(input, error),
            }
        }

        doc.set_attr(flag, "value", ConversionFlag::Converted.as_str());
    }

    Ok(report)
}

/// Writes the browser-convention offset into every field matching
/// `selector`, for the server to add back on submit.
pub fn fill_offset_fields(doc: &mut Document, selector: &Selector, offset: UtcOffset) -> ConversionReport {
    let mut report = ConversionReport::new(Script::OffsetFields);
    let value = offset.browser_minutes().to_string();

    for field in doc.select(selector) {
        doc.set_attr(field, "value", value.as_str());
        report.converted += 1;
    }

    report
}
