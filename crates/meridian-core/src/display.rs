//! Display wrappers and implementations.
//!
//! - [`LongDateTime`] renders a civil date-time as label text
//! - [`crate::report::ConversionReport`] and [`crate::report::PageReport`]
//!   render as markdown summaries for the terminal

pub mod datetime;
mod report;

pub use datetime::{format_long, LongDateTime};
