//! The page scripts, one module each.
//!
//! Each script is a one-shot mutation of a [`crate::Document`] that reports
//! what it did through a [`crate::ConversionReport`]. The time adapter proper
//! is [`labels`] and [`fields`]; the rest are small utilities the same pages
//! rely on.

pub mod checkbox;
pub mod clipboard;
pub mod fields;
pub mod groups;
pub mod labels;
pub mod markers;
pub mod numeric;
pub mod widgets;
