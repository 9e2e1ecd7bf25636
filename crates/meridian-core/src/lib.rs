//! Core library for the Meridian local-time presentation adapter.
//!
//! Server-rendered pages carry times in UTC. This crate rewrites them for
//! the visitor: read-only labels become long-form local text, and
//! datetime-local form fields are shifted to local time exactly once per
//! form, guarded by a hidden conversion flag. The server adds the offset
//! back on submit.
//!
//! # Architecture
//!
//! - **Document model** ([`document`], [`selector`]): a `scraper` HTML
//!   tree with CSS selector queries, imported from HTML or JSON
//! - **Time handling** ([`offset`], [`timestamp`], [`display`]): offsets,
//!   UTC parsing, wire formats and the long label format
//! - **Scripts** ([`scripts`]): one-shot document mutations, each reporting
//!   through a [`ConversionReport`] with per-element error containment
//! - **Wiring** ([`events`], [`page`]): handlers registered per node and
//!   event, returning disposable subscriptions
//!
//! # Quick Start
//!
//! ```rust
//! use meridian_core::{Document, FixedOffset, PageAdapterBuilder, Script, UtcOffset};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::parse_html(
//!     r#"<span class="js_convert_utc_to_local">2025-01-05T20:07:00</span>"#,
//! );
//!
//! let adapter = PageAdapterBuilder::new()
//!     .with_config(Default::default())
//!     .with_offset_source(FixedOffset(UtcOffset::from_minutes(-300)?))
//!     .build()?;
//!
//! let report = adapter.run(&mut doc);
//! assert_eq!(report.script(Script::Labels).map(|r| r.converted), Some(1));
//! assert!(doc.to_html().contains("Sunday, January 5, 2025 at 3:07 PM"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod events;
pub mod offset;
pub mod page;
pub mod report;
pub mod scripts;
pub mod selector;
pub mod timestamp;

// Re-export commonly used types
pub use config::{AdapterConfig, GroupBinding};
pub use display::{format_long, LongDateTime};
pub use document::{Document, NodeId};
pub use error::{MeridianError, Result};
pub use events::{EventKind, EventRegistry, Subscription};
pub use offset::{BrowserOffset, FixedOffset, OffsetSource, SystemOffset, UtcOffset};
pub use page::{PageAdapter, PageAdapterBuilder};
pub use report::{ConversionReport, PageReport, Script};
pub use scripts::fields::ConversionFlag;
pub use selector::Selector;
pub use timestamp::{local_wire_to_utc, parse_utc, utc_text_to_display, utc_to_local_wire};
