//! HTML import and export.
//!
//! Both directions are html5ever's: parsing applies the usual browser error
//! recovery (missing `<html>`, `<head>` and `<body>` are synthesized, stray
//! markup is repaired) and serialization follows the HTML fragment
//! serialization rules, so void elements, raw-text elements and escaping
//! come out the way a browser's `outerHTML` would write them.

use scraper::Html;

use super::{Document, NodeId};

impl Document {
    /// Parses an HTML page into a document.
    pub fn parse_html(source: &str) -> Self {
        Self::from_html(Html::parse_document(source))
    }

    /// Serializes the document back to HTML.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Serializes one element and its subtree; `None` for anything else.
    pub fn outer_html(&self, node: NodeId) -> Option<String> {
        self.element_ref(node).map(|element| element.html())
    }
}
