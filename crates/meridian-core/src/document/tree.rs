//! JSON tree form of a document.
//!
//! ```json
//! {
//!   "children": [
//!     { "tag": "span", "attrs": { "class": "js_convert_utc_to_local" },
//!       "children": [ { "text": "2025-01-05T20:07:00" } ] }
//!   ]
//! }
//! ```
//!
//! Conversions in both directions walk the tree with explicit stacks.
//! Export stops at [`MAX_TREE_DEPTH`] nested elements, the deepest tree
//! `serde_json` reads back under its default recursion limit.

use std::collections::BTreeMap;

use ego_tree::iter::Edge;
use scraper::Node;
use serde::{Deserialize, Serialize};

use super::{Document, NodeId};
use crate::error::{MeridianError, Result};

/// Deepest element nesting the tree form carries.
pub const MAX_TREE_DEPTH: usize = 60;

/// Serializable snapshot of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTree {
    #[serde(default)]
    pub children: Vec<NodeTree>,
}

/// Serializable snapshot of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeTree {
    Text {
        text: String,
    },
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attrs: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeTree>,
    },
}

/// An element whose children are still being collected.
struct OpenElement {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<NodeTree>,
}

fn push_child(open: &mut [OpenElement], top: &mut Vec<NodeTree>, child: NodeTree) {
    match open.last_mut() {
        Some(parent) => parent.children.push(child),
        None => top.push(child),
    }
}

impl Document {
    /// Builds a document from its tree form.
    pub fn from_tree(tree: &DocumentTree) -> Self {
        let mut doc = Document::new();
        let root = doc.root();
        let mut pending: Vec<(NodeId, &NodeTree)> =
            tree.children.iter().rev().map(|child| (root, child)).collect();

        while let Some((parent, node)) = pending.pop() {
            match node {
                NodeTree::Text { text } => {
                    doc.append_text(parent, text.as_str());
                }
                NodeTree::Element {
                    tag,
                    attrs,
                    children,
                } => {
                    let attrs: Vec<(&str, &str)> =
                        attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
                    let id = doc.append_element(parent, tag, &attrs);
                    pending.extend(children.iter().rev().map(|child| (id, child)));
                }
            }
        }
        doc
    }

    /// Snapshots the document into its tree form.
    ///
    /// Doctypes and comments are dropped. Fails with
    /// [`MeridianError::InvalidInput`] when elements nest deeper than
    /// [`MAX_TREE_DEPTH`].
    pub fn to_tree(&self) -> Result<DocumentTree> {
        let mut top = Vec::new();
        let mut open: Vec<OpenElement> = Vec::new();

        for edge in self.html.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(element) => {
                        if open.len() == MAX_TREE_DEPTH {
                            return Err(MeridianError::invalid_input("document").with_reason(
                                format!("elements nest deeper than {MAX_TREE_DEPTH} levels"),
                            ));
                        }
                        open.push(OpenElement {
                            tag: element.name().to_string(),
                            attrs: element
                                .attrs()
                                .map(|(k, v)| (k.to_string(), v.to_string()))
                                .collect(),
                            children: Vec::new(),
                        });
                    }
                    Node::Text(text) => {
                        let text = NodeTree::Text {
                            text: text.text.to_string(),
                        };
                        push_child(&mut open, &mut top, text);
                    }
                    _ => {}
                },
                Edge::Close(node) => {
                    if !node.value().is_element() {
                        continue;
                    }
                    if let Some(OpenElement {
                        tag,
                        attrs,
                        children,
                    }) = open.pop()
                    {
                        let element = NodeTree::Element {
                            tag,
                            attrs,
                            children,
                        };
                        push_child(&mut open, &mut top, element);
                    }
                }
            }
        }
        Ok(DocumentTree { children: top })
    }

    /// Parses the JSON tree form.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree: DocumentTree = serde_json::from_str(json)?;
        Ok(Self::from_tree(&tree))
    }

    /// Renders the JSON tree form, pretty-printed.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_tree()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_builds_tree() {
        let doc = Document::from_json(
            r#"{"children": [
                {"tag": "form", "children": [
                    {"tag": "input", "attrs": {"type": "hidden", "value": "false"}},
                    {"text": "Start"}
                ]}
            ]}"#,
        )
        .unwrap();

        let inputs = doc.query("form > input[type=hidden]").unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(doc.attr(inputs[0], "value"), Some("false"));
        assert_eq!(doc.text_content(doc.root()), "Start");
    }

    #[test]
    fn test_to_tree_skips_empty_collections() {
        let mut doc = Document::new();
        let span = doc.append_element(doc.root(), "span", &[]);
        doc.append_text(span, "x");

        let json = doc.to_json_pretty().unwrap();
        assert!(!json.contains("attrs"));
        assert_eq!(
            Document::from_json(&json).unwrap().to_tree().unwrap(),
            doc.to_tree().unwrap()
        );
    }

    #[test]
    fn test_to_tree_keeps_sibling_order_and_skips_doctype() {
        let doc = Document::parse_html("<!DOCTYPE html><p>a<b>b</b>c</p><!-- note --><i>d</i>");
        let tree = doc.to_tree().unwrap();

        let [NodeTree::Element { tag, children, .. }] = tree.children.as_slice() else {
            panic!("expected a single html root, got {tree:?}");
        };
        assert_eq!(tag, "html");
        let body = &children[1];
        let NodeTree::Element { tag, children, .. } = body else {
            panic!("expected body, got {body:?}");
        };
        assert_eq!(tag, "body");
        let tags: Vec<&str> = children
            .iter()
            .filter_map(|child| match child {
                NodeTree::Element { tag, .. } => Some(tag.as_str()),
                NodeTree::Text { .. } => None,
            })
            .collect();
        assert_eq!(tags, ["p", "i"]);
        assert_eq!(
            Document::from_tree(&tree).to_html(),
            "<html><head></head><body><p>a<b>b</b>c</p><i>d</i></body></html>"
        );
    }

    #[test]
    fn test_to_tree_rejects_documents_too_deep_for_json() {
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..MAX_TREE_DEPTH {
            parent = doc.append_element(parent, "div", &[]);
        }
        doc.append_text(parent, "deepest");
        let json = doc.to_json_pretty().unwrap();
        assert_eq!(Document::from_json(&json).unwrap().text_content(doc.root()), "deepest");

        doc.append_element(parent, "span", &[]);
        let err = doc.to_json_pretty().unwrap_err();
        assert!(matches!(err, MeridianError::InvalidInput { .. }));
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = Document::from_json("{\"children\": 3}").unwrap_err();
        assert!(matches!(err, MeridianError::Serialization { .. }));
    }
}
