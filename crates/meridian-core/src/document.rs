//! In-memory document model the page scripts operate on.
//!
//! A [`Document`] wraps a `scraper` HTML tree, so parsing, selector matching
//! and serialization behave the way html5ever and Servo's `selectors` engine
//! do. Node handles ([`NodeId`]) stay usable after removal, but a removed
//! node is detached: it no longer shows up in traversals, selections or
//! output, and [`Document::contains`] reports `false` for it.
//!
//! The document keeps a structural version counter that changes whenever
//! nodes are added or removed. Attribute edits do not change it, which lets
//! callers cache element sets (see [`crate::scripts::groups::RequiredInputCache`]) and
//! rebuild them only when the tree shape changes.

pub mod html;
pub mod tree;

use html5ever::{namespace_url, ns, tendril::StrTendril, Attribute, LocalName, QualName};
use scraper::{
    node::{Element, Text},
    ElementRef, Html, Node,
};

use crate::{
    error::Result,
    selector::Selector,
};

/// Handle to a node inside a [`Document`].
pub use ego_tree::NodeId;

fn attr_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name.to_ascii_lowercase()))
}

/// Attribute list with lowercase names; a repeated name keeps its last value.
fn attribute_list(attrs: &[(&str, &str)]) -> Vec<Attribute> {
    let mut list: Vec<Attribute> = Vec::with_capacity(attrs.len());
    for (key, value) in attrs {
        let name = attr_name(key);
        let value = StrTendril::from(*value);
        match list.iter().position(|a| a.name == name) {
            Some(i) => list[i].value = value,
            None => list.push(Attribute { name, value }),
        }
    }
    list
}

/// A mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    structure_version: u64,
}

impl Document {
    /// Creates an empty document holding only the root node.
    pub fn new() -> Self {
        Self::from_html(Html::new_document())
    }

    fn from_html(html: Html) -> Self {
        Self {
            html,
            structure_version: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.html.tree.root().id()
    }

    /// Counter bumped by every structural change (insertions and removals).
    pub fn structure_version(&self) -> u64 {
        self.structure_version
    }

    /// Whether the handle refers to a node still attached to this document.
    pub fn contains(&self, node: NodeId) -> bool {
        let root = self.root();
        self.html
            .tree
            .get(node)
            .is_some_and(|n| n.id() == root || n.ancestors().any(|a| a.id() == root))
    }

    fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = match self.html.tree.get_mut(parent) {
            Some(mut parent) => parent.append(node).id(),
            None => self.html.tree.orphan(node).id(),
        };
        self.structure_version += 1;
        id
    }

    /// Appends a new element with the given attributes under `parent`.
    ///
    /// A stale `parent` leaves the new element detached and unreachable.
    pub fn append_element(&mut self, parent: NodeId, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(name.to_ascii_lowercase()));
        let element = Element::new(name, attribute_list(attrs));
        self.append(parent, Node::Element(element))
    }

    /// Appends a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let text = Text {
            text: StrTendril::from(text.into()),
        };
        self.append(parent, Node::Text(text))
    }

    /// Detaches a node and its subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root() || !self.contains(node) {
            return false;
        }
        if let Some(mut node) = self.html.tree.get_mut(node) {
            node.detach();
        }
        self.structure_version += 1;
        true
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.html.tree.get(node)?.value().as_element()
    }

    pub(crate) fn element_ref(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    /// Rewrites an element's attribute list.
    ///
    /// The element is rebuilt so scraper's cached id and class sets follow
    /// the new attributes.
    fn edit_attrs<R>(
        &mut self,
        node: NodeId,
        edit: impl FnOnce(&mut Vec<Attribute>) -> R,
    ) -> Option<R> {
        let mut node = self.html.tree.get_mut(node)?;
        let Node::Element(element) = node.value() else {
            return None;
        };
        let mut attrs: Vec<Attribute> = element
            .attrs
            .iter()
            .map(|(name, value)| Attribute {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();
        let result = edit(&mut attrs);
        *element = Element::new(element.name.clone(), attrs);
        Some(result)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.html.tree.get(node)?.parent().map(|p| p.id())
    }

    /// The parent if it is an element (the root is not one).
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|p| self.element(*p).is_some())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|n| n.children().map(|c| c.id()).collect())
            .unwrap_or_default()
    }

    /// All nodes below `node` in document (pre-)order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.html
            .tree
            .get(node)
            .map(|n| n.descendants().skip(1).map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    /// Whether `ancestor` is a proper ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.html
            .tree
            .get(node)
            .is_some_and(|n| n.ancestors().any(|a| a.id() == ancestor))
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(&name.to_ascii_lowercase())
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Sets an attribute, replacing an existing value; no-op on non-elements.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let name = attr_name(name);
        let value = StrTendril::from(value.into());
        self.edit_attrs(node, |attrs| match attrs.iter().position(|a| a.name == name) {
            Some(i) => attrs[i].value = value,
            None => attrs.push(Attribute { name, value }),
        });
    }

    /// Removes an attribute, returning whether it was present.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        if !self.has_attr(node, name) {
            return false;
        }
        let name = attr_name(name);
        self.edit_attrs(node, |attrs| attrs.retain(|a| a.name != name));
        true
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).any(|c| c == class)
    }

    fn classes(&self, node: NodeId) -> impl Iterator<Item = &str> {
        self.attr(node, "class").unwrap_or_default().split_whitespace()
    }

    /// Appends a class unless already present; no-op on non-elements.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.element(node).is_none() || self.has_class(node, class) {
            return;
        }
        let joined = match self.attr(node, "class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr(node, "class", joined);
    }

    /// Removes a class, returning whether it was present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        if !self.has_class(node, class) {
            return false;
        }
        let remaining = self
            .classes(node)
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node, "class", remaining);
        true
    }

    /// Concatenated text of every text node at or below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let Some(node) = self.html.tree.get(node) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|n| n.value().as_text().map(|t| &*t.text))
            .collect()
    }

    /// Replaces the children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: impl Into<String>) {
        let text = text.into();
        let Some(mut target) = self.html.tree.get_mut(node) else {
            return;
        };
        if let Node::Text(existing) = target.value() {
            existing.text = StrTendril::from(text);
            return;
        }

        for child in self.children(node) {
            if let Some(mut child) = self.html.tree.get_mut(child) {
                child.detach();
            }
        }
        self.structure_version += 1;
        if !text.is_empty() {
            self.append_text(node, text);
        }
    }

    /// Every element matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.select_within(self.root(), selector)
    }

    /// Elements below `scope` matching `selector`, in document order.
    pub fn select_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect()
    }

    /// First element matching `selector`, in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        let root = self.html.tree.root();
        root.descendants()
            .skip(1)
            .map(|n| n.id())
            .find(|node| selector.matches(self, *node))
    }

    /// Parses `selector` and selects from the root.
    pub fn query(&self, selector: &str) -> Result<Vec<NodeId>> {
        Ok(self.select(&Selector::parse(selector)?))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
