// SPDX-License-Identifier: PMPL-1.0-or-later
//! Mutable markup tree shared by the fixers.
//!
//! Markup is parsed with `scraper` (html5ever) and copied into an
//! `ego_tree` arena of owned [`Node`] values. Unlike the read-only tree
//! `scraper` hands out, this one can have attributes rewritten and nodes
//! inserted in place, and it serializes back to HTML text.
//!
//! The model never normalizes whitespace or case on its own. Names are
//! kept exactly as the HTML parser produced them: lower-case for HTML,
//! camel-case where SVG needs it (`foreignObject`, `viewBox`), and
//! prefixed for foreign attributes (`xlink:href`).

mod parse;
mod serialize;

use ego_tree::Tree;
use indexmap::IndexMap;

pub use ego_tree::NodeId;

/// A node in the markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The document root
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// An element with attributes and children
    Element(Element),
    /// Character data
    Text(String),
    /// `<!-- comment -->`
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Namespace an element lives in. Everything outside inline SVG and
/// MathML is HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub fn url(self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }

    /// Unknown namespaces fall back to HTML
    pub fn from_url(url: &str) -> Self {
        [Namespace::Svg, Namespace::MathMl]
            .into_iter()
            .find(|ns| ns.url() == url)
            .unwrap_or(Namespace::Html)
    }
}

/// An element: namespace, tag name plus ordered, unique attributes.
///
/// Boolean attributes such as `required` are present with an empty value.
/// Attribute keys carry their prefix, e.g. `xlink:href`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Namespace,
    name: String,
    attrs: IndexMap<String, String>,
}

impl Element {
    /// An HTML element
    pub fn new(name: &str) -> Self {
        Self::in_namespace(Namespace::Html, name)
    }

    pub fn in_namespace(namespace: Namespace, name: &str) -> Self {
        Self {
            namespace,
            name: name.to_string(),
            attrs: IndexMap::new(),
        }
    }

    /// Builder form of [`Element::set_attr`]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Case-insensitive tag comparison
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Overwrite or add an attribute. An existing attribute keeps its position.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed markup document owning its node tree
#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only the root node
    pub fn new() -> Self {
        Self {
            tree: Tree::new(Node::Document),
        }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id).map(|node| node.value())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.node(id).and_then(Node::as_element)
    }

    /// All elements matching `predicate`, in document order
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<NodeId>
    where
        P: FnMut(&Element) -> bool,
    {
        self.tree
            .root()
            .descendants()
            .filter(|node| match node.value() {
                Node::Element(element) => predicate(element),
                _ => false,
            })
            .map(|node| node.id())
            .collect()
    }

    /// All elements with the given tag name (case-insensitive)
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find_all(|element| element.is(tag))
    }

    /// All elements carrying the attribute, whatever its value
    pub fn find_with_attr(&self, name: &str) -> Vec<NodeId> {
        self.find_all(|element| element.has_attr(name))
    }

    /// First element whose `id` attribute equals `value`
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        self.find_all(|element| element.attr("id") == Some(value))
            .into_iter()
            .next()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attr(name))
    }

    /// Set an attribute on an element node. Returns `false` if `id` is not an element.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        match self.tree.get_mut(id) {
            Some(mut node) => match node.value() {
                Node::Element(element) => {
                    element.set_attr(name, value);
                    true
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Insert `node` as the previous sibling of `id`.
    ///
    /// Returns `None` when `id` has no parent (the root cannot have siblings).
    pub fn insert_before(&mut self, id: NodeId, node: Node) -> Option<NodeId> {
        self.parent(id)?;
        let mut target = self.tree.get_mut(id)?;
        Some(target.insert_before(node).id())
    }

    /// Insert `node` as the next sibling of `id`.
    pub fn insert_after(&mut self, id: NodeId, node: Node) -> Option<NodeId> {
        self.parent(id)?;
        let mut target = self.tree.get_mut(id)?;
        Some(target.insert_after(node).id())
    }

    /// Append `node` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        let mut target = self.tree.get_mut(parent)?;
        Some(target.append(node).id())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.get(id)?.parent().map(|parent| parent.id())
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.ancestors())
            .map(|node| node.id())
    }

    /// The node itself followed by everything below it, in document order
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .get(id)
            .into_iter()
            .flat_map(|node| node.descendants())
            .map(|node| node.id())
    }

    /// Nearest preceding element sibling, looking past comments and
    /// whitespace-only text. Any other text in between breaks adjacency.
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        for sibling in self.tree.get(id)?.prev_siblings() {
            match sibling.value() {
                Node::Element(_) => return Some(sibling.id()),
                Node::Comment(_) => continue,
                Node::Text(text) if text.trim().is_empty() => continue,
                _ => return None,
            }
        }
        None
    }

    /// Concatenated text of every descendant text node, untrimmed
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|node| self.node(node).and_then(Node::as_text))
            .collect()
    }
}
