//! Document tree types
//!
//! A small owned tree for HTML-ish markup. Attribute order and raw value
//! text are preserved exactly as scanned; entities are never decoded, so a
//! parse/serialize round trip does not rewrite untouched content.

use std::fmt::{self, Display, Formatter};

/// Elements that never take children and have no end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is scanned as raw text (no nested markup).
pub const RAWTEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Returns true for tags that never take children (`<br>`, `<img>`, ...).
#[inline]
#[must_use]
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Returns true for tags whose body is raw text (`<script>`, `<style>`).
#[inline]
#[must_use]
pub fn is_rawtext(tag: &str) -> bool {
    RAWTEXT_ELEMENTS.contains(&tag)
}

/// A single attribute as it appeared in source.
///
/// `value: None` is a bare attribute (`disabled`); the value string is the
/// raw source text between the quotes, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Lowercased attribute name.
    pub name: String,
    /// Raw value text, `None` for bare attributes.
    pub value: Option<String>,
}

impl Attribute {
    /// Create a named attribute with a value.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a bare (valueless) attribute.
    #[inline]
    #[must_use]
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// One element node: tag, attributes in source order, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// Attributes in source order; first occurrence wins on lookup.
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order. Always empty for void elements.
    pub children: Vec<Node>,
    /// Whether the source used `/>`. Kept so untouched elements
    /// serialize back to their original form.
    pub self_closing: bool,
}

impl Element {
    /// Create an empty element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            self_closing: false,
        }
    }

    /// Look up an attribute value by name. Bare attributes yield `""`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// True when the element carries the named attribute.
    #[inline]
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Set an attribute, replacing the first existing occurrence.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = Some(value.into()),
            None => self.attributes.push(Attribute::new(name, value)),
        }
    }

    /// Remove every occurrence of the named attribute. Returns how many
    /// were removed.
    pub fn remove_attr(&mut self, name: &str) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|a| a.name != name);
        before - self.attributes.len()
    }

    /// Append a child node.
    #[inline]
    pub fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style raw text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Iterate child elements only, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with tag, attributes, and children.
    Element(Element),
    /// Raw text, undecoded.
    Text(String),
    /// Comment body (text between `<!--` and `-->`).
    Comment(String),
    /// Doctype-like declaration: the raw text between `<!` and `>`.
    Doctype(String),
}

impl Node {
    /// The contained element, if this node is one.
    #[inline]
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable access to the contained element, if this node is one.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// True for text nodes that are empty or whitespace only.
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serialize::node_to_string(self))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}
