//! Parsed document representation
//!
//! [`MarkupDocument`] separates a document's own wrapper (doctype and
//! `html`/`head`/`body` attributes) from its content so that a bare
//! fragment round-trips as a bare fragment: serializing never invents a
//! wrapper the source did not have. Renderers that need a full page call
//! [`MarkupDocument::ensure_shell`] on their own copy.

use crate::node::{Attribute, Node};
use crate::{parser, serialize};

/// A document's own wrapper, present only when the source carried one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentShell {
    /// Raw doctype text (between `<!` and `>`), if any.
    pub doctype: Option<String>,
    /// Attributes of the `<html>` element.
    pub html_attributes: Vec<Attribute>,
    /// Attributes of the `<head>` element.
    pub head_attributes: Vec<Attribute>,
    /// Attributes of the `<body>` element.
    pub body_attributes: Vec<Attribute>,
}

impl DocumentShell {
    /// A plain `<!DOCTYPE html>` shell with no attributes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            doctype: Some("DOCTYPE html".to_string()),
            ..Self::default()
        }
    }
}

/// A parsed markup document: optional shell, head content, body content.
///
/// For fragments (no shell) all content lives in `body` and `head` is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupDocument {
    /// The document's own wrapper, when the source had one.
    pub shell: Option<DocumentShell>,
    /// Head content nodes.
    pub head: Vec<Node>,
    /// Body content nodes.
    pub body: Vec<Node>,
}

impl MarkupDocument {
    /// Parse arbitrary markup. Tolerant and total: malformed or partial
    /// input is repaired, never rejected.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        parser::parse_document(input)
    }

    /// Serialize back to markup. Fragments serialize as fragments; shell
    /// documents serialize with their doctype and wrapper attributes.
    #[must_use]
    pub fn to_html(&self) -> String {
        serialize::document_to_string(self)
    }

    /// Give the document a standard shell if it is a bare fragment, so
    /// head/body injection has somewhere to land. Used on render copies
    /// only; persisted markup keeps its original shape.
    pub fn ensure_shell(&mut self) {
        if self.shell.is_none() {
            self.shell = Some(DocumentShell::standard());
        }
    }

    /// Append a node to the head content.
    #[inline]
    pub fn append_head(&mut self, node: impl Into<Node>) {
        self.head.push(node.into());
    }

    /// Append a node to the body content.
    #[inline]
    pub fn append_body(&mut self, node: impl Into<Node>) {
        self.body.push(node.into());
    }

    /// Count elements in the body content, depth first.
    #[must_use]
    pub fn content_element_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .filter_map(Node::as_element)
                .map(|el| 1 + count(&el.children))
                .sum()
        }
        count(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fragment_round_trips_without_wrapper() {
        let doc = MarkupDocument::parse("<div><span>A</span></div>");
        assert_eq!(doc.to_html(), "<div><span>A</span></div>");
    }

    #[test]
    fn shell_round_trips_with_wrapper() {
        let src = "<!DOCTYPE html><html><head></head><body><p>x</p></body></html>";
        let doc = MarkupDocument::parse(src);
        assert_eq!(doc.to_html(), src);
    }

    #[test]
    fn ensure_shell_wraps_fragments_only_once() {
        let mut doc = MarkupDocument::parse("<p>x</p>");
        doc.ensure_shell();
        assert_eq!(
            doc.to_html(),
            "<!DOCTYPE html><html><head></head><body><p>x</p></body></html>"
        );

        let mut shelled =
            MarkupDocument::parse("<html lang=\"fr\"><head></head><body></body></html>");
        shelled.ensure_shell();
        assert_eq!(
            shelled.shell.as_ref().unwrap().html_attributes[0]
                .value
                .as_deref(),
            Some("fr")
        );
    }

    #[test]
    fn content_element_count_is_recursive() {
        let doc = MarkupDocument::parse("<div><span>A</span><ul><li>1</li><li>2</li></ul></div>");
        assert_eq!(doc.content_element_count(), 5);
    }

    #[test]
    fn empty_input_is_an_empty_fragment() {
        let doc = MarkupDocument::parse("");
        assert!(doc.shell.is_none());
        assert!(doc.body.is_empty());
        assert_eq!(doc.to_html(), "");
    }
}
