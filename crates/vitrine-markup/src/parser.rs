//! Repairing tree builder
//!
//! Assembles scanner tokens into a [`MarkupDocument`], repairing the usual
//! damage instead of rejecting it:
//!
//! - void elements (`<br>`, `<img>`, ...) never take children
//! - an end tag closes up to its nearest matching open ancestor
//! - an end tag with no open ancestor is dropped
//! - everything still open at end of input is closed
//!
//! A top-level `<html>` element (with optional doctype and surrounding
//! whitespace or comments) is recognized as a document shell; any other
//! input parses as a bare fragment and serializes back as one.

use tracing::debug;

use crate::document::{DocumentShell, MarkupDocument};
use crate::error::FragmentError;
use crate::node::{is_void, Element, Node};
use crate::scanner::{Scanner, Token};

/// Parse arbitrary markup into a document. Never fails.
#[must_use]
pub fn parse_document(input: &str) -> MarkupDocument {
    let forest = build_forest(input);
    let doc = split_shell(forest);
    debug!(
        shell = doc.shell.is_some(),
        head = doc.head.len(),
        body = doc.body.len(),
        "parsed markup"
    );
    doc
}

/// Parse text expected to hold exactly one element, such as a replacement
/// fragment returned by a model. Whitespace, comments, and stray prose
/// around a single element are tolerated; anything else is an error.
pub fn parse_fragment(input: &str) -> Result<Element, FragmentError> {
    let doc = parse_document(input);
    if doc.shell.is_some() {
        return Err(FragmentError::NotAnElement);
    }

    let mut elements = Vec::new();
    let mut saw_text = false;
    for node in doc.body {
        match node {
            Node::Element(el) => elements.push(el),
            Node::Text(t) if !t.trim().is_empty() => saw_text = true,
            _ => {}
        }
    }

    match (elements.len(), saw_text) {
        (0, false) => Err(FragmentError::Empty),
        (0, true) => Err(FragmentError::NotAnElement),
        (1, _) => Ok(elements.remove(0)),
        (count, _) => Err(FragmentError::MultipleRoots { count }),
    }
}

/// Tokenize and build the raw top-level node list.
fn build_forest(input: &str) -> Vec<Node> {
    let mut scanner = Scanner::new(input);
    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    while let Some(token) = scanner.next_token() {
        match token {
            Token::Text(t) => append(&mut roots, &mut stack, Node::Text(t)),
            Token::Comment(c) => append(&mut roots, &mut stack, Node::Comment(c)),
            Token::Doctype(d) => append(&mut roots, &mut stack, Node::Doctype(d)),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let mut el = Element::new(name);
                el.attributes = attributes;
                el.self_closing = self_closing;
                if self_closing || is_void(&el.tag) {
                    append(&mut roots, &mut stack, Node::Element(el));
                } else {
                    stack.push(el);
                }
            }
            Token::EndTag { name } => {
                if let Some(open_idx) = stack.iter().rposition(|e| e.tag == name) {
                    while stack.len() > open_idx {
                        close_top(&mut roots, &mut stack);
                    }
                }
                // end tags with no matching ancestor are dropped
            }
        }
    }

    // close everything left open at end of input
    while !stack.is_empty() {
        close_top(&mut roots, &mut stack);
    }
    roots
}

fn append(roots: &mut Vec<Node>, stack: &mut [Element], node: Node) {
    match stack.last_mut() {
        Some(top) => top.children.push(node),
        None => roots.push(node),
    }
}

fn close_top(roots: &mut Vec<Node>, stack: &mut Vec<Element>) {
    if let Some(el) = stack.pop() {
        append(roots, stack, Node::Element(el));
    }
}

/// Detect a document shell in the top-level node list.
///
/// Shell form requires exactly one top-level element, tagged `html`, with
/// nothing else around it but an optional doctype, comments, and blank
/// text. Everything else is a fragment.
fn split_shell(forest: Vec<Node>) -> MarkupDocument {
    let mut html_count = 0usize;
    let mut eligible = true;
    for node in &forest {
        match node {
            Node::Element(el) if el.tag == "html" => html_count += 1,
            Node::Element(_) => eligible = false,
            Node::Text(t) if !t.trim().is_empty() => eligible = false,
            Node::Doctype(_) | Node::Comment(_) | Node::Text(_) => {}
        }
    }
    if !eligible || html_count != 1 {
        return MarkupDocument {
            shell: None,
            head: Vec::new(),
            body: forest,
        };
    }

    let mut doctype = None;
    let mut shell = DocumentShell::default();
    let mut head = Vec::new();
    let mut body = Vec::new();
    for node in forest {
        match node {
            Node::Doctype(d) => doctype = Some(d),
            Node::Element(html_el) => {
                shell.html_attributes = html_el.attributes;
                for child in html_el.children {
                    match child {
                        Node::Element(el) if el.tag == "head" => {
                            shell.head_attributes = el.attributes;
                            head.extend(el.children);
                        }
                        Node::Element(el) if el.tag == "body" => {
                            shell.body_attributes = el.attributes;
                            body.extend(el.children);
                        }
                        Node::Text(t) if t.trim().is_empty() => {}
                        // stray children of <html> belong to the body
                        other => body.push(other),
                    }
                }
            }
            _ => {}
        }
    }
    shell.doctype = doctype;

    MarkupDocument {
        shell: Some(shell),
        head,
        body,
    }
}
