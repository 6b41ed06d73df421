//! Element annotation
//!
//! Pre-order numbering of body content elements with a caller-named
//! attribute, plus the inverse operations: stripping the attribute
//! everywhere, and locating or replacing the element bearing a given
//! value. Numbering is dense from 0 and deterministic for a given body,
//! so re-annotating an unchanged document reproduces the same assignment.

use tracing::debug;

use crate::document::MarkupDocument;
use crate::node::{Element, Node};
use crate::serialize;

/// Number every body content element pre-order, writing `attr="0"`,
/// `attr="1"`, ... onto each. Returns `(number, outer_html)` pairs in
/// assignment order, where the outer HTML is snapshotted at assignment
/// time: it carries the element's own number but none of its descendants'
/// (they are numbered later in the walk).
pub fn annotate_elements(doc: &mut MarkupDocument, attr: &str) -> Vec<(u32, String)> {
    let mut snapshots = Vec::new();
    let mut counter: u32 = 0;
    annotate_nodes(&mut doc.body, attr, &mut counter, &mut snapshots);
    debug!(attr, count = snapshots.len(), "annotated content elements");
    snapshots
}

fn annotate_nodes(
    nodes: &mut [Node],
    attr: &str,
    counter: &mut u32,
    snapshots: &mut Vec<(u32, String)>,
) {
    for node in nodes {
        if let Node::Element(el) = node {
            let number = *counter;
            *counter += 1;
            el.set_attr(attr, number.to_string());
            snapshots.push((number, serialize::element_to_string(el)));
            annotate_nodes(&mut el.children, attr, counter, snapshots);
        }
    }
}

/// Remove every occurrence of `attr` from the whole tree, head included.
/// Returns how many attributes were removed.
pub fn strip_attribute(doc: &mut MarkupDocument, attr: &str) -> usize {
    let mut removed = 0;
    strip_nodes(&mut doc.head, attr, &mut removed);
    strip_nodes(&mut doc.body, attr, &mut removed);
    if removed > 0 {
        debug!(attr, removed, "stripped attribute");
    }
    removed
}

fn strip_nodes(nodes: &mut [Node], attr: &str, removed: &mut usize) {
    for node in nodes {
        if let Node::Element(el) = node {
            *removed += el.remove_attr(attr);
            strip_nodes(&mut el.children, attr, removed);
        }
    }
}

/// Find the body content element whose `attr` equals `value`.
#[must_use]
pub fn find_annotated<'a>(
    doc: &'a MarkupDocument,
    attr: &str,
    value: &str,
) -> Option<&'a Element> {
    find_in(&doc.body, attr, value)
}

fn find_in<'a>(nodes: &'a [Node], attr: &str, value: &str) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.attr(attr) == Some(value) {
                return Some(el);
            }
            if let Some(found) = find_in(&el.children, attr, value) {
                return Some(found);
            }
        }
    }
    None
}

/// Replace the body content element whose `attr` equals `value` with
/// `replacement`, in place, leaving siblings and order untouched.
/// Returns false when no element bears the value.
pub fn replace_annotated(
    doc: &mut MarkupDocument,
    attr: &str,
    value: &str,
    replacement: Element,
) -> bool {
    let mut slot = Some(replacement);
    replace_in(&mut doc.body, attr, value, &mut slot)
}

fn replace_in(
    nodes: &mut [Node],
    attr: &str,
    value: &str,
    slot: &mut Option<Element>,
) -> bool {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.attr(attr) == Some(value) {
                if let Some(replacement) = slot.take() {
                    *node = Node::Element(replacement);
                    return true;
                }
            } else if replace_in(&mut el.children, attr, value, slot) {
                return true;
            }
        }
    }
    false
}
