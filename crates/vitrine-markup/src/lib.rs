//! Vitrine Markup
//!
//! Tolerant HTML document model for model-generated component markup.
//!
//! # Core Concepts
//!
//! - [`MarkupDocument`]: parsed document, optional shell plus head/body content
//! - [`Node`] / [`Element`]: the owned tree, attribute order and raw text preserved
//! - [`annotate_elements`]: deterministic pre-order numbering of body elements
//! - [`parse_fragment`]: strict single-element entry point for replacement fragments
//!
//! Parsing is total: malformed or partial markup is repaired (unclosed
//! tags, stray end tags, raw `<script>` bodies, unquoted attributes),
//! never rejected. Serialization inverts the parse, so a bare fragment
//! round-trips as a bare fragment.
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_markup::MarkupDocument;
//!
//! let mut doc = MarkupDocument::parse("<div><span>A</span>");
//! assert_eq!(doc.to_html(), "<div><span>A</span></div>");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod annotate;
mod document;
mod error;
mod node;
mod parser;
mod scanner;
mod serialize;

// Re-exports
pub use annotate::{annotate_elements, find_annotated, replace_annotated, strip_attribute};
pub use document::{DocumentShell, MarkupDocument};
pub use error::FragmentError;
pub use node::{is_rawtext, is_void, Attribute, Element, Node, RAWTEXT_ELEMENTS, VOID_ELEMENTS};
pub use parser::{parse_document, parse_fragment};
pub use serialize::{document_to_string, element_to_string, forest_to_string, node_to_string};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn annotate_replace_strip_pipeline() {
        // the full instrument-edit-sanitize cycle over one document
        let mut doc = MarkupDocument::parse("<div><span>A</span></div>");
        let snapshots = annotate_elements(&mut doc, "data-id");
        assert_eq!(snapshots.len(), 2);

        let replacement = parse_fragment("<span>B</span>").unwrap();
        assert!(replace_annotated(&mut doc, "data-id", "1", replacement));
        strip_attribute(&mut doc, "data-id");

        assert_eq!(doc.to_html(), "<div><span>B</span></div>");
    }

    #[test]
    fn hostile_input_never_panics() {
        for input in [
            "",
            "<",
            "<<<>>>",
            "</div>",
            "<div",
            "<div class=",
            "<script>const a = '<div>'",
            "<!DOCTYPE html><html><body><p>x",
            "a < b > c",
            "<!-- unterminated",
        ] {
            let doc = MarkupDocument::parse(input);
            let _ = doc.to_html();
        }
    }
}
