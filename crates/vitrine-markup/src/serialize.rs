//! Tree serialization
//!
//! Inverts the parse as closely as possible: text and attribute values are
//! written verbatim (no entity encoding), attribute order is preserved,
//! and quote style is chosen per value. Untouched subtrees therefore
//! serialize identically run over run.

use crate::document::MarkupDocument;
use crate::node::{is_void, Attribute, Element, Node};

/// Serialize a single node to markup.
#[must_use]
pub fn node_to_string(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

/// Serialize a single element (outer HTML).
#[must_use]
pub fn element_to_string(el: &Element) -> String {
    let mut out = String::new();
    write_element(&mut out, el);
    out
}

/// Serialize a node list in order.
#[must_use]
pub fn forest_to_string(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

/// Serialize a whole document: fragments as fragments, shell documents
/// with their doctype and wrapper.
#[must_use]
pub fn document_to_string(doc: &MarkupDocument) -> String {
    let Some(shell) = &doc.shell else {
        return forest_to_string(&doc.body);
    };

    let mut out = String::new();
    if let Some(d) = &shell.doctype {
        out.push_str("<!");
        out.push_str(d);
        out.push('>');
    }
    write_open_tag(&mut out, "html", &shell.html_attributes);
    write_open_tag(&mut out, "head", &shell.head_attributes);
    for node in &doc.head {
        write_node(&mut out, node);
    }
    out.push_str("</head>");
    write_open_tag(&mut out, "body", &shell.body_attributes);
    for node in &doc.body {
        write_node(&mut out, node);
    }
    out.push_str("</body></html>");
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Element(el) => write_element(out, el),
        Node::Text(t) => out.push_str(t),
        Node::Comment(c) => {
            out.push_str("<!--");
            out.push_str(c);
            out.push_str("-->");
        }
        Node::Doctype(d) => {
            out.push_str("<!");
            out.push_str(d);
            out.push('>');
        }
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    for attr in &el.attributes {
        out.push(' ');
        write_attribute(out, attr);
    }
    if el.self_closing && el.children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if is_void(&el.tag) {
        return;
    }
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_open_tag(out: &mut String, tag: &str, attributes: &[Attribute]) {
    out.push('<');
    out.push_str(tag);
    for attr in attributes {
        out.push(' ');
        write_attribute(out, attr);
    }
    out.push('>');
}

fn write_attribute(out: &mut String, attr: &Attribute) {
    out.push_str(&attr.name);
    let Some(value) = &attr.value else {
        return;
    };
    out.push('=');
    if !value.contains('"') {
        out.push('"');
        out.push_str(value);
        out.push('"');
    } else if !value.contains('\'') {
        out.push('\'');
        out.push_str(value);
        out.push('\'');
    } else {
        out.push('"');
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MarkupDocument;
    use pretty_assertions::assert_eq;

    fn round_trip(src: &str) -> String {
        MarkupDocument::parse(src).to_html()
    }

    #[test]
    fn plain_round_trips() {
        for src in [
            "<button>Hi</button>",
            "<div><span>A</span></div>",
            "<div class=\"card\" id=\"main\"><p>text &amp; more</p></div>",
            "<ul><li>1</li><li>2</li></ul>",
        ] {
            assert_eq!(round_trip(src), src);
        }
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        assert_eq!(round_trip("<div><br><img src=\"x.png\"></div>"), "<div><br><img src=\"x.png\"></div>");
    }

    #[test]
    fn self_closing_form_is_kept() {
        assert_eq!(
            round_trip("<svg><path d=\"M0 0\"/></svg>"),
            "<svg><path d=\"M0 0\"/></svg>"
        );
    }

    #[test]
    fn script_body_survives_verbatim() {
        let src = "<script>if (a<b && c>d) { go(); }</script>";
        assert_eq!(round_trip(src), src);
    }

    #[test]
    fn text_entities_are_not_rewritten() {
        let src = "<p>a &amp; b &nbsp; c</p>";
        assert_eq!(round_trip(src), src);
    }

    #[test]
    fn repaired_markup_serializes_closed() {
        assert_eq!(round_trip("<div><span>A"), "<div><span>A</span></div>");
    }

    #[test]
    fn single_quoted_value_normalizes_to_double() {
        assert_eq!(round_trip("<div class='a'>x</div>"), "<div class=\"a\">x</div>");
    }

    #[test]
    fn quote_style_switches_when_value_has_quotes() {
        let mut el = Element::new("div");
        el.set_attr("data-note", "say \"hi\"");
        assert_eq!(element_to_string(&el), "<div data-note='say \"hi\"'></div>");

        let mut both = Element::new("div");
        both.set_attr("data-note", "a\"b'c");
        assert_eq!(element_to_string(&both), "<div data-note=\"a&quot;b'c\"></div>");
    }

    #[test]
    fn bare_attribute_writes_name_only() {
        assert_eq!(round_trip("<input disabled>"), "<input disabled>");
    }

    #[test]
    fn comments_round_trip() {
        let src = "<div><!-- keep me --><span>x</span></div>";
        assert_eq!(round_trip(src), src);
    }
}
