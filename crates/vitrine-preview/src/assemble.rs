//! Document assembly
//!
//! Turns a validated artifact into a renderable sandbox document plus the
//! identifier registry for that render. Assembly is a pure function of
//! its inputs and the only place identifiers are minted; it runs again in
//! full whenever the artifact or the instrumentation mode changes. The
//! artifact itself is never mutated; annotation happens on a parsed
//! copy, so persisted markup can never carry identifiers.

use tracing::info;

use vitrine_artifact::UiArtifact;
use vitrine_markup::{annotate_elements, Element, MarkupDocument};

use crate::inspector::INSPECTOR_SCRIPT;
use crate::registry::{ElementId, ElementRecord, FragmentRegistry, ELEMENT_ID_ATTR};

/// One assembled render: the serialized document and the registry whose
/// identifiers appear in it. Superseded wholesale by the next assembly.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    /// The complete sandbox document.
    pub document: String,
    /// Identifier-to-fragment registry for this document.
    pub registry: FragmentRegistry,
}

/// Assemble a renderable document from an artifact.
///
/// Steps, in order: parse the markup (tolerant, never rejects); number
/// every body content element pre-order with [`ELEMENT_ID_ATTR`],
/// snapshotting each element's pristine fragment into the registry as it
/// is numbered; reuse the artifact's own document shell or wrap the
/// fragment in a standard one; append external script and stylesheet
/// references to the head in array order; append the inline style block
/// to the head and the inline script block to the end of the body; and,
/// only when `instrumented`, append the inspector script after the
/// artifact's script so instrumentation never runs first.
#[must_use]
pub fn assemble(artifact: &UiArtifact, instrumented: bool) -> AssembledDocument {
    let mut doc = MarkupDocument::parse(&artifact.markup);

    let mut registry = FragmentRegistry::new();
    for (number, fragment) in annotate_elements(&mut doc, ELEMENT_ID_ATTR) {
        registry.insert(ElementRecord {
            id: ElementId::new(number),
            fragment,
        });
    }

    doc.ensure_shell();
    for url in &artifact.external_scripts {
        doc.append_head(Element::new("script").with_attr("src", url.as_str()));
    }
    for url in &artifact.external_styles {
        doc.append_head(
            Element::new("link")
                .with_attr("rel", "stylesheet")
                .with_attr("href", url.as_str()),
        );
    }
    doc.append_head(Element::new("style").with_text(artifact.styles.as_str()));
    doc.append_body(Element::new("script").with_text(artifact.script.as_str()));
    if instrumented {
        doc.append_body(Element::new("script").with_text(INSPECTOR_SCRIPT.as_str()));
    }

    let document = doc.to_html();
    info!(
        elements = registry.len(),
        instrumented,
        document_bytes = document.len(),
        "assembled document"
    );
    AssembledDocument { document, registry }
}
