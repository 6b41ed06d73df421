//! Patch application
//!
//! Two ways a model reply becomes the next artifact. Whole mode runs the
//! reply through the same recovery and validation as generation and
//! replaces the artifact outright. Fragment mode splices a raw element
//! reply over the selected element: the identifier is read from the
//! selection snippet, the current markup is re-parsed and re-annotated
//! fresh (the same walk that numbered the preview, so identifiers line
//! up), the matching node is replaced in place, and every identifier
//! attribute is stripped before the markup is stored. On any error the
//! caller keeps the previous artifact.

use tracing::{debug, info};

use vitrine_artifact::{extract, validate, ExtractError, UiArtifact, ValidateError};
use vitrine_markup::{
    annotate_elements, parse_fragment, replace_annotated, strip_attribute, FragmentError,
    MarkupDocument,
};
use vitrine_preview::{ElementId, ELEMENT_ID_ATTR};

/// What a refinement aims at.
#[derive(Debug, Clone)]
pub enum RefineTarget {
    /// The entire component.
    Whole,
    /// One rendered element, captured at selection time.
    Fragment {
        /// Identifier the element bore in the preview.
        id: ElementId,
        /// The element's source fragment, identifier attribute included.
        snippet: String,
    },
}

/// A refinement instruction and its target.
#[derive(Debug, Clone)]
pub struct RefinementRequest {
    /// What the user asked for.
    pub instruction: String,
    /// What the instruction applies to.
    pub target: RefineTarget,
}

impl RefinementRequest {
    /// Refine the whole component.
    #[inline]
    #[must_use]
    pub fn whole(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            target: RefineTarget::Whole,
        }
    }

    /// Refine one selected element.
    #[inline]
    #[must_use]
    pub fn fragment(id: ElementId, snippet: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            target: RefineTarget::Fragment {
                id,
                snippet: snippet.into(),
            },
        }
    }
}

/// Errors from patch application.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// No element in the current markup bears the selection's identifier.
    /// The selection went stale or the document drifted under it.
    #[error("no element with identifier {id} in the current markup")]
    NotFound {
        /// The identifier that failed to match.
        id: ElementId,
    },

    /// The selection or the reply is not a usable single element.
    #[error("malformed fragment: {reason}")]
    MalformedFragment {
        /// What made it unusable.
        reason: String,
    },

    /// Whole-mode reply recovery failed.
    #[error("reply recovery failed: {0}")]
    Extract(#[from] ExtractError),

    /// The recovered replacement failed validation.
    #[error("replacement validation failed: {0}")]
    Validate(#[from] ValidateError),
}

impl PatchError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedFragment {
            reason: reason.into(),
        }
    }
}

impl From<FragmentError> for PatchError {
    fn from(err: FragmentError) -> Self {
        Self::MalformedFragment {
            reason: err.to_string(),
        }
    }
}

/// Whole mode: recover a complete replacement artifact from the reply.
///
/// The reply passes through the same extraction chain and validation as
/// a generation reply. Nothing is merged; the result stands alone.
///
/// # Errors
/// [`PatchError::Extract`] when no strategy recovers markup,
/// [`PatchError::Validate`] when the recovered artifact is not viable.
pub fn apply_whole(reply: &str) -> Result<UiArtifact, PatchError> {
    let artifact = validate(extract(reply)?)?;
    info!(
        markup_bytes = artifact.markup.len(),
        "whole-component patch recovered replacement"
    );
    Ok(artifact)
}

/// Fragment mode: splice a raw element reply over the selected element.
///
/// Only `markup` changes; styles, script, and external references are
/// carried over untouched. The returned artifact's markup contains no
/// identifier attributes.
///
/// # Errors
/// [`PatchError::MalformedFragment`] when the selection snippet or the
/// reply is not a single identifiable element;
/// [`PatchError::NotFound`] when the identifier no longer matches any
/// element in the current markup.
pub fn apply_fragment(
    artifact: &UiArtifact,
    selected_snippet: &str,
    reply: &str,
) -> Result<UiArtifact, PatchError> {
    let selection = parse_fragment(selected_snippet)?;
    let id_text = selection
        .attr(ELEMENT_ID_ATTR)
        .ok_or_else(|| PatchError::malformed("selection carries no element identifier"))?
        .to_string();
    let id: ElementId = id_text
        .parse()
        .map_err(|_| PatchError::malformed("selection identifier is not a number"))?;

    let cleaned = strip_code_fence(reply);
    if cleaned.len() != reply.trim().len() {
        debug!(id = %id, "stripped code fence from element reply");
    }
    let replacement = parse_fragment(cleaned)?;

    // Re-number a fresh parse of the current markup; the walk is
    // deterministic, so the preview's identifiers reappear in place.
    let mut doc = MarkupDocument::parse(&artifact.markup);
    let _ = annotate_elements(&mut doc, ELEMENT_ID_ATTR);

    if !replace_annotated(&mut doc, ELEMENT_ID_ATTR, &id_text, replacement) {
        return Err(PatchError::NotFound { id });
    }
    strip_attribute(&mut doc, ELEMENT_ID_ATTR);

    let markup = doc.to_html();
    info!(id = %id, markup_bytes = markup.len(), "spliced element replacement");
    Ok(UiArtifact {
        markup,
        ..artifact.clone()
    })
}

/// Drop a surrounding markdown code fence, language tag included, when
/// the reply arrives wrapped in one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = &rest[newline + 1..];
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested_artifact() -> UiArtifact {
        UiArtifact::new("<div><span>A</span></div>")
            .with_styles("span { color: blue; }")
            .with_script("console.log('hi');")
            .with_external_script("https://cdn.tailwindcss.com")
    }

    #[test]
    fn whole_reply_replaces_artifact() {
        let reply = r#"Done! {"html":"<p>new</p>","css":"p {}","js":"","external_scripts":[]}"#;
        let artifact = apply_whole(reply).unwrap();
        assert_eq!(artifact.markup, "<p>new</p>");
        assert_eq!(artifact.styles, "p {}");
    }

    #[test]
    fn whole_reply_without_markup_is_extract_error() {
        let err = apply_whole("sorry, I cannot help with that").unwrap_err();
        assert!(matches!(err, PatchError::Extract(_)));
    }

    #[test]
    fn fragment_splice_replaces_exact_node() {
        let artifact = nested_artifact();
        let patched = apply_fragment(
            &artifact,
            "<span data-id=\"1\">A</span>",
            "<span data-id=\"1\">B</span>",
        )
        .unwrap();
        assert_eq!(patched.markup, "<div><span>B</span></div>");
    }

    #[test]
    fn fragment_splice_leaves_other_fields_untouched() {
        let artifact = nested_artifact();
        let patched = apply_fragment(
            &artifact,
            "<span data-id=\"1\">A</span>",
            "<em data-id=\"1\">B</em>",
        )
        .unwrap();
        assert_eq!(patched.markup, "<div><em>B</em></div>");
        assert_eq!(patched.styles, artifact.styles);
        assert_eq!(patched.script, artifact.script);
        assert_eq!(patched.external_scripts, artifact.external_scripts);
    }

    #[test]
    fn fenced_reply_is_cleaned_before_parsing() {
        let artifact = nested_artifact();
        let reply = "```html\n<span data-id=\"1\">B</span>\n```";
        let patched = apply_fragment(&artifact, "<span data-id=\"1\">A</span>", reply).unwrap();
        assert_eq!(patched.markup, "<div><span>B</span></div>");
    }

    #[test]
    fn reply_without_identifier_still_splices() {
        // locating is keyed on the selection's identifier, not the reply's
        let artifact = nested_artifact();
        let patched =
            apply_fragment(&artifact, "<span data-id=\"1\">A</span>", "<span>B</span>").unwrap();
        assert_eq!(patched.markup, "<div><span>B</span></div>");
    }

    #[test]
    fn stale_identifier_is_not_found() {
        let artifact = nested_artifact();
        let err = apply_fragment(
            &artifact,
            "<li data-id=\"9\">gone</li>",
            "<li data-id=\"9\">new</li>",
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::NotFound { id } if id.value() == 9));
    }

    #[test]
    fn selection_without_identifier_is_malformed() {
        let artifact = nested_artifact();
        let err = apply_fragment(&artifact, "<span>A</span>", "<span>B</span>").unwrap_err();
        assert!(matches!(err, PatchError::MalformedFragment { .. }));
    }

    #[test]
    fn reply_with_multiple_roots_is_malformed() {
        let artifact = nested_artifact();
        let err = apply_fragment(
            &artifact,
            "<span data-id=\"1\">A</span>",
            "<b>one</b><i>two</i>",
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::MalformedFragment { .. }));
    }

    #[test]
    fn shell_document_keeps_its_shell_through_splice() {
        let artifact = UiArtifact::new(
            "<html lang=\"en\"><head><title>t</title></head><body><p>old</p></body></html>",
        );
        let patched = apply_fragment(
            &artifact,
            "<p data-id=\"0\">old</p>",
            "<p data-id=\"0\">new</p>",
        )
        .unwrap();
        assert_eq!(
            patched.markup,
            "<html lang=\"en\"><head><title>t</title></head><body><p>new</p></body></html>"
        );
    }

    #[test]
    fn fence_without_language_tag_is_stripped() {
        assert_eq!(strip_code_fence("```\n<b>x</b>\n```"), "<b>x</b>");
        assert_eq!(strip_code_fence("  <b>x</b>  "), "<b>x</b>");
        // an unterminated fence keeps its body
        assert_eq!(strip_code_fence("```html\n<b>x</b>"), "<b>x</b>");
    }
}
