//! Inspector bridge
//!
//! Two halves of one protocol. The sandbox half is a script injected into
//! instrumented documents: it tracks hover with a visible outline and
//! turns capture-phase clicks into `elementClicked` messages posted to
//! the parent context. The host half parses those messages and resolves
//! them against the current registry; stale or malformed input is a miss,
//! never a failure.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::registry::{ElementRecord, FragmentRegistry, ELEMENT_ID_ATTR};

/// Outline applied to the hovered element.
pub const HIGHLIGHT_OUTLINE: &str = "2px solid #3b82f6";

const INSPECTOR_TEMPLATE: &str = r#"(function () {
  var state = { current: null };
  document.addEventListener('mouseover', function (event) {
    if (state.current) {
      state.current.style.outline = '';
    }
    state.current = event.target;
    state.current.style.outline = '@@OUTLINE@@';
  });
  document.addEventListener('click', function (event) {
    event.preventDefault();
    event.stopPropagation();
    var elementId = event.target.getAttribute('@@ID_ATTR@@');
    if (elementId !== null) {
      window.parent.postMessage({ type: 'elementClicked', elementId: elementId }, '*');
    }
  }, true);
})();"#;

/// The instrumentation script injected after the artifact's own script.
///
/// Hover keeps at most one element outlined, with the previous outline
/// cleared first; the click listener runs in the capture phase so it acts
/// before the artifact's own handlers or native navigation, prevents
/// both, and posts one message per click. Elements without an identifier
/// (injected at runtime by the artifact's script) post nothing.
pub static INSPECTOR_SCRIPT: Lazy<String> = Lazy::new(|| {
    INSPECTOR_TEMPLATE
        .replace("@@OUTLINE@@", HIGHLIGHT_OUTLINE)
        .replace("@@ID_ATTR@@", ELEMENT_ID_ATTR)
});

/// Messages a rendered document may post to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SandboxMessage {
    /// The user clicked an instrumented element.
    #[serde(rename = "elementClicked")]
    ElementClicked {
        /// The clicked element's identifier attribute value.
        #[serde(rename = "elementId")]
        element_id: String,
    },
}

/// Parse a raw message payload. Anything unrecognized is `None`.
#[must_use]
pub fn parse_message(raw: &str) -> Option<SandboxMessage> {
    serde_json::from_str(raw).ok()
}

/// Resolve a sandbox message against the current registry.
///
/// A hit yields the stored pristine fragment. A miss (stale identifier
/// from a superseded document, or unparseable identifier text) yields
/// `None`. This function never fails.
#[must_use]
pub fn resolve_selection<'a>(
    registry: &'a FragmentRegistry,
    message: &SandboxMessage,
) -> Option<&'a ElementRecord> {
    match message {
        SandboxMessage::ElementClicked { element_id } => {
            let record = registry.resolve(element_id);
            debug!(
                element_id = %element_id,
                hit = record.is_some(),
                "resolved element click"
            );
            record
        }
    }
}
