//! The UI artifact type
//!
//! Provides [`UiArtifact`], the structured bundle of markup, styles,
//! script, and external resource URLs representing one generated or
//! refined component, plus validation and the content-equality predicate
//! used to match artifacts back to history entries.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::fingerprint::ContentFingerprint;

/// One generated UI component.
///
/// Wire field names follow the model contract: `html`, `css`, `js`,
/// `external_scripts`, `external_styles`. Only `html` is required on the
/// wire; everything else defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiArtifact {
    /// Component markup. Non-empty for any artifact considered valid.
    #[serde(rename = "html")]
    pub markup: String,

    /// Stylesheet content; empty when the component needs none.
    #[serde(rename = "css", default)]
    pub styles: String,

    /// Script content; empty when the component needs none.
    #[serde(rename = "js", default)]
    pub script: String,

    /// External script URLs, in load order, no duplicates once validated.
    #[serde(default)]
    pub external_scripts: Vec<String>,

    /// External stylesheet URLs, in load order, no duplicates once
    /// validated.
    #[serde(default)]
    pub external_styles: Vec<String>,
}

impl UiArtifact {
    /// Create an artifact with the given markup and everything else empty.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            ..Self::default()
        }
    }

    /// Builder-style styles setter.
    #[must_use]
    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = styles.into();
        self
    }

    /// Builder-style script setter.
    #[must_use]
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    /// Builder-style external script URL.
    #[must_use]
    pub fn with_external_script(mut self, url: impl Into<String>) -> Self {
        self.external_scripts.push(url.into());
        self
    }

    /// Builder-style external stylesheet URL.
    #[must_use]
    pub fn with_external_style(mut self, url: impl Into<String>) -> Self {
        self.external_styles.push(url.into());
        self
    }

    /// True when the artifact has markup to render.
    #[inline]
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !self.markup.is_empty()
    }

    /// Content equality as history reconciliation sees it: markup and
    /// styles only. Script and external lists do not participate.
    #[inline]
    #[must_use]
    pub fn content_eq(&self, other: &Self) -> bool {
        self.markup == other.markup && self.styles == other.styles
    }

    /// Blake3 fingerprint over all five fields, for logs and version
    /// bookkeeping.
    #[must_use]
    pub fn fingerprint(&self) -> ContentFingerprint {
        ContentFingerprint::of(self)
    }

    /// Export the artifact in its wire shape as pretty-printed JSON.
    #[must_use]
    pub fn to_wire_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Errors from artifact validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The recovered artifact has no markup to render.
    #[error("artifact markup is empty")]
    EmptyMarkup,
}

/// Validate a candidate artifact: markup must be non-empty; both URL
/// lists are deduplicated preserving first-seen order.
///
/// # Errors
/// Returns [`ValidateError::EmptyMarkup`] when the markup field is empty;
/// that is the only failure.
pub fn validate(candidate: UiArtifact) -> Result<UiArtifact, ValidateError> {
    if candidate.markup.is_empty() {
        return Err(ValidateError::EmptyMarkup);
    }
    Ok(UiArtifact {
        external_scripts: dedup_preserving_order(candidate.external_scripts),
        external_styles: dedup_preserving_order(candidate.external_styles),
        ..candidate
    })
}

fn dedup_preserving_order(urls: Vec<String>) -> Vec<String> {
    urls.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
