//! Vitrine Artifact
//!
//! Structured UI artifacts recovered from unreliable model text.
//!
//! # Core Concepts
//!
//! - [`UiArtifact`]: markup, styles, script, and external resource URLs
//! - [`extract`]: multi-strategy recovery from noisy reply text
//! - [`validate`]: minimum-viable-artifact check and URL deduplication
//! - [`ContentFingerprint`]: Blake3 digest for logs and version bookkeeping
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_artifact::{extract, validate};
//!
//! let raw = r#"Sure! {"html":"<button>Hi</button>","css":"","js":""}"#;
//! let artifact = validate(extract(raw)?)?;
//! assert_eq!(artifact.markup, "<button>Hi</button>");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod extract;
mod fingerprint;

// Re-exports
pub use artifact::{validate, UiArtifact, ValidateError};
pub use extract::{extract, extract_with_report, ExtractError, Extraction, Strategy, REPLY_ANCHOR};
pub use fingerprint::ContentFingerprint;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extract_then_validate_pipeline() {
        let raw = concat!(
            "Absolutely! Here is your component.\n",
            r#"{"html":"<div class=\"card\">Hello</div>","css":".card { padding: 1rem; }","js":"","#,
            r#""external_scripts":["https://cdn.tailwindcss.com","https://cdn.tailwindcss.com"]}"#,
        );
        let artifact = validate(extract(raw).unwrap()).unwrap();
        assert_eq!(artifact.markup, "<div class=\"card\">Hello</div>");
        assert_eq!(artifact.styles, ".card { padding: 1rem; }");
        // duplicate CDN entry collapses, order kept
        assert_eq!(
            artifact.external_scripts,
            vec!["https://cdn.tailwindcss.com".to_string()]
        );
    }

    #[test]
    fn failed_extraction_reports_strategy_exhaustion() {
        let err = extract("no object here at all").unwrap_err();
        assert!(err.to_string().contains("no extraction strategy"));
    }
}
