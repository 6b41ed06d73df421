//! Vitrine Preview
//!
//! Turns a validated artifact into the document rendered inside the
//! preview sandbox, and maps clicks in that sandbox back to source
//! fragments.
//!
//! # Core Concepts
//!
//! - [`assemble`]: artifact in, renderable document plus registry out
//! - [`FragmentRegistry`]: identifier-to-fragment map for one render
//! - [`INSPECTOR_SCRIPT`]: injected hover/click instrumentation
//! - [`resolve_selection`]: sandbox message back to a source fragment
//!
//! # Example
//!
//! ```rust,ignore
//! use vitrine_artifact::UiArtifact;
//! use vitrine_preview::{assemble, parse_message, resolve_selection};
//!
//! let artifact = UiArtifact::new("<div><span>A</span></div>");
//! let render = assemble(&artifact, true);
//!
//! let message = parse_message(r#"{"type":"elementClicked","elementId":"1"}"#)?;
//! let record = resolve_selection(&render.registry, &message);
//! assert_eq!(record.unwrap().fragment, "<span data-id=\"1\">A</span>");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod assemble;
mod inspector;
mod registry;

// Re-exports
pub use assemble::{assemble, AssembledDocument};
pub use inspector::{
    parse_message, resolve_selection, SandboxMessage, HIGHLIGHT_OUTLINE, INSPECTOR_SCRIPT,
};
pub use registry::{ElementId, ElementRecord, FragmentRegistry, ELEMENT_ID_ATTR};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
