//! Vitrine Studio - Session Orchestration
//!
//! The session layer that drives a component-building conversation:
//! - Builds prompts for generation, refinement, and chat
//! - Recovers and validates artifacts from model replies
//! - Applies whole-artifact and single-element patches
//! - Keeps the inspectable preview, history, and chat thread current
//! - Discards refinement replies superseded by newer work
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_studio::{RefinementRequest, StudioConfig, StudioSession, TextModel};
//!
//! # async fn example(model: Arc<dyn TextModel>) -> Result<(), vitrine_studio::StudioError> {
//! let mut session = StudioSession::new(model, StudioConfig::new());
//!
//! let artifact = session.generate("A pricing card with three tiers").await?;
//! println!("{} bytes of markup", artifact.markup.len());
//!
//! session
//!     .refine(RefinementRequest::whole("Make the middle tier stand out"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod patch;
pub mod prompt;
pub mod session;

// Re-exports for convenience
pub use chat::{ChatRole, ChatThread, ChatTurn};
pub use config::{ConfigError, StudioConfig};
pub use error::StudioError;
pub use history::{HistoryEntry, SessionHistory};
pub use model::{ModelError, TextModel};
pub use patch::{apply_fragment, apply_whole, PatchError, RefineTarget, RefinementRequest};
pub use prompt::{chat_prompt, element_refine_prompt, generation_prompt, refine_prompt};
pub use session::{PendingRefinement, SessionId, StudioSession};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Vitrine Studio
    pub use crate::{
        ModelError, RefineTarget, RefinementRequest, StudioConfig, StudioError, StudioSession,
        TextModel,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
