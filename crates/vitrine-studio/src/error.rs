//! Studio error types
//!
//! One combined error for session operations, converting from the
//! per-concern errors below it. Any failure leaves the session's
//! artifact, history, and version exactly as they were; callers surface
//! the message as a notice and decide about retrying themselves.

use vitrine_artifact::{ExtractError, ValidateError};

use crate::config::ConfigError;
use crate::model::ModelError;
use crate::patch::PatchError;

/// Combined session error.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// A model request is already outstanding.
    #[error("a model request is already in flight")]
    Busy,

    /// The operation needs a current artifact and none exists yet.
    #[error("no artifact has been generated yet")]
    NoArtifact,

    /// The reply arrived after the artifact it targeted was replaced.
    #[error("reply superseded: targeted version {targeted}, session is at {current}")]
    Superseded {
        /// Version the refinement was started against.
        targeted: u64,
        /// Version the session holds now.
        current: u64,
    },

    /// Element refinement was requested with nothing selected.
    #[error("no element is selected")]
    NoSelection,

    /// A history index past the end was requested.
    #[error("history index {index} out of range (len {len})")]
    HistoryOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of recorded entries.
        len: usize,
    },

    /// The model provider failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Reply recovery failed.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// The recovered artifact was not viable.
    #[error("validation error: {0}")]
    Validate(#[from] ValidateError),

    /// Patch application failed.
    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    /// Configuration loading failed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl StudioError {
    /// True when the same request could sensibly be retried as-is.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Busy
                | Self::Model(_)
                | Self::Extract(_)
                | Self::Validate(_)
                | Self::Patch(PatchError::Extract(_) | PatchError::Validate(_))
        )
    }

    /// True when the reply was discarded by the version gate.
    #[inline]
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superseded_names_both_versions() {
        let err = StudioError::Superseded {
            targeted: 3,
            current: 5,
        };
        assert_eq!(
            err.to_string(),
            "reply superseded: targeted version 3, session is at 5"
        );
        assert!(err.is_superseded());
        assert!(!err.is_retryable());
    }

    #[test]
    fn model_errors_convert_and_retry() {
        let err = StudioError::from(ModelError::EmptyReply);
        assert!(matches!(err, StudioError::Model(ModelError::EmptyReply)));
        assert!(err.is_retryable());
    }

    #[test]
    fn patch_retryability_depends_on_the_cause() {
        let bad_reply = StudioError::Patch(PatchError::Extract(ExtractError::NoMarkup {
            preview: "nothing usable".to_string(),
        }));
        assert!(bad_reply.is_retryable());

        let gone = StudioError::Patch(PatchError::NotFound {
            id: vitrine_preview::ElementId::from(7),
        });
        assert!(!gone.is_retryable());
    }
}
