//! Error taxonomy for frame graph operations.
//!
//! Every error is a caller-input or lifecycle-ordering problem; no operation
//! partially mutates the tree on failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    /// Malformed path syntax, or a segment that does not resolve to an
    /// existing child.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Insertion where the requested name already exists among the target
    /// parent's children.
    #[error("frame '{name}' already exists under '{parent}'")]
    DuplicateName { parent: String, name: String },

    /// Dereferencing a frame reference or relative-pose token whose frame
    /// (or an ancestor of it) has been removed.
    #[error("stale frame reference: the frame has been deleted")]
    DeletedFrame,

    /// The root frame cannot be deleted or repositioned.
    #[error("operation not permitted on the root frame: {0}")]
    RootViolation(&'static str),
}

impl FrameError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        FrameError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type FrameResult<T> = Result<T, FrameError>;
