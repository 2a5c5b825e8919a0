//! Cached frame-pair query token.

use crate::graph::FrameRef;

/// Remembers a resolved (destination, source) frame pair so that repeated
/// pose evaluation skips path parsing.
///
/// Created by [`FrameGraph::create_relative_pose`] and evaluated with
/// [`FrameGraph::pose_of`]. The token holds weak references only: once either
/// frame is deleted, evaluation fails with
/// [`FrameError::DeletedFrame`] and the caller must
/// recreate the token — it is never auto-repaired.
///
/// [`FrameGraph::create_relative_pose`]: crate::graph::FrameGraph::create_relative_pose
/// [`FrameGraph::pose_of`]: crate::graph::FrameGraph::pose_of
/// [`FrameError::DeletedFrame`]: crate::errors::FrameError::DeletedFrame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativePose {
    pub(crate) dst: FrameRef,
    pub(crate) src: FrameRef,
}

impl RelativePose {
    /// The destination frame captured at creation time.
    pub fn dst(&self) -> FrameRef {
        self.dst
    }

    /// The source frame captured at creation time.
    pub fn src(&self) -> FrameRef {
        self.src
    }
}
