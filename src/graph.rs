//! The frame graph: path-addressed frame storage and pose queries.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::FrameArena;
use crate::errors::{FrameError, FrameResult};
use crate::path::{self, Segment, SEPARATOR};
use crate::relative::RelativePose;
use crate::Pose;

/// Non-owning handle to a frame.
///
/// A `FrameRef` identifies a specific frame instance without extending its
/// lifetime. The underlying arena index carries a generation counter, so a
/// reference into a deleted subtree dereferences to
/// [`FrameError::DeletedFrame`] instead of silently aliasing whatever reuses
/// the slot. References are only issued by successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef(pub(crate) Index);

/// A collection of frames and their relative poses.
///
/// The tree always contains an unnamed root frame with identity pose; it is
/// addressed by the empty path (or `"/"`) and cannot be deleted or moved.
/// All mutable state lives behind this struct; callers never reach internal
/// storage directly.
#[derive(Debug, Default)]
pub struct FrameGraph {
    arena: FrameArena,
}

impl FrameGraph {
    /// Creates a graph containing only the root frame.
    pub fn new() -> Self {
        Self {
            arena: FrameArena::new(),
        }
    }

    /// Adds a new frame under the frame at `parent_path`.
    ///
    /// The new frame is immediately queryable. Returns a weak reference to
    /// it, which is also obtainable later via [`FrameGraph::frame`].
    ///
    /// # Errors
    ///
    /// * [`FrameError::InvalidPath`] if `parent_path` does not resolve or
    ///   `name` is not a valid frame name.
    /// * [`FrameError::DuplicateName`] if `name` already exists among the
    ///   parent's children; the tree is left unchanged.
    #[instrument(level = "debug", skip(self, local_pose))]
    pub fn add_frame(
        &mut self,
        parent_path: &str,
        name: &str,
        local_pose: Pose,
    ) -> FrameResult<FrameRef> {
        path::validate_name(name)?;
        let parent = self.resolve(parent_path)?;

        if self.arena.child_by_name(parent, name).is_some() {
            return Err(FrameError::DuplicateName {
                parent: self.path_of(parent),
                name: name.to_string(),
            });
        }

        let idx = self.arena.insert_child(parent, name, local_pose);
        debug!(parent_path, name, "added frame");
        Ok(FrameRef(idx))
    }

    /// Removes the frame at `path` and its entire subtree.
    ///
    /// The operation is all-or-nothing: it validates the path first and only
    /// then frees the subtree. Weak references and relative-pose tokens
    /// pointing into the removed subtree become stale; they are not scanned
    /// or fixed up, staleness is detected on the next dereference.
    ///
    /// # Errors
    ///
    /// * [`FrameError::InvalidPath`] if `path` does not resolve.
    /// * [`FrameError::RootViolation`] if `path` designates the root.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_frame(&mut self, path: &str) -> FrameResult<()> {
        let idx = self.resolve(path)?;
        if idx == self.arena.root() {
            return Err(FrameError::RootViolation("delete"));
        }
        let removed = self.arena.remove_subtree(idx);
        debug!(path, removed, "deleted frame subtree");
        Ok(())
    }

    /// Computes the pose of the frame at `dst_path` expressed in the
    /// coordinates of the frame at `src_path`.
    pub fn pose(&self, dst_path: &str, src_path: &str) -> FrameResult<Pose> {
        let dst = self.resolve(dst_path)?;
        let src = self.resolve(src_path)?;
        Ok(self.compose(dst, src))
    }

    /// Evaluates a previously created [`RelativePose`] token, skipping path
    /// parsing.
    ///
    /// # Errors
    ///
    /// [`FrameError::DeletedFrame`] if either captured frame has been removed
    /// since the token was created.
    pub fn pose_of(&self, relative: &RelativePose) -> FrameResult<Pose> {
        let dst = self.deref(relative.dst)?;
        let src = self.deref(relative.src)?;
        Ok(self.compose(dst, src))
    }

    /// The local pose of the frame at `path`, relative to its parent.
    /// The root's local pose is the identity.
    pub fn local_pose(&self, path: &str) -> FrameResult<Pose> {
        let idx = self.resolve(path)?;
        Ok(self.node_pose(idx))
    }

    /// The local pose of a referenced frame, relative to its parent.
    pub fn local_pose_of(&self, frame: FrameRef) -> FrameResult<Pose> {
        let idx = self.deref(frame)?;
        Ok(self.node_pose(idx))
    }

    /// Replaces the local pose of the frame at `path`.
    ///
    /// # Errors
    ///
    /// * [`FrameError::InvalidPath`] if `path` does not resolve.
    /// * [`FrameError::RootViolation`] if `path` designates the root, whose
    ///   pose is the identity by invariant.
    #[instrument(level = "debug", skip(self, local_pose))]
    pub fn set_local_pose(&mut self, path: &str, local_pose: Pose) -> FrameResult<()> {
        let idx = self.resolve(path)?;
        self.set_node_pose(idx, local_pose)
    }

    /// Replaces the local pose of a referenced frame.
    ///
    /// # Errors
    ///
    /// * [`FrameError::DeletedFrame`] if the reference is stale.
    /// * [`FrameError::RootViolation`] if it refers to the root.
    pub fn set_local_pose_of(&mut self, frame: FrameRef, local_pose: Pose) -> FrameResult<()> {
        let idx = self.deref(frame)?;
        self.set_node_pose(idx, local_pose)
    }

    /// Resolves both paths once and captures a [`RelativePose`] token for
    /// repeated evaluation with [`FrameGraph::pose_of`].
    pub fn create_relative_pose(
        &self,
        dst_path: &str,
        src_path: &str,
    ) -> FrameResult<RelativePose> {
        let dst = self.frame(dst_path)?;
        let src = self.frame(src_path)?;
        Ok(RelativePose { dst, src })
    }

    /// Resolves `path` to a weak frame reference.
    pub fn frame(&self, path: &str) -> FrameResult<FrameRef> {
        Ok(FrameRef(self.resolve(path)?))
    }

    /// Resolves `relative_path` starting at `start` instead of the root.
    /// A leading separator anchors the walk at the root regardless of
    /// `start`, mirroring shell path semantics.
    ///
    /// # Errors
    ///
    /// * [`FrameError::DeletedFrame`] if `start` is stale.
    /// * [`FrameError::InvalidPath`] if resolution fails at any segment.
    pub fn frame_from(&self, start: FrameRef, relative_path: &str) -> FrameResult<FrameRef> {
        let start = self.deref(start)?;
        let segments = path::parse(relative_path)?;
        let anchor = if relative_path.starts_with(SEPARATOR) {
            self.arena.root()
        } else {
            start
        };
        Ok(FrameRef(self.walk(anchor, &segments, relative_path)?))
    }

    /// The absolute path of a referenced frame, from the root down.
    /// The root's path is `"/"`.
    pub fn absolute_path(&self, frame: FrameRef) -> FrameResult<String> {
        let idx = self.deref(frame)?;
        Ok(self.path_of(idx))
    }

    /// Sorted names of the direct children of the frame at `path`.
    pub fn children(&self, path: &str) -> FrameResult<Vec<String>> {
        let idx = self.resolve(path)?;
        let mut names: Vec<String> = self
            .arena
            .get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.arena.get(child))
                    .map(|child| child.name.clone())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        Ok(names)
    }

    /// Absolute paths of all frames, in depth-first order starting at the
    /// root.
    pub fn frame_paths(&self) -> Vec<String> {
        self.arena.iter().map(|(idx, _)| self.path_of(idx)).collect()
    }

    /// Number of frames in the graph, the root included.
    pub fn frame_count(&self) -> usize {
        self.arena.len()
    }

    /// Longest root-to-leaf chain length; 1 for a graph with only the root.
    pub fn depth(&self) -> usize {
        self.arena.depth()
    }

    pub(crate) fn arena(&self) -> &FrameArena {
        &self.arena
    }

    fn deref(&self, frame: FrameRef) -> FrameResult<Index> {
        match self.arena.get(frame.0) {
            Some(_) => Ok(frame.0),
            None => Err(FrameError::DeletedFrame),
        }
    }

    fn resolve(&self, path: &str) -> FrameResult<Index> {
        let segments = path::parse(path)?;
        self.walk(self.arena.root(), &segments, path)
    }

    fn walk(&self, start: Index, segments: &[Segment<'_>], full_path: &str) -> FrameResult<Index> {
        let mut current = start;
        for &segment in segments {
            current = match segment {
                Segment::Current => current,
                Segment::Parent => self
                    .arena
                    .get(current)
                    .and_then(|node| node.parent)
                    .ok_or_else(|| {
                        FrameError::invalid_path(full_path, "the root frame has no parent")
                    })?,
                Segment::Child(name) => {
                    self.arena.child_by_name(current, name).ok_or_else(|| {
                        FrameError::invalid_path(full_path, format!("no frame named '{name}'"))
                    })?
                }
            };
        }
        Ok(current)
    }

    /// Pose of `dst` expressed in `src`'s coordinates, via their lowest
    /// common ancestor.
    fn compose(&self, dst: Index, src: Index) -> Pose {
        if dst == src {
            return Pose::identity();
        }

        let dst_chain = self.arena.ancestor_chain(dst);
        let src_chain = self.arena.ancestor_chain(src);

        // Both chains start at the root, so the common prefix is non-empty
        // and its last element is the lowest common ancestor. If one frame
        // is an ancestor of the other, its remainder is empty and that side
        // composes to the identity.
        let common = dst_chain
            .iter()
            .zip(&src_chain)
            .take_while(|(a, b)| a == b)
            .count();

        let lca_to_dst = self.compose_down(&dst_chain[common..]);
        let lca_to_src = self.compose_down(&src_chain[common..]);

        lca_to_src.inverse() * lca_to_dst
    }

    /// Folds local poses along a chain of frames below the common ancestor,
    /// in parent-to-child order. Composition is non-commutative; the
    /// accumulated transform is always on the left.
    fn compose_down(&self, chain: &[Index]) -> Pose {
        chain
            .iter()
            .filter_map(|&idx| self.arena.get(idx))
            .fold(Pose::identity(), |acc, node| acc * node.local_pose)
    }

    fn node_pose(&self, idx: Index) -> Pose {
        self.arena
            .get(idx)
            .map(|node| node.local_pose)
            .unwrap_or_else(Pose::identity)
    }

    fn set_node_pose(&mut self, idx: Index, local_pose: Pose) -> FrameResult<()> {
        if idx == self.arena.root() {
            return Err(FrameError::RootViolation("set pose"));
        }
        if let Some(node) = self.arena.get_mut(idx) {
            node.local_pose = local_pose;
        }
        Ok(())
    }

    fn path_of(&self, idx: Index) -> String {
        let mut rendered = String::new();
        for chain_idx in self.arena.ancestor_chain(idx) {
            if let Some(node) = self.arena.get(chain_idx) {
                if !node.name.is_empty() {
                    rendered.push(SEPARATOR);
                    rendered.push_str(&node.name);
                }
            }
        }
        if rendered.is_empty() {
            rendered.push(SEPARATOR);
        }
        rendered
    }
}
