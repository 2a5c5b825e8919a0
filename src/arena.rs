use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::Pose;

/// Tree node in the arena-based frame hierarchy.
#[derive(Debug)]
pub struct FrameNode {
    /// Frame name, unique among siblings; empty only for the root
    pub name: String,
    /// Rigid transform relative to the parent frame
    pub local_pose: Pose,
    /// Index of the parent node in the arena, None only for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based storage for the frame tree.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups: a removed node's slot advances its generation, so any index
/// captured before the removal dereferences to `None` instead of aliasing a
/// later insertion. The unnamed root node is created up front and lives for
/// the whole arena lifetime.
#[derive(Debug)]
pub struct FrameArena {
    /// Arena storage for all tree nodes
    arena: Arena<FrameNode>,
    /// Index of the always-present root node
    root: Index,
}

impl FrameArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(FrameNode {
            name: String::new(),
            local_pose: Pose::identity(),
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get(&self, idx: Index) -> Option<&FrameNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut FrameNode> {
        self.arena.get_mut(idx)
    }

    /// Inserts a new child under `parent`. The caller has already validated
    /// the name and checked sibling uniqueness.
    #[instrument(level = "trace", skip(self, local_pose))]
    pub fn insert_child(&mut self, parent: Index, name: &str, local_pose: Pose) -> Index {
        let node = FrameNode {
            name: name.to_string(),
            local_pose,
            parent: Some(parent),
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(node_idx);
        }

        node_idx
    }

    /// Looks up a direct child of `parent` by exact name.
    pub fn child_by_name(&self, parent: Index, name: &str) -> Option<Index> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.get(child).is_some_and(|node| node.name == name))
    }

    /// Removes `idx` and its entire subtree, returning the number of nodes
    /// freed. Iterative work-list walk, no recursion on tree depth. Freeing
    /// a slot advances its generation, so every outstanding index into the
    /// subtree goes stale.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> usize {
        // Detach from the parent before freeing anything.
        if let Some(parent_idx) = self.get(idx).and_then(|node| node.parent) {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.retain(|&child| child != idx);
            }
        }

        let mut stack = vec![idx];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Ancestor chain from the root down to `idx`, both inclusive.
    pub fn ancestor_chain(&self, idx: Index) -> Vec<Index> {
        let mut chain = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            chain.push(node_idx);
            current = self.get(node_idx).and_then(|node| node.parent);
        }
        chain.reverse();
        chain
    }

    /// Number of live frames, the root included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1usize)];
        while let Some((current, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get(current) {
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Depth-first iteration over all live frames, starting at the root.
    pub fn iter(&self) -> FrameIterator<'_> {
        FrameIterator::new(self)
    }
}

impl Default for FrameArena {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FrameIterator<'a> {
    arena: &'a FrameArena,
    stack: Vec<Index>,
}

impl<'a> FrameIterator<'a> {
    fn new(arena: &'a FrameArena) -> Self {
        Self {
            arena,
            stack: vec![arena.root()],
        }
    }
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = (Index, &'a FrameNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_arena() -> (FrameArena, Index, Index, Index) {
        let mut arena = FrameArena::new();
        let world = arena.insert_child(arena.root(), "world", Pose::identity());
        let base = arena.insert_child(world, "base", Pose::identity());
        let camera = arena.insert_child(base, "camera", Pose::identity());
        (arena, world, base, camera)
    }

    #[test]
    fn test_new_arena_contains_only_root() {
        let arena = FrameArena::new();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.depth(), 1);
        let root = arena.get(arena.root()).unwrap();
        assert!(root.name.is_empty());
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_insert_child_links_parent_and_child() {
        let (arena, world, base, _) = sample_arena();
        assert_eq!(arena.child_by_name(world, "base"), Some(base));
        assert_eq!(arena.get(base).unwrap().parent, Some(world));
        assert_eq!(arena.depth(), 4);
    }

    #[test]
    fn test_remove_subtree_frees_all_descendants() {
        let (mut arena, world, base, camera) = sample_arena();
        let removed = arena.remove_subtree(base);
        assert_eq!(removed, 2);
        assert!(arena.get(base).is_none());
        assert!(arena.get(camera).is_none());
        // The rest of the tree is untouched.
        assert!(arena.get(world).is_some());
        assert_eq!(arena.child_by_name(world, "base"), None);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_stale_index_stays_stale_after_reinsertion() {
        let (mut arena, world, base, _) = sample_arena();
        arena.remove_subtree(base);
        // A new frame may reuse the freed slot, but the old index carries
        // the old generation and must not resolve to it.
        let replacement = arena.insert_child(world, "base2", Pose::identity());
        assert!(arena.get(base).is_none());
        assert!(arena.get(replacement).is_some());
    }

    #[test]
    fn test_ancestor_chain_runs_root_to_node() {
        let (arena, world, base, camera) = sample_arena();
        let chain = arena.ancestor_chain(camera);
        assert_eq!(chain, vec![arena.root(), world, base, camera]);
        assert_eq!(arena.ancestor_chain(arena.root()), vec![arena.root()]);
    }

    #[test]
    fn test_iter_visits_every_live_frame() {
        let (arena, _, _, _) = sample_arena();
        let names: Vec<_> = arena.iter().map(|(_, node)| node.name.clone()).collect();
        assert_eq!(names, vec!["", "world", "base", "camera"]);
    }
}
