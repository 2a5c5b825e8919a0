//! Tree rendering for the frame hierarchy.

use std::fmt;

use generational_arena::Index;
use termtree::Tree;

use crate::graph::FrameGraph;

pub trait ToTreeString {
    fn to_tree_string(&self) -> Tree<String>;
}

impl ToTreeString for FrameGraph {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(graph: &FrameGraph, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = graph.arena().get(node_idx) {
                for &child_idx in &node.children {
                    if let Some(child) = graph.arena().get(child_idx) {
                        let mut child_tree = Tree::new(child.name.clone());
                        build_tree(graph, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let root_idx = self.arena().root();
        let mut tree = Tree::new("/".to_string());
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

impl fmt::Display for FrameGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
