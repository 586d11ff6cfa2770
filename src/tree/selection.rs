use std::collections::HashSet;

use snafu::prelude::*;
use tracing::debug;

use crate::tree::{ChangedTree, NodeKey, TreeNode};

/// Checkbox state of a tree, kept apart from the tree itself.
///
/// Everything starts checked; only the exceptions are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    unchecked: HashSet<NodeKey>,
}

impl Selection {
    pub fn all_checked() -> Self {
        Self::default()
    }

    pub fn is_checked(&self, key: &NodeKey) -> bool {
        !self.unchecked.contains(key)
    }

    /// Flips the node at `key` and gives all its descendants the new state.
    pub fn toggle<S>(&self, tree: &ChangedTree<S>, key: &NodeKey) -> Result<Self, SelectionError> {
        let node = tree
            .find(key)
            .context(UnknownNodeSnafu { key: key.clone() })?;
        let checked = !self.is_checked(key);

        let mut next = self.clone();
        for (_, affected) in node.walk() {
            let affected_key = affected.key();
            if checked {
                next.unchecked.remove(&affected_key);
            } else {
                next.unchecked.insert(affected_key);
            }
        }
        debug!(
            "Set '{}' and its descendants to {}",
            key,
            if checked { "checked" } else { "unchecked" }
        );

        Ok(next)
    }

    /// Paths of the checked files, in display order.
    pub fn checked_files<'t, S>(&self, tree: &'t ChangedTree<S>) -> Vec<&'t str> {
        tree.walk()
            .filter_map(|(_, node)| match node {
                TreeNode::File(file) if self.is_checked(&node.key()) => Some(file.path()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[snafu(display("No node '{}' in the tree", key))]
    UnknownNode { key: NodeKey },
}
