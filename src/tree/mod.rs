//! Changed-file tree: path grouping, node model and checkbox state.
//!
//! The tree is an immutable snapshot rebuilt from scratch for every change
//! set. Checkbox state lives in a separate [`Selection`] so that toggling a
//! node never mutates the tree.

mod builder;
mod changed_tree;
mod node;
mod path;
mod selection;

pub use builder::PathTreeBuilder;
pub use changed_tree::ChangedTree;
pub use node::{FileNode, FolderNode, NodeKey, TreeNode, Walk, sort_nodes};
pub use path::{InvalidPathError, validate_paths};
pub use selection::{Selection, SelectionError};
