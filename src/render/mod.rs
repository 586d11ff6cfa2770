//! Plain-text presentation of a changed-file tree.

mod tree_renderer;

pub use tree_renderer::TreeRenderer;
