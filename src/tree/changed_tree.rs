use crate::tree::{NodeKey, TreeNode, Walk};

/// Root-level nodes of a built tree, already ordered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedTree<S> {
    roots: Vec<TreeNode<S>>,
}

impl<S> ChangedTree<S> {
    pub fn new(roots: Vec<TreeNode<S>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[TreeNode<S>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// A lone root is shown expanded.
    pub fn should_auto_expand(&self) -> bool {
        self.roots.len() == 1
    }

    pub fn walk(&self) -> Walk<'_, S> {
        Walk::new(&self.roots)
    }

    pub fn find(&self, key: &NodeKey) -> Option<&TreeNode<S>> {
        self.walk()
            .map(|(_, node)| node)
            .find(|node| node.matches(key))
    }

    /// Maps a user-supplied path to a node key. Files win over folders with
    /// the same path unless the path ends with `/`.
    pub fn resolve_key(&self, path: &str) -> Option<NodeKey> {
        if let Some(folder_path) = path.strip_suffix('/') {
            let key = NodeKey::Folder(folder_path.to_string());
            return self.find(&key).map(TreeNode::key);
        }

        [
            NodeKey::File(path.to_string()),
            NodeKey::Folder(path.to_string()),
        ]
        .into_iter()
        .find(|key| self.find(key).is_some())
    }

    pub fn file_count(&self) -> usize {
        self.walk().filter(|(_, node)| !node.is_folder()).count()
    }
}

impl<S> Default for ChangedTree<S> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}
