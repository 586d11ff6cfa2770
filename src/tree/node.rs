use std::cmp::Ordering;

use derive_more::Display;

use crate::ext::PathSegmentsExt;

/// Identifies a node independently of the tree instance that holds it.
///
/// A file and a folder may share a path (`a` the file, `a/b` below `a` the
/// directory), so the kind is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum NodeKey {
    #[display("{_0}")]
    File(String),
    #[display("{_0}/")]
    Folder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode<S> {
    path: String,
    name: String,
    status: S,
}

impl<S> FileNode<S> {
    /// A file shown inside its folder, named after its last segment.
    pub fn new(path: &str, status: S) -> Self {
        Self {
            path: path.to_string(),
            name: path.last_segment().to_string(),
            status,
        }
    }

    /// A file shown in a flat list, named after its full path.
    pub fn listed(path: &str, status: S) -> Self {
        Self {
            path: path.to_string(),
            name: path.to_string(),
            status,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> &S {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode<S> {
    path: String,
    name: String,
    children: Vec<TreeNode<S>>,
}

impl<S> FolderNode<S> {
    pub fn new(path: &str, name: String, children: Vec<TreeNode<S>>) -> Self {
        Self {
            path: path.to_string(),
            name,
            children,
        }
    }

    /// Full directory path, regardless of how much of it the name shows.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Display label, possibly several segments joined by `/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[TreeNode<S>] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: TreeNode<S>) {
        self.children.push(child);
    }

    pub(crate) fn sort_children(&mut self) {
        sort_nodes(&mut self.children);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode<S> {
    File(FileNode<S>),
    Folder(FolderNode<S>),
}

impl<S> TreeNode<S> {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File(file) => file.name(),
            TreeNode::Folder(folder) => folder.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::File(file) => file.path(),
            TreeNode::Folder(folder) => folder.path(),
        }
    }

    pub fn key(&self) -> NodeKey {
        let path = self.path().to_string();
        match self {
            TreeNode::File(_) => NodeKey::File(path),
            TreeNode::Folder(_) => NodeKey::Folder(path),
        }
    }

    pub fn matches(&self, key: &NodeKey) -> bool {
        match (self, key) {
            (TreeNode::File(file), NodeKey::File(path)) => file.path() == path,
            (TreeNode::Folder(folder), NodeKey::Folder(path)) => folder.path() == path,
            _ => false,
        }
    }

    pub fn children(&self) -> &[TreeNode<S>] {
        match self {
            TreeNode::File(_) => &[],
            TreeNode::Folder(folder) => folder.children(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder(_))
    }

    /// Pre-order walk over this node and its descendants, with depths
    /// relative to this node.
    pub fn walk(&self) -> Walk<'_, S> {
        Walk::new(std::slice::from_ref(self))
    }
}

/// Folders before files, each group ordered by name.
pub fn sort_nodes<S>(nodes: &mut [TreeNode<S>]) {
    nodes.sort_by(compare_nodes);
}

fn compare_nodes<S>(left: &TreeNode<S>, right: &TreeNode<S>) -> Ordering {
    right
        .is_folder()
        .cmp(&left.is_folder())
        .then_with(|| left.name().cmp(right.name()))
}

pub struct Walk<'a, S> {
    stack: Vec<(usize, &'a TreeNode<S>)>,
}

impl<'a, S> Walk<'a, S> {
    pub(crate) fn new(roots: &'a [TreeNode<S>]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a, S> Iterator for Walk<'a, S> {
    type Item = (usize, &'a TreeNode<S>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
