use colored::{Color, Colorize};

use crate::changes::FileStatus;
use crate::tree::{ChangedTree, Selection, TreeNode};

const DEFAULT_INDENT: usize = 2;

/// How a file status shows up next to the file name.
pub trait StatusPresentation {
    fn marker(&self) -> char;
    fn color(&self) -> Color;
}

impl StatusPresentation for FileStatus {
    fn marker(&self) -> char {
        FileStatus::marker(self)
    }

    fn color(&self) -> Color {
        FileStatus::color(self)
    }
}

#[derive(Debug, Clone)]
pub struct TreeRenderer {
    pub indent: usize,
    pub show_checkboxes: bool,
    pub colorize: bool,
    /// Hide folder contents, except for a lone root.
    pub collapsed: bool,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            show_checkboxes: true,
            colorize: false,
            collapsed: false,
        }
    }
}

impl TreeRenderer {
    pub fn render<S: StatusPresentation>(
        &self,
        tree: &ChangedTree<S>,
        selection: &Selection,
    ) -> String {
        let expand_lone_root = tree.should_auto_expand();
        let mut output = String::new();
        for root in tree.roots() {
            let expanded = !self.collapsed || expand_lone_root;
            self.render_node(root, 0, expanded, selection, &mut output);
        }
        output
    }

    fn render_node<S: StatusPresentation>(
        &self,
        node: &TreeNode<S>,
        depth: usize,
        expanded: bool,
        selection: &Selection,
        output: &mut String,
    ) {
        output.push_str(&" ".repeat(depth * self.indent));
        if self.show_checkboxes {
            output.push_str(if selection.is_checked(&node.key()) {
                "[x] "
            } else {
                "[ ] "
            });
        }

        match node {
            TreeNode::File(file) => {
                let marker = file.status().marker().to_string();
                if self.colorize {
                    output.push_str(&marker.color(file.status().color()).to_string());
                } else {
                    output.push_str(&marker);
                }
                output.push(' ');
                output.push_str(file.name());
                output.push('\n');
            }
            TreeNode::Folder(folder) => {
                let label = format!("{}/", folder.name());
                if self.colorize {
                    output.push_str(&label.bold().to_string());
                } else {
                    output.push_str(&label);
                }
                output.push('\n');

                if expanded {
                    for child in folder.children() {
                        self.render_node(child, depth + 1, !self.collapsed, selection, output);
                    }
                }
            }
        }
    }
}
