//! Groups a flat set of changed file paths into a folder tree.
//!
//! Folders are built bottom-up, one nesting level at a time. A directory
//! becomes a folder node when it directly holds a changed file or when it is
//! the point where two changed subtrees branch. Every other directory on the
//! way is a transit folder: it gets no node of its own and its segment is
//! folded into the label of the folder below it (`src/main/java`).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use hashlink::LinkedHashMap;
use tracing::debug;

use crate::ext::PathSegmentsExt;
use crate::tree::{
    ChangedTree, FileNode, FolderNode, InvalidPathError, TreeNode, sort_nodes, validate_paths,
};

pub struct PathTreeBuilder;

impl PathTreeBuilder {
    /// Builds the folder tree for `files`.
    ///
    /// All paths are validated before any node is created.
    pub fn build_tree<S: Clone>(
        files: &LinkedHashMap<String, S>,
    ) -> Result<ChangedTree<S>, InvalidPathError> {
        validate_paths(files.keys())?;
        if files.is_empty() {
            return Ok(ChangedTree::default());
        }

        let max_depth = files
            .keys()
            .map(|path| path.segment_count())
            .max()
            .unwrap_or_default();
        let known_dirs = known_directories(files.keys().map(String::as_str));
        debug!(
            "Grouping {} files into {} folders, max depth {}",
            files.len(),
            known_dirs.len(),
            max_depth
        );

        let mut pending: BTreeMap<&str, FolderNode<S>> = BTreeMap::new();
        let mut root_files = Vec::new();

        for depth in (1..=max_depth).rev() {
            let mut file_groups: HashMap<&str, Vec<TreeNode<S>>> = HashMap::new();
            for (path, status) in files.iter().filter(|(path, _)| path.segment_count() == depth) {
                file_groups
                    .entry(path.parent_path())
                    .or_default()
                    .push(TreeNode::File(FileNode::new(path, status.clone())));
            }

            if depth == 1 {
                root_files = file_groups.remove("").unwrap_or_default();
                break;
            }

            let mut materialized: BTreeMap<&str, FolderNode<S>> = known_dirs
                .iter()
                .filter(|dir| dir.segment_count() == depth - 1)
                .map(|dir| {
                    let children = file_groups.remove(dir.as_str()).unwrap_or_default();
                    let name = compressed_name(&known_dirs, dir);
                    (dir.as_str(), FolderNode::new(dir, name, children))
                })
                .collect();

            let nested: Vec<(&str, &str)> = pending
                .keys()
                .filter_map(|&dir| {
                    nearest_known_ancestor(&known_dirs, dir)
                        .filter(|parent| materialized.contains_key(parent))
                        .map(|parent| (dir, parent))
                })
                .collect();
            for (dir, parent) in nested {
                if let (Some(child), Some(folder)) =
                    (pending.remove(dir), materialized.get_mut(parent))
                {
                    folder.push_child(TreeNode::Folder(child));
                }
            }

            for folder in materialized.values_mut() {
                folder.sort_children();
            }
            pending.extend(materialized);
        }

        let mut roots: Vec<TreeNode<S>> = pending
            .into_values()
            .map(TreeNode::Folder)
            .chain(root_files)
            .collect();
        sort_nodes(&mut roots);

        Ok(ChangedTree::new(roots))
    }

    /// Flat alternative to [`PathTreeBuilder::build_tree`]: one root file
    /// node per entry, named and ordered by full path.
    pub fn build_list<S: Clone>(
        files: &LinkedHashMap<String, S>,
    ) -> Result<ChangedTree<S>, InvalidPathError> {
        validate_paths(files.keys())?;

        let mut entries: Vec<(&String, &S)> = files.iter().collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp_segments(right));

        let roots = entries
            .into_iter()
            .map(|(path, status)| TreeNode::File(FileNode::listed(path, status.clone())))
            .collect();

        Ok(ChangedTree::new(roots))
    }
}

/// Display label of the folder at `path`: the part of `path` below its
/// nearest ancestor in `all_paths`, or the whole path when it has none.
pub fn compressed_name(all_paths: &BTreeSet<String>, path: &str) -> String {
    match nearest_known_ancestor(all_paths, path) {
        Some(ancestor) => path[ancestor.len() + 1..].to_string(),
        None => path.to_string(),
    }
}

/// Branching directories that hold no file of their own.
///
/// `dirs` is ordered segment-wise first, so that comparing neighbours finds
/// the common ancestor of every pair.
pub fn common_paths(dirs: &[&str]) -> Vec<String> {
    let mut sorted = dirs.to_vec();
    sorted.sort_by(|left, right| left.cmp_segments(right));

    let mut common = Vec::new();
    for pair in sorted.windows(2) {
        let prefix = pair[0].common_prefix(pair[1]);
        if !prefix.is_empty() && !dirs.contains(&prefix) && !common.iter().any(|known| known == prefix) {
            common.push(prefix.to_string());
        }
    }
    common
}

fn known_directories<'a>(files: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    let parents: BTreeSet<&str> = files
        .map(|path| path.parent_path())
        .filter(|parent| !parent.is_empty())
        .collect();
    let parents: Vec<&str> = parents.into_iter().collect();

    let mut known: BTreeSet<String> = parents.iter().map(|dir| dir.to_string()).collect();
    known.extend(common_paths(&parents));
    known
}

fn nearest_known_ancestor<'p>(known: &BTreeSet<String>, path: &'p str) -> Option<&'p str> {
    let mut candidate = path.parent_path();
    while !candidate.is_empty() {
        if known.contains(candidate) {
            return Some(candidate);
        }
        candidate = candidate.parent_path();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn changes(paths: &[(&str, u8)]) -> LinkedHashMap<String, u8> {
        paths
            .iter()
            .map(|(path, status)| (path.to_string(), *status))
            .collect()
    }

    fn folder(node: &TreeNode<u8>) -> &FolderNode<u8> {
        match node {
            TreeNode::Folder(folder) => folder,
            TreeNode::File(file) => panic!("Expected a folder, got file '{}'", file.path()),
        }
    }

    fn names(nodes: &[TreeNode<u8>]) -> Vec<&str> {
        nodes.iter().map(TreeNode::name).collect()
    }

    /// Renders the structure as `name[child, ...]` for compact assertions.
    fn outline(nodes: &[TreeNode<u8>]) -> String {
        nodes
            .iter()
            .map(|node| match node {
                TreeNode::File(file) => file.name().to_string(),
                TreeNode::Folder(folder) => {
                    format!("{}[{}]", folder.name(), outline(folder.children()))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        let tree = PathTreeBuilder::build_tree(&changes(&[])).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn files_in_one_directory_share_a_compressed_root() {
        let tree = PathTreeBuilder::build_tree(&changes(&[("a/b/d.txt", 2), ("a/b/c.txt", 1)]))
            .unwrap();

        assert_eq!(tree.roots().len(), 1);
        let root = folder(&tree.roots()[0]);
        assert_eq!(root.name(), "a/b");
        assert_eq!(root.path(), "a/b");
        assert_eq!(names(root.children()), vec!["c.txt", "d.txt"]);
        assert!(tree.should_auto_expand());
    }

    #[test]
    fn separate_top_level_directories_become_sorted_roots() {
        let tree =
            PathTreeBuilder::build_tree(&changes(&[("b/y.txt", 2), ("a/x.txt", 1)])).unwrap();

        assert_eq!(outline(tree.roots()), "a[x.txt], b[y.txt]");
        assert!(!tree.should_auto_expand());
    }

    #[test]
    fn non_branching_chain_is_fully_compressed() {
        let tree = PathTreeBuilder::build_tree(&changes(&[("a/b/c/d.txt", 1)])).unwrap();
        assert_eq!(outline(tree.roots()), "a/b/c[d.txt]");
    }

    #[test]
    fn branching_directory_is_not_compressed() {
        let tree =
            PathTreeBuilder::build_tree(&changes(&[("a/b/x.txt", 1), ("a/c/y.txt", 2)])).unwrap();

        assert_eq!(outline(tree.roots()), "a[b[x.txt], c[y.txt]]");
        let root = folder(&tree.roots()[0]);
        assert_eq!(folder(&root.children()[0]).path(), "a/b");
    }

    #[test]
    fn transit_folders_below_a_branch_are_compressed() {
        let tree = PathTreeBuilder::build_tree(&changes(&[
            ("src/main/java/org/App.java", 1),
            ("src/test/java/org/AppTest.java", 2),
        ]))
        .unwrap();

        assert_eq!(
            outline(tree.roots()),
            "src[main/java/org[App.java], test/java/org[AppTest.java]]"
        );
    }

    #[test]
    fn directory_with_files_and_subfolders_lists_folders_first() {
        let tree = PathTreeBuilder::build_tree(&changes(&[
            ("a/z.txt", 1),
            ("a/b/c/y.txt", 2),
            ("a/a.txt", 3),
        ]))
        .unwrap();

        assert_eq!(outline(tree.roots()), "a[b/c[y.txt], a.txt, z.txt]");
    }

    #[test]
    fn root_level_files_sit_beside_root_folders() {
        let tree = PathTreeBuilder::build_tree(&changes(&[
            ("README.md", 1),
            ("src/lib.rs", 2),
            ("Cargo.toml", 3),
        ]))
        .unwrap();

        assert_eq!(outline(tree.roots()), "src[lib.rs], Cargo.toml, README.md");
    }

    #[test]
    fn only_root_level_files() {
        let tree = PathTreeBuilder::build_tree(&changes(&[("b.txt", 1), ("a.txt", 2)])).unwrap();
        assert_eq!(outline(tree.roots()), "a.txt, b.txt");
    }

    #[test]
    fn deep_branch_point_without_files_is_found() {
        let tree = PathTreeBuilder::build_tree(&changes(&[
            ("x/y/z/a/1.txt", 1),
            ("x/y/z/b/2.txt", 2),
            ("x/other.txt", 3),
        ]))
        .unwrap();

        assert_eq!(outline(tree.roots()), "x[y/z[a[1.txt], b[2.txt]], other.txt]");
    }

    #[test]
    fn common_ancestor_is_found_regardless_of_input_order() {
        // `a/b` and `a/c` are not neighbours in insertion order.
        let tree = PathTreeBuilder::build_tree(&changes(&[
            ("a/b/1.txt", 1),
            ("z/2.txt", 2),
            ("a/c/3.txt", 3),
        ]))
        .unwrap();

        assert_eq!(outline(tree.roots()), "a[b[1.txt], c[3.txt]], z[2.txt]");
    }

    #[test]
    fn file_and_directory_sharing_a_name_stay_distinct() {
        let tree = PathTreeBuilder::build_tree(&changes(&[("a", 1), ("a/b.txt", 2)])).unwrap();
        assert_eq!(outline(tree.roots()), "a[b.txt], a");
    }

    #[test]
    fn every_file_appears_once_with_its_status() {
        let input = changes(&[
            ("a/b/c.txt", 1),
            ("a/b/d/e.txt", 2),
            ("a/f.txt", 3),
            ("g/h/i/j.txt", 4),
            ("k.txt", 5),
        ]);
        let tree = PathTreeBuilder::build_tree(&input).unwrap();

        let mut leaves: Vec<(&str, u8)> = tree
            .walk()
            .filter_map(|(_, node)| match node {
                TreeNode::File(file) => Some((file.path(), *file.status())),
                TreeNode::Folder(_) => None,
            })
            .collect();
        leaves.sort();

        let mut expected: Vec<(&str, u8)> =
            input.iter().map(|(path, status)| (path.as_str(), *status)).collect();
        expected.sort();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn rebuilding_gives_an_identical_tree() {
        let input = changes(&[("a/b/x.txt", 1), ("a/c/y.txt", 2), ("d.txt", 3)]);
        assert_eq!(
            PathTreeBuilder::build_tree(&input).unwrap(),
            PathTreeBuilder::build_tree(&input).unwrap()
        );
    }

    #[rstest]
    #[case("../x.txt")]
    #[case("/abs/x.txt")]
    #[case("a//x.txt")]
    #[case("a/./x.txt")]
    #[case("a/")]
    #[case("")]
    fn invalid_path_rejects_the_whole_input(#[case] bad_path: &str) {
        let input = changes(&[("ok/file.txt", 1), (bad_path, 2)]);
        assert!(PathTreeBuilder::build_tree(&input).is_err());
        assert!(PathTreeBuilder::build_list(&input).is_err());
    }

    #[test]
    fn parent_escape_is_reported_as_relative_segment() {
        let result = PathTreeBuilder::build_tree(&changes(&[("../x.txt", 1)]));
        assert!(matches!(
            result,
            Err(InvalidPathError::RelativeSegment { .. })
        ));
    }

    #[test]
    fn list_view_is_flat_and_sorted_by_path() {
        let tree = PathTreeBuilder::build_list(&changes(&[
            ("b/y.txt", 1),
            ("a/x.txt", 2),
            ("a-b.txt", 3),
        ]))
        .unwrap();

        assert_eq!(names(tree.roots()), vec!["a/x.txt", "a-b.txt", "b/y.txt"]);
        assert!(tree.roots().iter().all(|node| !node.is_folder()));
    }

    #[rstest]
    #[case(&["a/b", "a/c"], &["a"])]
    #[case(&["a/b", "z", "a/c"], &["a"])]
    #[case(&["a/b/c", "a/b/d", "a/e"], &["a/b", "a"])]
    #[case(&["a", "a/b"], &[])]
    #[case(&["a", "b"], &[])]
    fn finds_common_paths(#[case] dirs: &[&str], #[case] expected: &[&str]) {
        let mut found = common_paths(dirs);
        found.sort();
        let mut expected: Vec<String> = expected.iter().map(|path| path.to_string()).collect();
        expected.sort();
        assert_eq!(found, expected);
    }

    #[rstest]
    #[case(&["a", "a/b/c"], "a/b/c", "b/c")]
    #[case(&["a/b/c"], "a/b/c", "a/b/c")]
    #[case(&["a", "a/b", "a/b/c"], "a/b/c", "c")]
    #[case(&["a"], "a", "a")]
    fn compresses_names_up_to_nearest_known_ancestor(
        #[case] known: &[&str],
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        let known: BTreeSet<String> = known.iter().map(|path| path.to_string()).collect();
        assert_eq!(compressed_name(&known, path), expected);
    }
}
