use std::cmp::Ordering;

const SEPARATOR: char = '/';

/// Segment-level helpers for forward-slash repository paths.
///
/// The empty string stands for the repository root and has no segments.
pub trait PathSegmentsExt {
    fn segment_count(&self) -> usize;
    /// Path with the last segment removed, `""` for top-level entries.
    fn parent_path(&self) -> &str;
    fn last_segment(&self) -> &str;
    /// Longest shared leading-segment prefix of both paths.
    fn common_prefix(&self, other: &str) -> &str;
    /// Compares paths segment by segment, so that `a/b` sorts before `a-b`.
    fn cmp_segments(&self, other: &str) -> Ordering;
}

impl PathSegmentsExt for str {
    fn segment_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.split(SEPARATOR).count()
        }
    }

    fn parent_path(&self) -> &str {
        self.rsplit_once(SEPARATOR)
            .map(|(parent, _)| parent)
            .unwrap_or_default()
    }

    fn last_segment(&self) -> &str {
        self.rsplit_once(SEPARATOR)
            .map(|(_, name)| name)
            .unwrap_or(self)
    }

    fn common_prefix(&self, other: &str) -> &str {
        let mut end = 0;
        for (index, (mine, theirs)) in self.split(SEPARATOR).zip(other.split(SEPARATOR)).enumerate() {
            if mine != theirs {
                break;
            }
            end += mine.len() + usize::from(index > 0);
        }
        &self[..end]
    }

    fn cmp_segments(&self, other: &str) -> Ordering {
        self.split(SEPARATOR).cmp(other.split(SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", 0)]
    #[case("a", 1)]
    #[case("a/b", 2)]
    #[case("a/b/c.txt", 3)]
    fn counts_segments(#[case] path: &str, #[case] expected: usize) {
        assert_eq!(path.segment_count(), expected);
    }

    #[rstest]
    #[case("a.txt", "", "a.txt")]
    #[case("a/b.txt", "a", "b.txt")]
    #[case("a/b/c.txt", "a/b", "c.txt")]
    fn splits_parent_and_name(#[case] path: &str, #[case] parent: &str, #[case] name: &str) {
        assert_eq!(path.parent_path(), parent);
        assert_eq!(path.last_segment(), name);
    }

    #[rstest]
    #[case("a/b/c", "a/b/d", "a/b")]
    #[case("a/b", "a/c", "a")]
    #[case("a/b", "b/a", "")]
    #[case("ab/c", "a/c", "")]
    #[case("a/b", "a/b/c", "a/b")]
    #[case("a/b/c", "a/b", "a/b")]
    fn finds_common_prefix_by_segments(#[case] first: &str, #[case] second: &str, #[case] expected: &str) {
        assert_eq!(first.common_prefix(second), expected);
    }

    #[test]
    fn segment_order_keeps_subtrees_together() {
        let mut paths = vec!["a-b", "a/c", "a", "a/b"];
        paths.sort_by(|left, right| left.cmp_segments(right));
        assert_eq!(paths, vec!["a", "a/b", "a/c", "a-b"]);
    }
}
