use snafu::prelude::*;

/// Checks that `path` is a normalized, relative, forward-slash path.
pub fn validate_path(path: &str) -> Result<(), InvalidPathError> {
    ensure!(!path.is_empty(), EmptyPathSnafu);
    ensure!(!path.starts_with('/'), AbsolutePathSnafu { path });
    ensure!(!path.ends_with('/'), TrailingSeparatorSnafu { path });

    for segment in path.split('/') {
        ensure!(!segment.is_empty(), EmptySegmentSnafu { path });
        ensure!(
            segment != "." && segment != "..",
            RelativeSegmentSnafu { path, segment }
        );
    }

    Ok(())
}

pub fn validate_paths<'a>(
    paths: impl IntoIterator<Item = &'a String>,
) -> Result<(), InvalidPathError> {
    paths.into_iter().try_for_each(|path| validate_path(path))
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    #[snafu(display("Path is empty"))]
    EmptyPath,
    #[snafu(display("Path '{}' is absolute", path))]
    AbsolutePath { path: String },
    #[snafu(display("Path '{}' ends with a separator", path))]
    TrailingSeparator { path: String },
    #[snafu(display("Path '{}' contains an empty segment", path))]
    EmptySegment { path: String },
    #[snafu(display("Path '{}' contains the relative segment '{}'", path, segment))]
    RelativeSegment { path: String, segment: String },
}
