mod best_effort_path_ext;
mod path_segments_ext;

pub use best_effort_path_ext::BestEffortPathExt;
pub use path_segments_ext::PathSegmentsExt;
