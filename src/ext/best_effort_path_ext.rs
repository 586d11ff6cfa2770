use std::path::Path;

/// Displays a path canonicalized when it exists, as given otherwise.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        match self.canonicalize() {
            Ok(canonical_path) => canonical_path.display().to_string(),
            Err(_) => self.display().to_string(),
        }
    }
}
