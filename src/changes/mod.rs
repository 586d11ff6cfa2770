//! Change sets: the flat `path -> status` mapping the tree is built from.

mod change_set;
mod input_format;
mod status;

pub use change_set::{ChangeSet, ChangeSetError};
pub use input_format::InputFormat;
pub use status::FileStatus;
