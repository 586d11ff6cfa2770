use clap::ValueEnum;

/// How the change set is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ViewMode {
    /// Folder hierarchy with compressed transit folders
    #[default]
    Tree,
    /// Flat list of full paths
    List,
}
