use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel, ViewMode};
use crate::changes::InputFormat;

/// Shows a set of changed files as a compressed folder tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Change set file: YAML (`changes:` map) or `git diff --name-status` output
    pub input: PathBuf,

    /// Input format, detected from the file extension when omitted
    #[clap(long, short, value_enum)]
    pub format: Option<InputFormat>,

    #[clap(long, short, default_value = "tree", value_enum)]
    pub view: ViewMode,

    /// File or folder whose checkbox is toggled, cascading to its contents.
    /// A trailing `/` selects the folder when a file has the same path.
    #[clap(long, short)]
    pub toggle: Vec<String>,

    #[clap(long)]
    pub no_checkboxes: bool,

    /// Show only root folders, unless there is a single one
    #[clap(long)]
    pub collapsed: bool,

    #[clap(long, default_value = "auto", value_enum)]
    pub color: ColorChoice,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}
