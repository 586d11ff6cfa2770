use std::path::PathBuf;

use crate::application::data::{ColorChoice, ViewMode};
use crate::changes::InputFormat;
use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    pub format: Option<InputFormat>,
    pub view: ViewMode,
    /// Paths toggled in order, starting from everything checked
    pub toggles: Vec<String>,
    pub show_checkboxes: bool,
    pub collapsed: bool,
    pub color: ColorChoice,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            format: cli.format,
            view: cli.view,
            toggles: cli.toggle,
            show_checkboxes: !cli.no_checkboxes,
            collapsed: cli.collapsed,
            color: cli.color,
        }
    }
}
