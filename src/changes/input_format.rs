use std::path::Path;

use clap::ValueEnum;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
pub enum InputFormat {
    /// `changes:` mapping of path to status name
    #[display("YAML")]
    Yaml,
    /// Output of `git diff --name-status`
    #[display("name-status")]
    NameStatus,
}

impl InputFormat {
    /// Guesses the format from the file extension.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("yaml" | "yml") => InputFormat::Yaml,
            _ => InputFormat::NameStatus,
        }
    }
}
