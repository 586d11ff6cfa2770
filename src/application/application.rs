use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::data::ViewMode;
use crate::changes::{ChangeSet, ChangeSetError};
use crate::render::TreeRenderer;
use crate::tree::{InvalidPathError, PathTreeBuilder, Selection, SelectionError};

pub struct Application;

impl Application {
    pub async fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let change_set = ChangeSet::read(&runtime_config.input, runtime_config.format)
            .await
            .context(ChangeSetSnafu)?;
        if change_set.is_empty() {
            info!("No changes to display");
        } else {
            info!("Loaded {} changed files", change_set.len());
        }

        let colorize = runtime_config.color.should_colorize();
        colored::control::set_override(colorize);

        print!("{}", Self::present(&runtime_config, &change_set, colorize)?);
        Ok(())
    }

    /// Builds, selects and renders the change set, followed by a summary
    /// line.
    fn present(
        runtime_config: &RuntimeConfig,
        change_set: &ChangeSet,
        colorize: bool,
    ) -> Result<String, ApplicationError> {
        let tree = match runtime_config.view {
            ViewMode::Tree => PathTreeBuilder::build_tree(change_set.entries()),
            ViewMode::List => PathTreeBuilder::build_list(change_set.entries()),
        }
        .context(InvalidPathSnafu)?;
        if tree.is_empty() {
            return Ok(String::new());
        }
        debug!(
            "Built {} root nodes in {:?} view",
            tree.roots().len(),
            runtime_config.view
        );

        let selection = runtime_config.toggles.iter().try_fold(
            Selection::all_checked(),
            |selection, path| -> Result<Selection, ApplicationError> {
                let key = tree
                    .resolve_key(path)
                    .context(UnknownTogglePathSnafu { path })?;
                selection.toggle(&tree, &key).context(SelectionSnafu)
            },
        )?;

        let renderer = TreeRenderer {
            show_checkboxes: runtime_config.show_checkboxes,
            colorize,
            collapsed: runtime_config.collapsed,
            ..TreeRenderer::default()
        };
        let mut output = renderer.render(&tree, &selection);
        output.push_str(&format!(
            "{} of {} files selected\n",
            selection.checked_files(&tree).len(),
            tree.file_count()
        ));

        Ok(output)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load the change set"))]
    ChangeSetError { source: ChangeSetError },
    #[snafu(display("The change set contains an invalid path"))]
    InvalidPathError { source: InvalidPathError },
    #[snafu(display("Cannot toggle '{}': no such file or folder among the changes", path))]
    UnknownTogglePath { path: String },
    #[snafu(display("Failed to update the selection"))]
    SelectionError { source: SelectionError },
}
