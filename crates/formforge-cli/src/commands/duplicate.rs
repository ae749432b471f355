//! The `duplicate` command.

use async_trait::async_trait;
use formforge_core::{FormForgeError, Settings};

use super::{form_id_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Copies a form, elements included, under `"<title> (Copy)"`.
pub struct DuplicateCommand;

#[async_trait]
impl ManagementCommand for DuplicateCommand {
    fn name(&self) -> &'static str {
        "duplicate"
    }

    fn help(&self) -> &'static str {
        "Duplicate a form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let mut store = load_store(settings).await?;
        let copy = store.duplicate(string_arg(matches, "form")?)?.clone();
        save_store(&store, settings).await?;
        tracing::info!(id = %copy.id, title = %copy.title, "Form duplicated successfully");
        println!("{}", copy.id);
        Ok(())
    }
}
