//! The `delete` command.

use async_trait::async_trait;
use formforge_core::{FormForgeError, Settings};

use super::{form_id_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Deletes a form and its saved document.
pub struct DeleteCommand;

#[async_trait]
impl ManagementCommand for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn help(&self) -> &'static str {
        "Delete a form"
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
        let removed = store.delete(string_arg(matches, "form")?)?;
        save_store(&store, settings).await?;
        println!("Deleted \"{}\"", removed.title);
        Ok(())
    }
}
