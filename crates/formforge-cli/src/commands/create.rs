//! The `create` command.

use async_trait::async_trait;
use formforge_core::{FormForgeError, Settings};

use super::{load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Creates an empty form.
pub struct CreateCommand;

#[async_trait]
impl ManagementCommand for CreateCommand {
    fn name(&self) -> &'static str {
        "create"
    }

    fn help(&self) -> &'static str {
        "Create a new, empty form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("title")
                .required(true)
                .help("Title of the new form"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let mut store = load_store(settings).await?;
        let summary = store.create(string_arg(matches, "title")?)?.clone();
        save_store(&store, settings).await?;
        tracing::info!(id = %summary.id, "Form created successfully");
        println!("{}", summary.id);
        Ok(())
    }
}
