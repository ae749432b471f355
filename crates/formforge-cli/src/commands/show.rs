//! The `show` command: prints a form in its JSON save format.

use async_trait::async_trait;
use formforge_core::{FormForgeError, Settings};
use formforge_forms::to_json;

use super::{form_id_arg, load_store, string_arg};
use crate::command::ManagementCommand;

pub struct ShowCommand;

#[async_trait]
impl ManagementCommand for ShowCommand {
    fn name(&self) -> &'static str {
        "show"
    }

    fn help(&self) -> &'static str {
        "Print a form as JSON"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let store = load_store(settings).await?;
        let document = store.document(string_arg(matches, "form")?)?;
        println!("{}", to_json(document)?);
        Ok(())
    }
}
