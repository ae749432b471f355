//! The `move` command: reorders one element.

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_store::LocalStore;

use super::{form_id_arg, index_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Moves the element at one position to another.
pub struct MoveCommand;

/// Moves the element at `from` to `to` in form `form_id`. A `to` past the end
/// moves to the last position. Returns `false` when nothing moved.
pub fn move_element(
    store: &mut LocalStore,
    form_id: &str,
    from: usize,
    to: usize,
) -> FormForgeResult<bool> {
    let mut document = store.document(form_id)?.clone();
    if !document.move_element(from, to) {
        return Ok(false);
    }
    store.save_document(form_id, document)?;
    Ok(true)
}

#[async_trait]
impl ManagementCommand for MoveCommand {
    fn name(&self) -> &'static str {
        "move"
    }

    fn help(&self) -> &'static str {
        "Move an element to another position (0-based)"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
            .arg(
                clap::Arg::new("from")
                    .required(true)
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                clap::Arg::new("to")
                    .required(true)
                    .value_parser(clap::value_parser!(usize)),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let from = index_arg(matches, "from")?;
        let to = index_arg(matches, "to")?;
        let mut store = load_store(settings).await?;
        if move_element(&mut store, string_arg(matches, "form")?, from, to)? {
            save_store(&store, settings).await?;
        } else {
            tracing::warn!(from, to, "nothing to move");
        }
        Ok(())
    }
}
