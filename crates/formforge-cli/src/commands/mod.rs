//! Built-in commands of the `formforge` binary.
//!
//! Each command keeps its logic in a plain function over a [`LocalStore`]
//! (so it can be tested without a terminal) and a thin
//! [`ManagementCommand`](crate::command::ManagementCommand) wrapper that loads
//! the store from settings, calls it, saves, and prints.

pub mod add;
pub mod catalog;
pub mod create;
pub mod delete;
pub mod duplicate;
pub mod edit;
pub mod export;
pub mod list;
pub mod move_element;
pub mod remove;
pub mod show;
pub mod validate;

pub use add::AddCommand;
pub use catalog::CatalogCommand;
pub use create::CreateCommand;
pub use delete::DeleteCommand;
pub use duplicate::DuplicateCommand;
pub use edit::EditCommand;
pub use export::ExportCommand;
pub use list::ListCommand;
pub use move_element::MoveCommand;
pub use remove::RemoveCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;

use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_store::LocalStore;

use crate::command::CommandRegistry;

/// Registers every built-in command.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CatalogCommand));
    registry.register(Box::new(CreateCommand));
    registry.register(Box::new(ListCommand));
    registry.register(Box::new(DuplicateCommand));
    registry.register(Box::new(DeleteCommand));
    registry.register(Box::new(AddCommand));
    registry.register(Box::new(RemoveCommand));
    registry.register(Box::new(MoveCommand));
    registry.register(Box::new(EditCommand));
    registry.register(Box::new(ShowCommand));
    registry.register(Box::new(ExportCommand));
    registry.register(Box::new(ValidateCommand));
}

pub(crate) async fn load_store(settings: &Settings) -> FormForgeResult<LocalStore> {
    LocalStore::load(&settings.store_path).await
}

pub(crate) async fn save_store(store: &LocalStore, settings: &Settings) -> FormForgeResult<()> {
    store.save(&settings.store_path).await
}

/// The value of a required string argument.
pub(crate) fn string_arg<'a>(matches: &'a clap::ArgMatches, name: &str) -> FormForgeResult<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| FormForgeError::InvalidArgument(format!("Missing argument: {name}")))
}

/// The value of a required `usize` argument.
pub(crate) fn index_arg(matches: &clap::ArgMatches, name: &str) -> FormForgeResult<usize> {
    matches
        .get_one::<usize>(name)
        .copied()
        .ok_or_else(|| FormForgeError::InvalidArgument(format!("Missing argument: {name}")))
}

pub(crate) fn form_id_arg() -> clap::Arg {
    clap::Arg::new("form")
        .required(true)
        .value_name("FORM_ID")
        .help("Id of the form (see `formforge list`)")
}
