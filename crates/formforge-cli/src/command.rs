//! Management command framework.
//!
//! A [`ManagementCommand`] names itself, declares its clap arguments, and
//! handles a parsed invocation. The [`CommandRegistry`] assembles registered
//! commands into one clap CLI and dispatches to them.
//!
//! ## Defining a command
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use formforge_cli::command::ManagementCommand;
//! use formforge_core::{FormForgeError, Settings};
//!
//! struct WhereCommand;
//!
//! #[async_trait]
//! impl ManagementCommand for WhereCommand {
//!     fn name(&self) -> &'static str { "where" }
//!     fn help(&self) -> &'static str { "Print the store path" }
//!
//!     async fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &Settings,
//!     ) -> Result<(), FormForgeError> {
//!         println!("{}", settings.store_path.display());
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use formforge_core::logging::command_span;
use formforge_core::{FormForgeError, Settings};
use tracing::Instrument;

/// A subcommand of the `formforge` binary.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One-line help shown in `formforge --help`.
    fn help(&self) -> &'static str;

    /// Adds this command's arguments. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError>;
}

/// Registered commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(|command| &**command)
    }

    /// Registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap command with one subcommand per registered
    /// command, plus the global `--config` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formforge")
            .about("Build, validate, and export forms")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                clap::Arg::new("config")
                    .long("config")
                    .short('c')
                    .global(true)
                    .value_name("PATH")
                    .help("Settings file (TOML, or JSON with a .json extension)"),
            );

        for name in self.list_commands() {
            if let Some(cmd) = self.get(name) {
                let subcmd = clap::Command::new(name).about(cmd.help());
                app = app.subcommand(cmd.add_arguments(subcmd));
            }
        }

        app
    }

    /// Runs the subcommand selected in `matches` inside a `command` span.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no registered subcommand was selected,
    /// otherwise whatever the command returns.
    pub async fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| FormForgeError::InvalidArgument("No subcommand specified".to_string()))?;

        let cmd = self
            .get(name)
            .ok_or_else(|| FormForgeError::InvalidArgument(format!("Unknown command: {name}")))?;

        cmd.handle(sub_matches, settings)
            .instrument(command_span(name))
            .await
    }
}
