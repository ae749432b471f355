use std::path::Path;
use std::process::ExitCode;

use formforge_cli::{register_builtin_commands, CommandRegistry};
use formforge_core::logging::setup_logging;
use formforge_core::{settings_loader, FormForgeError};

fn failure(err: &FormForgeError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);
    let matches = registry.build_cli().get_matches();

    let config = matches.get_one::<String>("config").map(Path::new);
    let settings = match settings_loader::load(config) {
        Ok(settings) => settings,
        Err(err) => return failure(&err),
    };
    setup_logging(&settings);

    match registry.execute(&matches, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => failure(&err),
    }
}
