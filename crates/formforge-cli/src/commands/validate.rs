//! The `validate` command: checks a submission against a form's rules.
//!
//! Values come as a JSON object mapping element ids to submitted values,
//! either inline (`--values`) or from a file (`--file`). Elements missing
//! from the object count as unanswered.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::{Evaluator, FieldErrors, FieldValue};
use formforge_store::LocalStore;

use super::{form_id_arg, load_store, string_arg};
use crate::command::ManagementCommand;

/// Validates a submission and exits non-zero when any field fails.
pub struct ValidateCommand;

/// Parses a JSON object of element id to submitted value.
///
/// # Errors
///
/// Returns `Serialization` if `json` is not such an object.
pub fn parse_values(json: &str) -> FormForgeResult<HashMap<String, FieldValue>> {
    Ok(serde_json::from_str(json)?)
}

/// Validates `values` against every element of form `form_id`.
pub fn validate_values(
    store: &LocalStore,
    form_id: &str,
    values: &HashMap<String, FieldValue>,
) -> FormForgeResult<FieldErrors> {
    let document = store.document(form_id)?;
    Ok(Evaluator::new().validate_submission(document, values))
}

#[async_trait]
impl ManagementCommand for ValidateCommand {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn help(&self) -> &'static str {
        "Validate submitted values against a form's rules"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
            .arg(
                clap::Arg::new("values")
                    .long("values")
                    .value_name("JSON")
                    .conflicts_with("file")
                    .help(r#"Submitted values, e.g. '{"single-line-1700000000000": "Ada"}'"#),
            )
            .arg(
                clap::Arg::new("file")
                    .long("file")
                    .value_name("PATH")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Read submitted values from a JSON file"),
            )
            .group(
                clap::ArgGroup::new("submission")
                    .args(["values", "file"])
                    .required(true),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let json = match matches.get_one::<PathBuf>("file") {
            Some(path) => tokio::fs::read_to_string(path).await?,
            None => string_arg(matches, "values")?.to_string(),
        };
        let values = parse_values(&json)?;

        let store = load_store(settings).await?;
        let form_id = string_arg(matches, "form")?;
        let errors = validate_values(&store, form_id, &values)?;

        if errors.is_empty() {
            println!("All fields valid");
        } else {
            let document = store.document(form_id)?;
            for (id, message) in errors.iter() {
                let label = document.get(id).map_or(id, |el| el.label.as_str());
                eprintln!("{label}: {message}");
            }
            tracing::warn!(form = form_id, failed = errors.len(), "submission failed validation");
        }
        errors.into_result()
    }
}
