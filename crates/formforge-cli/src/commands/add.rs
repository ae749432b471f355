//! The `add` command: drops a new element at the end of a form.

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::{ElementTemplate, ElementType};
use formforge_store::LocalStore;

use super::{form_id_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Appends an element to a form.
pub struct AddCommand;

/// Appends an element of `element_type` to the form `form_id` and returns the
/// new element's id. Without `label` the element gets its catalog label.
pub fn add_element(
    store: &mut LocalStore,
    form_id: &str,
    element_type: ElementType,
    label: Option<&str>,
) -> FormForgeResult<String> {
    let mut document = store.document(form_id)?.clone();
    let template = match label {
        Some(label) => ElementTemplate::new(element_type, label),
        None => element_type.template(),
    };
    let id = document.add(template).id().to_string();
    store.save_document(form_id, document)?;
    tracing::info!(form = form_id, element = %id, "added element");
    Ok(id)
}

#[async_trait]
impl ManagementCommand for AddCommand {
    fn name(&self) -> &'static str {
        "add"
    }

    fn help(&self) -> &'static str {
        "Add an element to the end of a form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg())
            .arg(
                clap::Arg::new("type")
                    .required(true)
                    .value_name("TYPE")
                    .help("Element type, e.g. single-line or dropdown (see `formforge catalog`)"),
            )
            .arg(
                clap::Arg::new("label")
                    .long("label")
                    .short('l')
                    .help("Label of the new element"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let element_type: ElementType = string_arg(matches, "type")?.parse()?;
        let label = matches.get_one::<String>("label").map(String::as_str);

        let mut store = load_store(settings).await?;
        let id = add_element(&mut store, string_arg(matches, "form")?, element_type, label)?;
        save_store(&store, settings).await?;
        println!("{id}");
        Ok(())
    }
}
