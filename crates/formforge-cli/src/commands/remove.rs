//! The `remove` command.

use async_trait::async_trait;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::FormElement;
use formforge_store::LocalStore;

use super::{form_id_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Removes an element from a form.
pub struct RemoveCommand;

/// Removes element `element_id` from form `form_id`; later elements shift up.
pub fn remove_element(
    store: &mut LocalStore,
    form_id: &str,
    element_id: &str,
) -> FormForgeResult<FormElement> {
    let mut document = store.document(form_id)?.clone();
    let removed = document
        .remove(element_id)
        .ok_or_else(|| FormForgeError::NotFound(format!("element {element_id}")))?;
    store.save_document(form_id, document)?;
    Ok(removed)
}

#[async_trait]
impl ManagementCommand for RemoveCommand {
    fn name(&self) -> &'static str {
        "remove"
    }

    fn help(&self) -> &'static str {
        "Remove an element from a form"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(form_id_arg()).arg(
            clap::Arg::new("element")
                .required(true)
                .value_name("ELEMENT_ID"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let mut store = load_store(settings).await?;
        let removed = remove_element(
            &mut store,
            string_arg(matches, "form")?,
            string_arg(matches, "element")?,
        )?;
        save_store(&store, settings).await?;
        println!("Removed \"{}\"", removed.label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formforge_forms::ElementType;

    #[test]
    fn test_remove_reindexes() {
        let mut store = LocalStore::new();
        let form = store.create("ABC").unwrap().id.clone();
        let mut doc = store.document(&form).unwrap().clone();
        doc.add(ElementType::SingleLine.template());
        let b = doc.add(ElementType::Number.template()).id().to_string();
        doc.add(ElementType::Date.template());
        store.save_document(&form, doc).unwrap();

        let removed = remove_element(&mut store, &form, &b).unwrap();
        assert_eq!(removed.id(), b);
        let doc = store.document(&form).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.elements()[1].index(), 1);
        assert_eq!(doc.elements()[1].element_type, ElementType::Date);
    }

    #[test]
    fn test_remove_unknown_element() {
        let mut store = LocalStore::new();
        let form = store.create("Empty").unwrap().id.clone();
        let err = remove_element(&mut store, &form, "missing").unwrap_err();
        assert!(matches!(err, FormForgeError::NotFound(_)));
    }
}
