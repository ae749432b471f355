//! The `edit` command: the properties panel on the command line.
//!
//! All requested changes are applied to one [`EditSession`] and committed
//! together, so a rejected change leaves the element untouched.

use async_trait::async_trait;
use formforge_core::utils::text::slugify;
use formforge_core::{FormForgeError, FormForgeResult, Settings};
use formforge_forms::{EditSession, FormElement, RuleKind};
use formforge_store::LocalStore;

use super::{form_id_arg, load_store, save_store, string_arg};
use crate::command::ManagementCommand;

/// Edits the properties of one element.
pub struct EditCommand;

/// The changes requested for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementEdits {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
    pub default_value: Option<String>,
    /// Labels of options to append.
    pub add_options: Vec<String>,
    /// Indices of options to remove.
    pub remove_options: Vec<usize>,
    /// Rules to append, as `KIND` or `KIND=VALUE`.
    pub add_rules: Vec<String>,
    /// Indices of rules to remove.
    pub remove_rules: Vec<usize>,
    pub padding: Option<String>,
    pub margin: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
}

impl ElementEdits {
    fn from_matches(matches: &clap::ArgMatches) -> Self {
        let string = |name: &str| matches.get_one::<String>(name).cloned();
        let strings = |name: &str| {
            matches
                .get_many::<String>(name)
                .map(|values| values.cloned().collect())
                .unwrap_or_default()
        };
        let indices = |name: &str| {
            matches
                .get_many::<usize>(name)
                .map(|values| values.copied().collect())
                .unwrap_or_default()
        };

        Self {
            label: string("label"),
            required: matches.get_one::<bool>("required").copied(),
            placeholder: string("placeholder"),
            default_value: string("default-value"),
            add_options: strings("add-option"),
            remove_options: indices("remove-option"),
            add_rules: strings("add-rule"),
            remove_rules: indices("remove-rule"),
            padding: string("padding"),
            margin: string("margin"),
            color: string("color"),
            background: string("background"),
        }
    }
}

/// Splits `KIND` or `KIND=VALUE` into a rule kind and its optional value.
///
/// # Errors
///
/// Returns `InvalidArgument` for an unknown rule kind.
pub fn parse_rule_spec(spec: &str) -> FormForgeResult<(RuleKind, Option<&str>)> {
    match spec.split_once('=') {
        Some((kind, value)) => Ok((kind.trim().parse()?, Some(value))),
        None => Ok((spec.trim().parse()?, None)),
    }
}

/// Applies `edits` to `session`. Removals run before additions, and indices
/// refer to the element as it was before this edit.
///
/// # Errors
///
/// Returns `InvalidArgument` for any change the element type does not
/// support (a placeholder on a checkbox, a `min` rule on a text field, ...).
pub fn apply_edits(session: &mut EditSession, edits: &ElementEdits) -> FormForgeResult<()> {
    if let Some(label) = &edits.label {
        session.set_label(label.as_str());
    }
    if let Some(required) = edits.required {
        session.set_required(required);
    }
    if let Some(placeholder) = &edits.placeholder {
        session.set_placeholder(placeholder.as_str())?;
    }
    if let Some(value) = &edits.default_value {
        session.set_default_value(value.as_str())?;
    }

    let mut remove_options = edits.remove_options.clone();
    remove_options.sort_unstable_by(|a, b| b.cmp(a));
    remove_options.dedup();
    for index in remove_options {
        if !session.remove_option(index)? {
            tracing::warn!(index, "keeping the only remaining option");
        }
    }
    for label in &edits.add_options {
        session.add_option()?;
        let index = session.options().len() - 1;
        session.update_option(index, label.as_str(), slugify(label))?;
    }

    let mut remove_rules = edits.remove_rules.clone();
    remove_rules.sort_unstable_by(|a, b| b.cmp(a));
    remove_rules.dedup();
    for index in remove_rules {
        if !session.remove_rule(index) {
            return Err(FormForgeError::InvalidArgument(format!(
                "No rule at index {index}"
            )));
        }
    }
    for spec in &edits.add_rules {
        let (kind, value) = parse_rule_spec(spec)?;
        session.add_rule(kind)?;
        let index = session.rules().len() - 1;
        if let Some(value) = value {
            if kind.takes_bound() {
                let bound = value.trim().parse::<f64>().map_err(|_| {
                    FormForgeError::InvalidArgument(format!("{kind} needs a number, got {value:?}"))
                })?;
                session.set_rule_value(index, bound)?;
            } else {
                session.set_rule_pattern(index, value)?;
            }
        }
    }

    let style = session.style_mut();
    let non_empty = |value: &String| (!value.is_empty()).then(|| value.clone());
    if let Some(padding) = &edits.padding {
        style.padding = non_empty(padding);
    }
    if let Some(margin) = &edits.margin {
        style.margin = non_empty(margin);
    }
    if let Some(color) = &edits.color {
        style.color = non_empty(color);
    }
    if let Some(background) = &edits.background {
        style.background_color = non_empty(background);
    }
    Ok(())
}

/// Applies `edits` to element `element_id` of form `form_id` and returns the
/// element as saved.
pub fn edit_element(
    store: &mut LocalStore,
    form_id: &str,
    element_id: &str,
    edits: &ElementEdits,
) -> FormForgeResult<FormElement> {
    let mut document = store.document(form_id)?.clone();
    let mut session = EditSession::open(&document, element_id)?;
    apply_edits(&mut session, edits)?;
    session.commit(&mut document);

    let element = document
        .get(element_id)
        .cloned()
        .ok_or_else(|| FormForgeError::NotFound(format!("element {element_id}")))?;
    store.save_document(form_id, document)?;
    Ok(element)
}

#[async_trait]
impl ManagementCommand for EditCommand {
    fn name(&self) -> &'static str {
        "edit"
    }

    fn help(&self) -> &'static str {
        "Edit the properties of an element"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        let text = |name: &'static str, help: &'static str| {
            clap::Arg::new(name).long(name).value_name("TEXT").help(help)
        };
        let repeated = |name: &'static str, value_name: &'static str, help: &'static str| {
            clap::Arg::new(name)
                .long(name)
                .value_name(value_name)
                .action(clap::ArgAction::Append)
                .help(help)
        };

        cmd.arg(form_id_arg())
            .arg(clap::Arg::new("element").required(true).value_name("ELEMENT_ID"))
            .arg(text("label", "New label"))
            .arg(
                clap::Arg::new("required")
                    .long("required")
                    .value_name("BOOL")
                    .value_parser(clap::value_parser!(bool))
                    .help("Whether an answer is required"),
            )
            .arg(text("placeholder", "Placeholder text; empty clears it"))
            .arg(text("default-value", "Default value; empty clears it"))
            .arg(repeated("add-option", "LABEL", "Append an option (choice elements)"))
            .arg(
                repeated("remove-option", "INDEX", "Remove the option at INDEX (0-based)")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(repeated(
                "add-rule",
                "KIND[=VALUE]",
                "Append a validation rule, e.g. required, minLength=3, regex=^[A-Z]",
            ))
            .arg(
                repeated("remove-rule", "INDEX", "Remove the rule at INDEX (0-based)")
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(text("padding", "CSS padding"))
            .arg(text("margin", "CSS margin"))
            .arg(text("color", "CSS text color"))
            .arg(text("background", "CSS background color"))
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormForgeError> {
        let edits = ElementEdits::from_matches(matches);
        let mut store = load_store(settings).await?;
        let element = edit_element(
            &mut store,
            string_arg(matches, "form")?,
            string_arg(matches, "element")?,
            &edits,
        )?;
        save_store(&store, settings).await?;
        println!("{}", serde_json::to_string_pretty(&element)?);
        Ok(())
    }
}
