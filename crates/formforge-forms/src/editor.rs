//! The properties editor's edit buffer.
//!
//! An [`EditSession`] copies one element's editable attributes into a draft.
//! Nothing reaches the document until [`EditSession::commit`], which writes
//! the whole draft back as a single full-field replace; dropping the session
//! (or calling [`EditSession::cancel`]) discards it.
//!
//! Text attributes are buffered as plain strings where an empty string means
//! "unset", matching what a text box holds.

use formforge_core::{FormForgeError, FormForgeResult};

use crate::catalog::ElementType;
use crate::document::FormDocument;
use crate::element::{ChoiceOption, ElementPatch, ElementStyle, FormElement, RuleKind, ValidationRule};

/// A draft of one element's properties.
///
/// ```
/// use formforge_forms::catalog::ElementType;
/// use formforge_forms::document::FormDocument;
/// use formforge_forms::editor::EditSession;
/// use formforge_forms::element::RuleKind;
///
/// let mut doc = FormDocument::new("Signup");
/// let id = doc.add(ElementType::SingleLine.template()).id().to_string();
///
/// let mut session = EditSession::open(&doc, &id).unwrap();
/// session.set_label("Email");
/// session.set_required(true);
/// session.add_rule(RuleKind::Email).unwrap();
/// assert!(session.commit(&mut doc));
///
/// let el = doc.get(&id).unwrap();
/// assert_eq!(el.label, "Email");
/// assert_eq!(el.validation[0].message.as_deref(), Some("Invalid email"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    element_id: String,
    element_type: ElementType,
    label: String,
    required: bool,
    placeholder: String,
    default_value: String,
    options: Vec<ChoiceOption>,
    validation: Vec<ValidationRule>,
    style: ElementStyle,
}

impl EditSession {
    /// Opens a draft of the element with `element_id`.
    ///
    /// A choice element with no options starts from a single `Option 1`.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::NotFound`] if the document has no such element.
    pub fn open(document: &FormDocument, element_id: &str) -> FormForgeResult<Self> {
        let element = document
            .get(element_id)
            .ok_or_else(|| FormForgeError::NotFound(format!("element {element_id}")))?;
        tracing::debug!(id = element_id, "opening edit session");
        Ok(Self::from_element(element))
    }

    fn from_element(element: &FormElement) -> Self {
        let options = if element.element_type.has_options() {
            element
                .options
                .clone()
                .unwrap_or_else(|| vec![ChoiceOption::numbered(1)])
        } else {
            Vec::new()
        };
        Self {
            element_id: element.id().to_string(),
            element_type: element.element_type,
            label: element.label.clone(),
            required: element.required,
            placeholder: element.placeholder.clone().unwrap_or_default(),
            default_value: element.default_value.clone().unwrap_or_default(),
            options,
            validation: element.validation.clone(),
            style: element.style.clone().unwrap_or_default(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn required(&self) -> bool {
        self.required
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.validation
    }

    pub const fn style(&self) -> &ElementStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for element types without a placeholder.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> FormForgeResult<()> {
        if !self.element_type.supports_placeholder() {
            return Err(self.unsupported("a placeholder"));
        }
        self.placeholder = placeholder.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for element types without a default value.
    pub fn set_default_value(&mut self, value: impl Into<String>) -> FormForgeResult<()> {
        if !self.element_type.supports_default_value() {
            return Err(self.unsupported("a default value"));
        }
        self.default_value = value.into();
        Ok(())
    }

    /// Appends the next numbered option (`Option N` / `optionN`).
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for non-choice element types.
    pub fn add_option(&mut self) -> FormForgeResult<&ChoiceOption> {
        self.require_options()?;
        let n = self.options.len() + 1;
        self.options.push(ChoiceOption::numbered(n));
        Ok(&self.options[n - 1])
    }

    /// Replaces the label and value of the option at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for non-choice element
    /// types or an out-of-range index.
    pub fn update_option(
        &mut self,
        index: usize,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> FormForgeResult<()> {
        self.require_options()?;
        let option = self
            .options
            .get_mut(index)
            .ok_or_else(|| FormForgeError::InvalidArgument(format!("No option at index {index}")))?;
        option.label = label.into();
        option.value = value.into();
        Ok(())
    }

    /// Removes the option at `index`, unless it is the last one left.
    ///
    /// Returns `Ok(false)` when refusing to remove the only option.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for non-choice element
    /// types or an out-of-range index.
    pub fn remove_option(&mut self, index: usize) -> FormForgeResult<bool> {
        self.require_options()?;
        if index >= self.options.len() {
            return Err(FormForgeError::InvalidArgument(format!(
                "No option at index {index}"
            )));
        }
        if self.options.len() <= 1 {
            return Ok(false);
        }
        self.options.remove(index);
        Ok(true)
    }

    /// Appends a rule of `kind` with its starting values: bounds of 1 / 100
    /// for lengths and 0 / 100 for numbers, pattern `.*` for regex, and the
    /// message `Invalid <kind>`.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] if `kind` does not apply to
    /// this element type.
    pub fn add_rule(&mut self, kind: RuleKind) -> FormForgeResult<&ValidationRule> {
        if !self.element_type.allows_rule(kind) {
            return Err(FormForgeError::InvalidArgument(format!(
                "{kind} rules cannot be added to {} elements",
                self.element_type
            )));
        }
        let mut rule = ValidationRule::new(kind).with_message(format!("Invalid {kind}"));
        match kind {
            RuleKind::MinLength => rule.value = Some(1.0),
            RuleKind::MaxLength | RuleKind::Max => rule.value = Some(100.0),
            RuleKind::Min => rule.value = Some(0.0),
            RuleKind::Regex => rule.regex = Some(".*".to_string()),
            RuleKind::Required | RuleKind::Email | RuleKind::Custom => {}
        }
        self.validation.push(rule);
        Ok(&self.validation[self.validation.len() - 1])
    }

    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for an out-of-range index,
    /// a rule kind without a bound, or a bound that is NaN or infinite.
    pub fn set_rule_value(&mut self, index: usize, value: f64) -> FormForgeResult<()> {
        let rule = self.rule_mut(index)?;
        if !rule.kind.takes_bound() {
            return Err(FormForgeError::InvalidArgument(format!(
                "{} rules take no numeric value",
                rule.kind
            )));
        }
        if !value.is_finite() {
            return Err(FormForgeError::InvalidArgument(format!(
                "{} bound must be a finite number, got {value}",
                rule.kind
            )));
        }
        rule.value = Some(value);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for an out-of-range index
    /// or a rule that is not a regex rule.
    pub fn set_rule_pattern(&mut self, index: usize, pattern: impl Into<String>) -> FormForgeResult<()> {
        let rule = self.rule_mut(index)?;
        if rule.kind != RuleKind::Regex {
            return Err(FormForgeError::InvalidArgument(format!(
                "{} rules take no pattern",
                rule.kind
            )));
        }
        rule.regex = Some(pattern.into());
        Ok(())
    }

    /// Sets the failure message of the rule at `index`; an empty message
    /// falls back to the generated default.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::InvalidArgument`] for an out-of-range index.
    pub fn set_rule_message(&mut self, index: usize, message: impl Into<String>) -> FormForgeResult<()> {
        let message = message.into();
        let rule = self.rule_mut(index)?;
        rule.message = (!message.is_empty()).then_some(message);
        Ok(())
    }

    /// Removes the rule at `index`. Returns `false` if there is none.
    pub fn remove_rule(&mut self, index: usize) -> bool {
        if index < self.validation.len() {
            self.validation.remove(index);
            true
        } else {
            false
        }
    }

    /// The full-field replacement this draft amounts to. Empty strings and
    /// an empty style become absent; options are only sent for choice types.
    pub fn to_patch(&self) -> ElementPatch {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let options = self
            .element_type
            .has_options()
            .then(|| self.options.clone());
        let style = (!self.style.is_empty()).then(|| self.style.clone());

        ElementPatch::new()
            .label(self.label.clone())
            .required(self.required)
            .placeholder(non_empty(&self.placeholder))
            .default_value(non_empty(&self.default_value))
            .options(options)
            .validation(self.validation.clone())
            .style(style)
    }

    /// Writes the draft into `document`. Returns `false` if the element has
    /// been removed in the meantime.
    pub fn commit(self, document: &mut FormDocument) -> bool {
        let patch = self.to_patch();
        let updated = document.update(&self.element_id, patch);
        tracing::debug!(id = %self.element_id, updated, "committed edit session");
        updated
    }

    /// Discards the draft.
    pub fn cancel(self) {
        tracing::debug!(id = %self.element_id, "discarded edit session");
    }

    fn rule_mut(&mut self, index: usize) -> FormForgeResult<&mut ValidationRule> {
        self.validation
            .get_mut(index)
            .ok_or_else(|| FormForgeError::InvalidArgument(format!("No validation rule at index {index}")))
    }

    fn require_options(&self) -> FormForgeResult<()> {
        if self.element_type.has_options() {
            Ok(())
        } else {
            Err(self.unsupported("options"))
        }
    }

    fn unsupported(&self, what: &str) -> FormForgeError {
        FormForgeError::InvalidArgument(format!(
            "{} elements do not support {what}",
            self.element_type
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementTemplate;

    fn doc_with(ty: ElementType) -> (FormDocument, String) {
        let mut doc = FormDocument::new("T");
        let id = doc.add(ElementTemplate::new(ty, "Field")).id().to_string();
        (doc, id)
    }

    #[test]
    fn test_open_unknown_element() {
        let (doc, _) = doc_with(ElementType::SingleLine);
        assert!(matches!(
            EditSession::open(&doc, "nope"),
            Err(FormForgeError::NotFound(_))
        ));
    }

    #[test]
    fn test_draft_does_not_touch_document_until_commit() {
        let (mut doc, id) = doc_with(ElementType::SingleLine);
        let mut session = EditSession::open(&doc, &id).unwrap();
        session.set_label("Changed");
        assert_eq!(doc.get(&id).unwrap().label, "Field");

        session.commit(&mut doc);
        assert_eq!(doc.get(&id).unwrap().label, "Changed");
    }

    #[test]
    fn test_cancel_discards() {
        let (doc, id) = doc_with(ElementType::SingleLine);
        let before = doc.clone();
        let mut session = EditSession::open(&doc, &id).unwrap();
        session.set_label("Changed");
        session.cancel();
        assert_eq!(doc, before);
    }

    #[test]
    fn test_empty_strings_become_absent() {
        let (mut doc, id) = doc_with(ElementType::SingleLine);
        let mut session = EditSession::open(&doc, &id).unwrap();
        session.set_placeholder("you@example.com").unwrap();
        session.commit(&mut doc);
        assert_eq!(doc.get(&id).unwrap().placeholder.as_deref(), Some("you@example.com"));

        let mut session = EditSession::open(&doc, &id).unwrap();
        session.set_placeholder("").unwrap();
        session.style_mut().padding = Some("8px".into());
        session.commit(&mut doc);
        let el = doc.get(&id).unwrap();
        assert!(el.placeholder.is_none());
        assert_eq!(el.style.as_ref().and_then(|s| s.padding.as_deref()), Some("8px"));
    }

    #[test]
    fn test_capability_checks() {
        let (doc, id) = doc_with(ElementType::Date);
        let mut session = EditSession::open(&doc, &id).unwrap();
        assert!(session.set_placeholder("x").is_err());
        assert!(session.set_default_value("x").is_err());
        assert!(session.add_option().is_err());
        assert!(session.add_rule(RuleKind::MinLength).is_err());
        assert!(session.add_rule(RuleKind::Required).is_ok());
    }

    #[test]
    fn test_options_editing() {
        let (mut doc, id) = doc_with(ElementType::Dropdown);
        let mut session = EditSession::open(&doc, &id).unwrap();
        assert_eq!(session.options(), &[ChoiceOption::numbered(1)]);

        // The only option cannot be removed.
        assert!(!session.remove_option(0).unwrap());

        let added = session.add_option().unwrap().clone();
        assert_eq!(added, ChoiceOption::new("Option 2", "option2"));
        session.update_option(0, "Red", "red").unwrap();
        assert!(session.update_option(5, "x", "x").is_err());
        assert!(session.remove_option(1).unwrap());

        session.commit(&mut doc);
        assert_eq!(
            doc.get(&id).unwrap().options,
            Some(vec![ChoiceOption::new("Red", "red")])
        );
    }

    #[test]
    fn test_rule_defaults() {
        let (doc, id) = doc_with(ElementType::Number);
        let mut session = EditSession::open(&doc, &id).unwrap();
        assert_eq!(session.add_rule(RuleKind::Min).unwrap().value, Some(0.0));
        assert_eq!(session.add_rule(RuleKind::Max).unwrap().value, Some(100.0));
        assert!(session.add_rule(RuleKind::Email).is_err());

        let (doc, id) = doc_with(ElementType::SingleLine);
        let mut session = EditSession::open(&doc, &id).unwrap();
        let rule = session.add_rule(RuleKind::MinLength).unwrap().clone();
        assert_eq!(rule.value, Some(1.0));
        assert_eq!(rule.message.as_deref(), Some("Invalid minLength"));
        let rule = session.add_rule(RuleKind::Regex).unwrap().clone();
        assert_eq!(rule.regex.as_deref(), Some(".*"));
    }

    #[test]
    fn test_rule_editing() {
        let (doc, id) = doc_with(ElementType::SingleLine);
        let mut session = EditSession::open(&doc, &id).unwrap();
        session.add_rule(RuleKind::MaxLength).unwrap();
        session.add_rule(RuleKind::Regex).unwrap();

        session.set_rule_value(0, 20.0).unwrap();
        assert!(session.set_rule_value(1, 3.0).is_err());
        assert!(session.set_rule_value(0, f64::INFINITY).is_err());
        assert!(session.set_rule_value(0, f64::NAN).is_err());
        session.set_rule_pattern(1, "^[A-Z]").unwrap();
        assert!(session.set_rule_pattern(0, "x").is_err());
        session.set_rule_message(0, "").unwrap();

        assert_eq!(session.rules()[0].value, Some(20.0));
        assert!(session.rules()[0].message.is_none());
        assert_eq!(session.rules()[1].regex.as_deref(), Some("^[A-Z]"));

        assert!(session.remove_rule(0));
        assert!(!session.remove_rule(5));
        assert_eq!(session.rules().len(), 1);
    }

    #[test]
    fn test_commit_after_element_removed() {
        let (mut doc, id) = doc_with(ElementType::Checkbox);
        let session = EditSession::open(&doc, &id).unwrap();
        doc.remove(&id);
        assert!(!session.commit(&mut doc));
    }
}
