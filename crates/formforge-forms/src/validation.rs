//! Validation-rule evaluation for submitted field values.
//!
//! Evaluation of one field short-circuits: the first failing check wins and
//! its message is reported.
//!
//! 1. A required element with an empty value (null or `""`) fails with
//!    `"This field is required"`, or with the message of a `required` rule
//!    on the element if one is present.
//! 2. Each rule in `element.validation` runs in order. A rule only applies to
//!    values of a compatible type (length rules to text, bounds to numbers);
//!    a rule meeting an incompatible value is skipped, not failed.
//! 3. If nothing failed the value is valid.
//!
//! Submissions validate every element and accumulate one message per
//! failing field; see [`Evaluator::validate_submission`].

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use formforge_core::FormForgeError;

use crate::document::FormDocument;
use crate::element::{FormElement, RuleKind, ValidationRule};

const REQUIRED_MESSAGE: &str = "This field is required";
const INVALID_VALUE_MESSAGE: &str = "Please enter a valid value";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// A submitted value for one field.
///
/// Deserializes from plain JSON: `null`, booleans, numbers, strings, and
/// arrays of strings (checklist selections). Anything else (objects, mixed
/// arrays) lands in [`FieldValue::Other`], which every built-in rule skips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Whether this value counts as "not filled in" for required checks.
    ///
    /// Only null and the empty string are empty; an empty checklist
    /// selection or `false` are answers.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::List(_) | Self::Other(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// The outcome of evaluating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub valid: bool,
    pub message: Option<String>,
}

impl Evaluation {
    pub const fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.valid
    }
}

/// A caller-supplied check for `custom` rules. Returns `true` if the value passes.
pub type CustomCheck = Box<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// Evaluates validation rules, with optional custom checks keyed by element id.
///
/// ```
/// use formforge_forms::catalog::ElementType;
/// use formforge_forms::document::FormDocument;
/// use formforge_forms::element::{ElementPatch, RuleKind, ValidationRule};
/// use formforge_forms::validation::{Evaluator, FieldValue};
///
/// let mut doc = FormDocument::new("Signup");
/// let id = doc.add(ElementType::SingleLine.template()).id().to_string();
/// doc.update(&id, ElementPatch::new().validation(vec![ValidationRule::new(RuleKind::Custom)]));
///
/// let mut evaluator = Evaluator::new();
/// evaluator.register_custom(&id, |v| v.as_text().is_some_and(|s| s != "admin"));
///
/// let element = doc.get(&id).unwrap();
/// assert!(!evaluator.evaluate(element, &FieldValue::from("admin")).is_valid());
/// assert!(evaluator.evaluate(element, &FieldValue::from("ada")).is_valid());
/// ```
#[derive(Default)]
pub struct Evaluator {
    custom: HashMap<String, CustomCheck>,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.custom.keys().collect();
        ids.sort();
        f.debug_struct("Evaluator").field("custom", &ids).finish()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the check used for `custom` rules on the element with `element_id`.
    /// Replaces any earlier check for that element.
    pub fn register_custom(
        &mut self,
        element_id: impl Into<String>,
        check: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) {
        self.custom.insert(element_id.into(), Box::new(check));
    }

    /// Evaluates `value` against `element`'s required flag and rules.
    pub fn evaluate(&self, element: &FormElement, value: &FieldValue) -> Evaluation {
        if element.required && value.is_empty() {
            let message = element
                .validation
                .iter()
                .find(|rule| rule.kind == RuleKind::Required)
                .and_then(|rule| rule.message.clone())
                .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
            return Evaluation::fail(message);
        }

        for rule in &element.validation {
            if let Some(message) = self.check_rule(element, rule, value) {
                return Evaluation::fail(message);
            }
        }

        Evaluation::pass()
    }

    /// Validates a whole submission. `values` maps element ids to submitted
    /// values; a missing entry counts as null.
    ///
    /// Every element is checked (no short-circuit across fields), and the
    /// returned [`FieldErrors`] lists failures in document order.
    pub fn validate_submission(
        &self,
        document: &FormDocument,
        values: &HashMap<String, FieldValue>,
    ) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for element in document.elements() {
            let value = values.get(element.id()).unwrap_or(&FieldValue::Null);
            errors.validate_field(self, element, value);
        }
        errors
    }

    /// Returns the failure message if `rule` rejects `value`.
    fn check_rule(
        &self,
        element: &FormElement,
        rule: &ValidationRule,
        value: &FieldValue,
    ) -> Option<String> {
        let message = |default: String| rule.message.clone().unwrap_or(default);

        match rule.kind {
            RuleKind::Required => value
                .is_empty()
                .then(|| message(REQUIRED_MESSAGE.to_string())),
            RuleKind::MinLength => {
                let text = value.as_text()?;
                let bound = rule.value.unwrap_or(0.0);
                (char_len(text) < bound)
                    .then(|| message(format!("Minimum length is {} characters", display_bound(rule))))
            }
            RuleKind::MaxLength => {
                let text = value.as_text()?;
                let bound = rule.value.unwrap_or(100.0);
                (char_len(text) > bound)
                    .then(|| message(format!("Maximum length is {} characters", display_bound(rule))))
            }
            RuleKind::Min => {
                let n = value.as_number()?;
                (n < rule.value.unwrap_or(0.0))
                    .then(|| message(format!("Minimum value is {}", display_bound(rule))))
            }
            RuleKind::Max => {
                let n = value.as_number()?;
                (n > rule.value.unwrap_or(100.0))
                    .then(|| message(format!("Maximum value is {}", display_bound(rule))))
            }
            RuleKind::Email => {
                let text = value.as_text()?;
                (!EMAIL_RE.is_match(text))
                    .then(|| message("Please enter a valid email address".to_string()))
            }
            RuleKind::Regex => {
                let text = value.as_text()?;
                let pattern = rule.regex.as_deref().filter(|p| !p.is_empty())?;
                match Regex::new(pattern) {
                    Ok(re) => (!re.is_match(text)).then(|| message(INVALID_VALUE_MESSAGE.to_string())),
                    Err(err) => {
                        tracing::warn!(
                            element = element.id(),
                            pattern,
                            error = %err,
                            "skipping regex rule with invalid pattern"
                        );
                        None
                    }
                }
            }
            RuleKind::Custom => {
                let check = self.custom.get(element.id())?;
                (!check(value)).then(|| message(INVALID_VALUE_MESSAGE.to_string()))
            }
        }
    }
}

/// Evaluates `value` against `element` with no custom checks registered.
pub fn evaluate(element: &FormElement, value: &FieldValue) -> Evaluation {
    Evaluator::new().evaluate(element, value)
}

#[allow(clippy::cast_precision_loss)]
fn char_len(text: &str) -> f64 {
    text.chars().count() as f64
}

/// The bound as written in messages. An unset bound reports its default.
fn display_bound(rule: &ValidationRule) -> String {
    rule.value.map_or_else(
        || match rule.kind {
            RuleKind::MaxLength | RuleKind::Max => "100".to_string(),
            _ => "0".to_string(),
        },
        |v| v.to_string(),
    )
}

/// The latest error per field, in the order fields were first flagged.
///
/// A field that later passes has its error cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one field and records or clears its error.
    /// Returns `true` if the field is valid.
    pub fn validate_field(
        &mut self,
        evaluator: &Evaluator,
        element: &FormElement,
        value: &FieldValue,
    ) -> bool {
        let evaluation = evaluator.evaluate(element, value);
        match evaluation.message {
            Some(message) if !evaluation.valid => {
                self.set(element.id(), message);
                false
            }
            _ => {
                self.clear_field(element.id());
                true
            }
        }
    }

    pub fn get(&self, element_id: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(id, _)| id == element_id)
            .map(|(_, msg)| msg.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(id, msg)| (id.as_str(), msg.as_str()))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Converts to `Ok(())` when empty, or a [`FormForgeError::Validation`]
    /// carrying every `(element_id, message)` pair.
    pub fn into_result(self) -> Result<(), FormForgeError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormForgeError::Validation(self.errors))
        }
    }

    fn set(&mut self, element_id: &str, message: String) {
        if let Some(entry) = self.errors.iter_mut().find(|(id, _)| id == element_id) {
            entry.1 = message;
        } else {
            self.errors.push((element_id.to_string(), message));
        }
    }

    fn clear_field(&mut self, element_id: &str) {
        self.errors.retain(|(id, _)| id != element_id);
    }
}
