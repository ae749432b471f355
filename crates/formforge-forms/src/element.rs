//! Form elements and their attributes.
//!
//! A [`FormElement`] is one field or layout block placed on the canvas. Its
//! `id` and `index` are owned by the [`FormDocument`](crate::document::FormDocument):
//! the id is assigned once on drop and never changes, and the index is
//! re-derived from the element's position after every structural change.
//! Everything else is plain data that the properties editor replaces through
//! an [`ElementPatch`].
//!
//! Serialization uses the camelCase keys of the JSON export format.

use serde::{Deserialize, Serialize, Serializer};

use crate::catalog::ElementType;

/// The drop payload a drag source hands the canvas: a kind and a label.
///
/// The canvas assigns `id` and `index` on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementTemplate {
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub label: String,
}

impl ElementTemplate {
    pub fn new(element_type: ElementType, label: impl Into<String>) -> Self {
        Self {
            element_type,
            label: label.into(),
        }
    }
}

/// One `{label, value}` choice of a checklist, multi-choice, or dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

impl ChoiceOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The `n`th generated option (1-based): `Option n` / `optionn`.
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("Option {n}"), format!("option{n}"))
    }

    /// The three placeholder options shown for a choice element that has
    /// not been given any.
    pub fn placeholders() -> Vec<Self> {
        (1..=3).map(Self::numbered).collect()
    }
}

/// Free-form visual attributes of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl ElementStyle {
    /// Returns `true` if no attribute is set.
    pub const fn is_empty(&self) -> bool {
        self.padding.is_none()
            && self.margin.is_none()
            && self.color.is_none()
            && self.background_color.is_none()
    }

    /// Renders the set attributes as an inline CSS declaration list,
    /// e.g. `padding: 16px; color: #333`.
    pub fn to_css(&self) -> String {
        [
            ("padding", &self.padding),
            ("margin", &self.margin),
            ("color", &self.color),
            ("background-color", &self.background_color),
        ]
        .into_iter()
        .filter_map(|(prop, value)| value.as_ref().map(|v| format!("{prop}: {v}")))
        .collect::<Vec<_>>()
        .join("; ")
    }
}

/// The kind of a [`ValidationRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    Regex,
    Email,
    Custom,
}

impl RuleKind {
    pub const ALL: [Self; 8] = [
        Self::Required,
        Self::MinLength,
        Self::MaxLength,
        Self::Min,
        Self::Max,
        Self::Regex,
        Self::Email,
        Self::Custom,
    ];

    /// The serialized name (`"minLength"`, `"email"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Regex => "regex",
            Self::Email => "email",
            Self::Custom => "custom",
        }
    }

    /// Whether rules of this kind carry a numeric bound in `value`.
    pub const fn takes_bound(self) -> bool {
        matches!(self, Self::MinLength | Self::MaxLength | Self::Min | Self::Max)
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for RuleKind {
    type Err = formforge_core::FormForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                formforge_core::FormForgeError::InvalidArgument(format!(
                    "Unknown validation rule: {s}"
                ))
            })
    }
}

/// One constraint attached to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Numeric bound for length and min/max rules.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_bound"
    )]
    pub value: Option<f64>,
    /// Pattern for regex rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Failure text; a generated default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    pub const fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            value: None,
            regex: None,
            message: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        self.regex = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Writes whole bounds as integers so exports read `"value": 5`, not `5.0`.
#[allow(clippy::cast_possible_truncation)]
fn serialize_bound<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => serializer.serialize_i64(*n as i64),
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}

/// One placed field or block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub label: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl FormElement {
    /// Builds a fresh element from a drop payload. Only the document calls
    /// this, since it owns id allocation and positions.
    pub(crate) fn from_template(id: String, index: usize, template: ElementTemplate) -> Self {
        Self {
            id,
            element_type: template.element_type,
            label: template.label,
            index,
            required: false,
            placeholder: None,
            default_value: None,
            options: None,
            validation: Vec::new(),
            style: None,
        }
    }

    /// The stable id assigned when the element was dropped.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The element's position in its document.
    pub const fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The options to present: the element's own, or the placeholder trio
    /// for a choice element that has none. Empty for non-choice kinds.
    pub fn effective_options(&self) -> Vec<ChoiceOption> {
        if !self.element_type.has_options() {
            return Vec::new();
        }
        self.options
            .clone()
            .unwrap_or_else(ChoiceOption::placeholders)
    }

    /// Shallow-merges `patch` into this element. `id`, `index`, and the
    /// element type are never touched; options are dropped for kinds that
    /// cannot hold them.
    pub(crate) fn apply(&mut self, patch: ElementPatch) {
        let ElementPatch {
            label,
            required,
            placeholder,
            default_value,
            options,
            validation,
            style,
        } = patch;

        if let Some(label) = label {
            self.label = label;
        }
        if let Some(required) = required {
            self.required = required;
        }
        if let Some(placeholder) = placeholder {
            self.placeholder = placeholder;
        }
        if let Some(default_value) = default_value {
            self.default_value = default_value;
        }
        if let Some(options) = options {
            self.options = options;
        }
        if let Some(validation) = validation {
            self.validation = validation;
        }
        if let Some(style) = style {
            self.style = style.filter(|s| !s.is_empty());
        }
        self.enforce_options_invariant();
    }

    pub(crate) fn enforce_options_invariant(&mut self) {
        if !self.element_type.has_options() {
            self.options = None;
        }
    }
}

/// A partial update to a [`FormElement`].
///
/// Each `Some` field replaces the element's value; `None` leaves it alone.
/// Optional attributes use a nested `Option` so a patch can also clear them.
///
/// ```
/// use formforge_forms::element::ElementPatch;
///
/// let patch = ElementPatch::new().label("Email").required(true).placeholder(None);
/// assert_eq!(patch.label.as_deref(), Some("Email"));
/// assert_eq!(patch.placeholder, Some(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub placeholder: Option<Option<String>>,
    pub default_value: Option<Option<String>>,
    pub options: Option<Option<Vec<ChoiceOption>>>,
    pub validation: Option<Vec<ValidationRule>>,
    pub style: Option<Option<ElementStyle>>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn default_value(mut self, default_value: Option<String>) -> Self {
        self.default_value = Some(default_value);
        self
    }

    #[must_use]
    pub fn options(mut self, options: Option<Vec<ChoiceOption>>) -> Self {
        self.options = Some(options);
        self
    }

    #[must_use]
    pub fn validation(mut self, validation: Vec<ValidationRule>) -> Self {
        self.validation = Some(validation);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Option<ElementStyle>) -> Self {
        self.style = Some(style);
        self
    }

    /// Returns `true` if applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(ty: ElementType) -> FormElement {
        FormElement::from_template("el-1".into(), 0, ty.template())
    }

    #[test]
    fn test_serializes_with_export_keys() {
        let mut el = element(ElementType::SingleLine);
        el.default_value = Some("hi".into());
        el.validation.push(ValidationRule::new(RuleKind::MinLength).with_value(5.0));

        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["id"], "el-1");
        assert_eq!(json["type"], "single-line");
        assert_eq!(json["defaultValue"], "hi");
        assert_eq!(json["validation"][0]["type"], "minLength");
        assert_eq!(json["validation"][0]["value"], 5);
        assert!(json.get("placeholder").is_none());
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_fractional_bound_stays_float() {
        let rule = ValidationRule::new(RuleKind::Max).with_value(2.5);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["value"], 2.5);
    }

    #[test]
    fn test_deserialize_minimal_element() {
        let el: FormElement =
            serde_json::from_str(r#"{"id": "heading-1", "type": "heading", "label": "Intro"}"#)
                .unwrap();
        assert_eq!(el.id(), "heading-1");
        assert_eq!(el.index(), 0);
        assert!(!el.required);
        assert!(el.validation.is_empty());
    }

    #[test]
    fn test_apply_patch_merges_shallowly() {
        let mut el = element(ElementType::SingleLine);
        el.placeholder = Some("old".into());

        el.apply(ElementPatch::new().label("Name").required(true));
        assert_eq!(el.label, "Name");
        assert!(el.required);
        assert_eq!(el.placeholder.as_deref(), Some("old"));

        el.apply(ElementPatch::new().placeholder(None));
        assert!(el.placeholder.is_none());
        assert_eq!(el.id(), "el-1");
    }

    #[test]
    fn test_apply_drops_options_on_non_choice_kind() {
        let mut el = element(ElementType::Number);
        el.apply(ElementPatch::new().options(Some(ChoiceOption::placeholders())));
        assert!(el.options.is_none());

        let mut choice = element(ElementType::Dropdown);
        choice.apply(ElementPatch::new().options(Some(vec![ChoiceOption::numbered(1)])));
        assert_eq!(choice.options.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_apply_empty_style_clears_it() {
        let mut el = element(ElementType::Heading);
        el.apply(ElementPatch::new().style(Some(ElementStyle::default())));
        assert!(el.style.is_none());
    }

    #[test]
    fn test_effective_options() {
        assert_eq!(element(ElementType::Checklist).effective_options().len(), 3);
        assert!(element(ElementType::Combobox).effective_options().is_empty());
    }

    #[test]
    fn test_style_to_css() {
        let style = ElementStyle {
            padding: Some("16px".into()),
            background_color: Some("#fff".into()),
            ..ElementStyle::default()
        };
        assert_eq!(style.to_css(), "padding: 16px; background-color: #fff");
        assert!(ElementStyle::default().to_css().is_empty());
    }

    #[test]
    fn test_rule_kind_names() {
        assert_eq!("maxLength".parse::<RuleKind>().unwrap(), RuleKind::MaxLength);
        assert!("length".parse::<RuleKind>().is_err());
        assert!(RuleKind::Min.takes_bound());
        assert!(!RuleKind::Email.takes_bound());
    }
}
