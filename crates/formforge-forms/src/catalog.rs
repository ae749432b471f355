//! The element catalog.
//!
//! [`ElementType`] is the fixed set of element kinds a form can contain. Each
//! kind belongs to one [`ElementCategory`] and carries the metadata the
//! sidebar shows (display label) plus the capabilities the properties editor
//! and the exporter consult: whether the kind holds options, accepts a
//! placeholder or default value, and which validation rules make sense on it.

use std::fmt;
use std::str::FromStr;

use formforge_core::FormForgeError;
use serde::{Deserialize, Serialize};

use crate::element::{ElementTemplate, RuleKind};

/// Every kind of element that can be placed on a form.
///
/// Serialized as the kebab-case tag used in exports and drop payloads
/// (`"single-line"`, `"multi-choice"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    // Layout
    /// A section heading.
    Heading,
    /// A paragraph of descriptive text.
    Description,
    /// An uploaded logo image.
    GroupLogo,
    /// A titled group of fields.
    Section,
    /// A horizontal rule.
    Separator,
    /// A free-form header block.
    CustomHeader,
    /// A free-form footer block.
    CustomFooter,
    // Text
    /// A one-line text input.
    SingleLine,
    /// A numeric input.
    Number,
    /// A multi-line text area.
    MultiLine,
    /// A rich-text editor.
    RichText,
    // Multi
    /// A group of checkboxes.
    Checklist,
    /// A group of radio buttons.
    MultiChoice,
    /// A select box.
    Dropdown,
    /// A text input with suggestions.
    Combobox,
    /// A single checkbox.
    Checkbox,
    /// An on/off toggle.
    Switch,
    // Date
    /// A date picker.
    Date,
    /// A start and end date picker.
    DateRange,
    /// A time picker.
    Time,
}

/// The sidebar groups element kinds are listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementCategory {
    /// Headings, text blocks, and structure.
    Layout,
    /// Free text and numeric inputs.
    Text,
    /// Inputs that pick from options or toggle.
    Multi,
    /// Date and time inputs.
    Date,
}

impl ElementCategory {
    /// All categories in sidebar order.
    pub const ALL: [Self; 4] = [Self::Layout, Self::Text, Self::Multi, Self::Date];

    /// Short identifier (`"layout"`, `"text"`, `"multi"`, `"date"`).
    pub const fn id(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Text => "text",
            Self::Multi => "multi",
            Self::Date => "date",
        }
    }

    /// Display name shown as the sidebar group heading.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Layout => "Layout Elements",
            Self::Text => "Text Elements",
            Self::Multi => "Multi Elements",
            Self::Date => "Date Elements",
        }
    }

    /// The element kinds in this category, in sidebar order.
    pub fn element_types(self) -> impl Iterator<Item = ElementType> {
        ElementType::ALL
            .into_iter()
            .filter(move |ty| ty.category() == self)
    }
}

impl ElementType {
    /// All element kinds in sidebar order.
    pub const ALL: [Self; 20] = [
        Self::Heading,
        Self::Description,
        Self::GroupLogo,
        Self::Section,
        Self::Separator,
        Self::CustomHeader,
        Self::CustomFooter,
        Self::SingleLine,
        Self::Number,
        Self::MultiLine,
        Self::RichText,
        Self::Checklist,
        Self::MultiChoice,
        Self::Dropdown,
        Self::Combobox,
        Self::Checkbox,
        Self::Switch,
        Self::Date,
        Self::DateRange,
        Self::Time,
    ];

    /// The serialized tag, also used as the prefix of generated element ids.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Description => "description",
            Self::GroupLogo => "group-logo",
            Self::Section => "section",
            Self::Separator => "separator",
            Self::CustomHeader => "custom-header",
            Self::CustomFooter => "custom-footer",
            Self::SingleLine => "single-line",
            Self::Number => "number",
            Self::MultiLine => "multi-line",
            Self::RichText => "rich-text",
            Self::Checklist => "checklist",
            Self::MultiChoice => "multi-choice",
            Self::Dropdown => "dropdown",
            Self::Combobox => "combobox",
            Self::Checkbox => "checkbox",
            Self::Switch => "switch",
            Self::Date => "date",
            Self::DateRange => "date-range",
            Self::Time => "time",
        }
    }

    /// The display label the sidebar shows and new elements start with.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Description => "Description",
            Self::GroupLogo => "Group Logo",
            Self::Section => "Section",
            Self::Separator => "Separator",
            Self::CustomHeader => "Custom Header",
            Self::CustomFooter => "Custom Footer",
            Self::SingleLine => "Single Line",
            Self::Number => "Number",
            Self::MultiLine => "Multi-line",
            Self::RichText => "Rich Text",
            Self::Checklist => "Checklist",
            Self::MultiChoice => "Multi-choice",
            Self::Dropdown => "Dropdown",
            Self::Combobox => "Combobox",
            Self::Checkbox => "Checkbox",
            Self::Switch => "Switch",
            Self::Date => "Date",
            Self::DateRange => "Date Range",
            Self::Time => "Time",
        }
    }

    pub const fn category(self) -> ElementCategory {
        match self {
            Self::Heading
            | Self::Description
            | Self::GroupLogo
            | Self::Section
            | Self::Separator
            | Self::CustomHeader
            | Self::CustomFooter => ElementCategory::Layout,
            Self::SingleLine | Self::Number | Self::MultiLine | Self::RichText => {
                ElementCategory::Text
            }
            Self::Checklist
            | Self::MultiChoice
            | Self::Dropdown
            | Self::Combobox
            | Self::Checkbox
            | Self::Switch => ElementCategory::Multi,
            Self::Date | Self::DateRange | Self::Time => ElementCategory::Date,
        }
    }

    pub const fn is_layout(self) -> bool {
        matches!(self.category(), ElementCategory::Layout)
    }

    /// Whether elements of this kind carry an `options` list.
    ///
    /// Only these kinds may have `options`; the document strips it from
    /// every other kind.
    pub const fn has_options(self) -> bool {
        matches!(self, Self::Checklist | Self::MultiChoice | Self::Dropdown)
    }

    pub const fn supports_placeholder(self) -> bool {
        matches!(self, Self::SingleLine | Self::MultiLine | Self::Number)
    }

    pub const fn supports_default_value(self) -> bool {
        matches!(
            self,
            Self::SingleLine | Self::Number | Self::Checkbox | Self::Switch
        )
    }

    /// Whether a validation rule of `kind` can be attached to this kind of element.
    ///
    /// Length and pattern rules belong to text inputs, bounds to numbers;
    /// `required` and `custom` fit any input but no layout block.
    pub const fn allows_rule(self, kind: RuleKind) -> bool {
        match kind {
            RuleKind::MinLength | RuleKind::MaxLength => {
                matches!(self, Self::SingleLine | Self::MultiLine)
            }
            RuleKind::Min | RuleKind::Max => matches!(self, Self::Number),
            RuleKind::Regex | RuleKind::Email => matches!(self, Self::SingleLine),
            RuleKind::Required | RuleKind::Custom => !self.is_layout(),
        }
    }

    /// The drop payload the sidebar hands the canvas for this kind.
    pub fn template(self) -> ElementTemplate {
        ElementTemplate::new(self, self.label())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementType {
    type Err = FormForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.tag() == s)
            .ok_or_else(|| FormForgeError::InvalidArgument(format!("Unknown element type: {s}")))
    }
}

/// One sidebar group: a category and the templates listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub elements: Vec<ElementTemplate>,
}

/// Returns the full catalog, grouped by category in sidebar order.
pub fn categories() -> Vec<CatalogCategory> {
    ElementCategory::ALL
        .into_iter()
        .map(|category| CatalogCategory {
            id: category.id(),
            name: category.name(),
            elements: category.element_types().map(ElementType::template).collect(),
        })
        .collect()
}
