//! Static HTML templates for form elements.
//!
//! Each [`ElementType`] with a defined markup maps to one [`HtmlTemplate`] in a
//! [`TemplateRegistry`]. Element types with no registered template are
//! skipped by the exporter rather than treated as errors; out of the box
//! that is `group-logo` and `rich-text`, which have no static equivalent.
//!
//! All element text is HTML-escaped. Field controls use the element id as
//! both `id` and `name`.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;

use formforge_core::utils::text::escape_html;

use crate::catalog::ElementType;
use crate::element::{ChoiceOption, FormElement};

/// Renders one element as an HTML fragment.
///
/// Templates must be `Send + Sync` so a registry can be shared by exporters
/// on different threads.
pub trait HtmlTemplate: Send + Sync + fmt::Debug {
    fn render(&self, element: &FormElement) -> String;
}

/// Formats ordered attribute pairs as ` key="value"`. Values are escaped;
/// an empty value renders as a bare boolean attribute.
fn render_attrs(attrs: &[(&str, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        if value.is_empty() {
            let _ = write!(out, " {key}");
        } else {
            let _ = write!(out, r#" {key}="{}""#, escape_html(value));
        }
    }
    out
}

fn style_attr(element: &FormElement) -> Vec<(&'static str, String)> {
    element
        .style
        .as_ref()
        .map(|style| style.to_css())
        .filter(|css| !css.is_empty())
        .map(|css| vec![("style", css)])
        .unwrap_or_default()
}

fn required_marker(element: &FormElement) -> &'static str {
    if element.required {
        r#" <span class="required">*</span>"#
    } else {
        ""
    }
}

fn label_for(element: &FormElement, target: &str) -> String {
    format!(
        r#"<label for="{}">{}{}</label>"#,
        escape_html(target),
        escape_html(&element.label),
        required_marker(element)
    )
}

/// Wraps a labelled control in the `form-field` container that carries the
/// element's inline style.
fn field(element: &FormElement, body: &str) -> String {
    let mut attrs = vec![("class", "form-field".to_string())];
    attrs.extend(style_attr(element));
    format!("<div{}>{body}</div>", render_attrs(&attrs))
}

/// `id`, `name`, and the optional placeholder / default / required attributes
/// shared by single-value controls.
fn control_attrs(element: &FormElement) -> Vec<(&'static str, String)> {
    let mut attrs = vec![
        ("id", element.id().to_string()),
        ("name", element.id().to_string()),
    ];
    if let Some(placeholder) = element.placeholder.as_ref().filter(|p| !p.is_empty()) {
        attrs.push(("placeholder", placeholder.clone()));
    }
    if element.required {
        attrs.push(("required", String::new()));
    }
    attrs
}

// ---------------------------------------------------------------------------
// Built-in templates
// ---------------------------------------------------------------------------

/// A block of text in a fixed tag: `<h2>`, `<p>`, `<header>`, `<footer>`.
#[derive(Debug, Clone)]
pub struct BlockTemplate {
    pub tag: &'static str,
}

impl HtmlTemplate for BlockTemplate {
    fn render(&self, element: &FormElement) -> String {
        format!(
            "<{tag}{}>{}</{tag}>",
            render_attrs(&style_attr(element)),
            escape_html(&element.label),
            tag = self.tag
        )
    }
}

/// A `<fieldset>` titled by a `<legend>`.
#[derive(Debug, Clone)]
pub struct SectionTemplate;

impl HtmlTemplate for SectionTemplate {
    fn render(&self, element: &FormElement) -> String {
        format!(
            "<fieldset{}><legend>{}</legend></fieldset>",
            render_attrs(&style_attr(element)),
            escape_html(&element.label)
        )
    }
}

/// A horizontal rule.
#[derive(Debug, Clone)]
pub struct SeparatorTemplate;

impl HtmlTemplate for SeparatorTemplate {
    fn render(&self, element: &FormElement) -> String {
        format!("<hr{} />", render_attrs(&style_attr(element)))
    }
}

/// A labelled `<input>` of the given type (`text`, `number`, `date`, `time`).
#[derive(Debug, Clone)]
pub struct InputTemplate {
    pub input_type: &'static str,
}

impl HtmlTemplate for InputTemplate {
    fn render(&self, element: &FormElement) -> String {
        let mut attrs = vec![("type", self.input_type.to_string())];
        attrs.extend(control_attrs(element));
        if let Some(value) = element.default_value.as_ref().filter(|v| !v.is_empty()) {
            attrs.push(("value", value.clone()));
        }
        let body = format!(
            "{}<input{} />",
            label_for(element, element.id()),
            render_attrs(&attrs)
        );
        field(element, &body)
    }
}

/// A labelled `<textarea>`.
#[derive(Debug, Clone)]
pub struct TextareaTemplate;

impl HtmlTemplate for TextareaTemplate {
    fn render(&self, element: &FormElement) -> String {
        let body = format!(
            "{}<textarea{}>{}</textarea>",
            label_for(element, element.id()),
            render_attrs(&control_attrs(element)),
            escape_html(element.default_value.as_deref().unwrap_or(""))
        );
        field(element, &body)
    }
}

/// A group of checkboxes or radio buttons, one per option.
///
/// Radio groups put `required` on every radio. A checkbox group cannot
/// express "at least one" in plain HTML, so it is marked with
/// `aria-required` instead.
#[derive(Debug, Clone)]
pub struct ChoiceGroupTemplate {
    pub input_type: &'static str,
}

impl HtmlTemplate for ChoiceGroupTemplate {
    fn render(&self, element: &FormElement) -> String {
        let mut fieldset_attrs = vec![("class", "choice-group".to_string())];
        if element.required && self.input_type == "checkbox" {
            fieldset_attrs.push(("aria-required", "true".to_string()));
        }

        let mut body = format!(
            "<fieldset{}><legend>{}{}</legend>",
            render_attrs(&fieldset_attrs),
            escape_html(&element.label),
            required_marker(element)
        );
        for (i, option) in element.effective_options().iter().enumerate() {
            let input_id = format!("{}-{}", element.id(), i + 1);
            let mut attrs = vec![
                ("type", self.input_type.to_string()),
                ("id", input_id),
                ("name", element.id().to_string()),
                ("value", option.value.clone()),
            ];
            if element.required && self.input_type == "radio" {
                attrs.push(("required", String::new()));
            }
            let _ = write!(
                body,
                "<label><input{} /> {}</label>",
                render_attrs(&attrs),
                escape_html(&option.label)
            );
        }
        body.push_str("</fieldset>");
        field(element, &body)
    }
}

fn render_options(options: &[ChoiceOption]) -> String {
    options
        .iter()
        .map(|option| {
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(&option.value),
                escape_html(&option.label)
            )
        })
        .collect()
}

/// A labelled `<select>` with a leading empty prompt option.
#[derive(Debug, Clone)]
pub struct SelectTemplate;

impl HtmlTemplate for SelectTemplate {
    fn render(&self, element: &FormElement) -> String {
        let body = format!(
            r#"{}<select{}><option value="">Select an option</option>{}</select>"#,
            label_for(element, element.id()),
            render_attrs(&control_attrs(element)),
            render_options(&element.effective_options())
        );
        field(element, &body)
    }
}

/// A text input bound to a `<datalist>` of suggestions.
///
/// Combobox elements carry no options of their own, so the suggestions are
/// the placeholder trio.
#[derive(Debug, Clone)]
pub struct DatalistTemplate;

impl HtmlTemplate for DatalistTemplate {
    fn render(&self, element: &FormElement) -> String {
        let list_id = format!("{}-list", element.id());
        let mut attrs = vec![("type", "text".to_string())];
        attrs.extend(control_attrs(element));
        if !attrs.iter().any(|(k, _)| *k == "placeholder") {
            attrs.push(("placeholder", "Select or type an option".to_string()));
        }
        attrs.push(("list", list_id.clone()));

        let body = format!(
            r#"{}<input{} /><datalist id="{}">{}</datalist>"#,
            label_for(element, element.id()),
            render_attrs(&attrs),
            escape_html(&list_id),
            render_options(&ChoiceOption::placeholders())
        );
        field(element, &body)
    }
}

/// A single checkbox, optionally presented as a switch.
///
/// A default value of `"true"` renders the control checked.
#[derive(Debug, Clone)]
pub struct ToggleTemplate {
    pub switch: bool,
}

impl HtmlTemplate for ToggleTemplate {
    fn render(&self, element: &FormElement) -> String {
        let mut attrs = vec![("type", "checkbox".to_string())];
        if self.switch {
            attrs.push(("role", "switch".to_string()));
        }
        attrs.extend(control_attrs(element));
        if element.default_value.as_deref() == Some("true") {
            attrs.push(("checked", String::new()));
        }
        let body = format!(
            "<input{} />{}",
            render_attrs(&attrs),
            label_for(element, element.id())
        );
        field(element, &body)
    }
}

/// Start and end date inputs under one label.
#[derive(Debug, Clone)]
pub struct DateRangeTemplate;

impl HtmlTemplate for DateRangeTemplate {
    fn render(&self, element: &FormElement) -> String {
        let mut body = format!(
            "<fieldset><legend>{}{}</legend>",
            escape_html(&element.label),
            required_marker(element)
        );
        for (suffix, caption) in [("start", "Start date"), ("end", "End date")] {
            let input_id = format!("{}-{suffix}", element.id());
            let mut attrs = vec![
                ("type", "date".to_string()),
                ("id", input_id.clone()),
                ("name", input_id.clone()),
            ];
            if element.required {
                attrs.push(("required", String::new()));
            }
            let _ = write!(
                body,
                r#"<label for="{}">{caption}</label><input{} />"#,
                escape_html(&input_id),
                render_attrs(&attrs)
            );
        }
        body.push_str("</fieldset>");
        field(element, &body)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Dispatch table from element type to template.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: HashMap<ElementType, Box<dyn HtmlTemplate>>,
}

impl TemplateRegistry {
    /// An empty registry. Every element is skipped until templates are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in template for every type that has one.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ElementType::Heading, BlockTemplate { tag: "h2" });
        registry.register(ElementType::Description, BlockTemplate { tag: "p" });
        registry.register(ElementType::CustomHeader, BlockTemplate { tag: "header" });
        registry.register(ElementType::CustomFooter, BlockTemplate { tag: "footer" });
        registry.register(ElementType::Section, SectionTemplate);
        registry.register(ElementType::Separator, SeparatorTemplate);
        registry.register(ElementType::SingleLine, InputTemplate { input_type: "text" });
        registry.register(ElementType::Number, InputTemplate { input_type: "number" });
        registry.register(ElementType::MultiLine, TextareaTemplate);
        registry.register(ElementType::Checklist, ChoiceGroupTemplate { input_type: "checkbox" });
        registry.register(ElementType::MultiChoice, ChoiceGroupTemplate { input_type: "radio" });
        registry.register(ElementType::Dropdown, SelectTemplate);
        registry.register(ElementType::Combobox, DatalistTemplate);
        registry.register(ElementType::Checkbox, ToggleTemplate { switch: false });
        registry.register(ElementType::Switch, ToggleTemplate { switch: true });
        registry.register(ElementType::Date, InputTemplate { input_type: "date" });
        registry.register(ElementType::DateRange, DateRangeTemplate);
        registry.register(ElementType::Time, InputTemplate { input_type: "time" });
        registry
    }

    /// Registers `template` for `element_type`, replacing any existing one.
    pub fn register(&mut self, element_type: ElementType, template: impl HtmlTemplate + 'static) {
        self.templates.insert(element_type, Box::new(template));
    }

    /// Removes the template for `element_type`. Returns `true` if one was registered.
    pub fn unregister(&mut self, element_type: ElementType) -> bool {
        self.templates.remove(&element_type).is_some()
    }

    pub fn get(&self, element_type: ElementType) -> Option<&dyn HtmlTemplate> {
        self.templates.get(&element_type).map(|template| &**template)
    }

    pub fn handles(&self, element_type: ElementType) -> bool {
        self.templates.contains_key(&element_type)
    }

    /// Renders `element`, or returns `None` if its type has no template.
    pub fn render(&self, element: &FormElement) -> Option<String> {
        self.get(element.element_type)
            .map(|template| template.render(element))
    }

    /// The types with a registered template, in catalog order.
    pub fn handled_types(&self) -> Vec<ElementType> {
        ElementType::ALL
            .into_iter()
            .filter(|ty| self.handles(*ty))
            .collect()
    }
}
