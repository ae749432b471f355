//! JSON and static HTML export.
//!
//! JSON is the save format: `{title, elements, createdAt, updatedAt}`, pretty
//! printed with two-space indentation. [`from_json`] reads it back and
//! re-derives element indices from positions, so a hand-edited file with
//! stale indices still loads consistently.
//!
//! HTML export renders a standalone page with one `<form>` and no script,
//! dispatching each element through a [`TemplateRegistry`].

use std::fmt;
use std::str::FromStr;

use formforge_core::utils::text::{escape_html, slugify};
use formforge_core::{FormForgeError, FormForgeResult};

use crate::document::FormDocument;
use crate::templates::TemplateRegistry;

const DEFAULT_STYLESHEET: &str = "form.css";

/// Serializes `document` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`FormForgeError::Serialization`] if serialization fails.
pub fn to_json(document: &FormDocument) -> FormForgeResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parses a document from the JSON export format.
///
/// Element indices are recomputed from array positions and `options` is
/// dropped from element types that cannot carry it.
///
/// # Errors
///
/// Returns [`FormForgeError::Serialization`] on malformed input, an unknown
/// element type, or two elements sharing an id.
pub fn from_json(json: &str) -> FormForgeResult<FormDocument> {
    let mut document: FormDocument = serde_json::from_str(json)?;
    document.normalize()?;
    Ok(document)
}

/// Renders a document to a self-contained HTML page.
#[derive(Debug)]
pub struct HtmlExporter {
    registry: TemplateRegistry,
    stylesheet_href: String,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExporter {
    /// An exporter with the built-in templates and the default stylesheet link.
    pub fn new() -> Self {
        Self {
            registry: TemplateRegistry::with_defaults(),
            stylesheet_href: DEFAULT_STYLESHEET.to_string(),
        }
    }

    #[must_use]
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = href.into();
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry_mut(&mut self) -> &mut TemplateRegistry {
        &mut self.registry
    }

    pub fn render(&self, document: &FormDocument) -> String {
        let title = escape_html(&document.title);
        let mut body = String::new();
        let mut skipped = 0_usize;

        for element in document.elements() {
            match self.registry.render(element) {
                Some(fragment) => {
                    body.push_str("      ");
                    body.push_str(&fragment);
                    body.push('\n');
                }
                None => {
                    skipped += 1;
                    tracing::debug!(
                        id = element.id(),
                        element_type = %element.element_type,
                        "no HTML template; skipping element"
                    );
                }
            }
        }

        tracing::debug!(
            rendered = document.len() - skipped,
            skipped,
            "rendered static HTML"
        );

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             \x20 <head>\n\
             \x20   <meta charset=\"utf-8\" />\n\
             \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
             \x20   <title>{title}</title>\n\
             \x20   <link rel=\"stylesheet\" href=\"{href}\" />\n\
             \x20 </head>\n\
             \x20 <body>\n\
             \x20   <form class=\"form\">\n\
             \x20     <h1>{title}</h1>\n\
             {body}\
             \x20     <button type=\"submit\">Submit</button>\n\
             \x20   </form>\n\
             \x20 </body>\n\
             </html>\n",
            href = escape_html(&self.stylesheet_href),
        )
    }
}

/// Renders `document` as static HTML with the built-in templates.
pub fn to_static_html(document: &FormDocument) -> String {
    HtmlExporter::new().render(document)
}

/// An export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = FormForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" | "htm" => Ok(Self::Html),
            other => Err(FormForgeError::InvalidArgument(format!(
                "Unknown export format: {other}"
            ))),
        }
    }
}

/// The file name an export of a form titled `title` is saved under.
///
/// ```
/// use formforge_forms::export::{export_file_name, ExportFormat};
///
/// assert_eq!(export_file_name("Customer Feedback", ExportFormat::Json), "customer-feedback.json");
/// assert_eq!(export_file_name("!!!", ExportFormat::Html), "form.html");
/// ```
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    let slug = slugify(title);
    let stem = if slug.is_empty() { "form" } else { slug.as_str() };
    format!("{stem}.{}", format.extension())
}

/// Renders `document` in `format`.
///
/// # Errors
///
/// Propagates JSON serialization failures.
pub fn render(document: &FormDocument, format: ExportFormat, exporter: &HtmlExporter) -> FormForgeResult<String> {
    match format {
        ExportFormat::Json => to_json(document),
        ExportFormat::Html => Ok(exporter.render(document)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ElementType;
    use crate::element::{ElementPatch, ElementTemplate, RuleKind, ValidationRule};

    #[test]
    fn test_json_shape() {
        let mut doc = FormDocument::new("Contact");
        let id = doc
            .add(ElementTemplate::new(ElementType::SingleLine, "Email"))
            .id()
            .to_string();
        doc.update(
            &id,
            ElementPatch::new()
                .required(true)
                .validation(vec![ValidationRule::new(RuleKind::Email)]),
        );

        let json = to_json(&doc).unwrap();
        assert!(json.starts_with("{\n  \"title\": \"Contact\""));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["elements"][0]["type"], "single-line");
        assert_eq!(value["elements"][0]["index"], 0);
        assert_eq!(value["elements"][0]["required"], true);
        assert_eq!(value["elements"][0]["validation"][0]["type"], "email");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_from_json_reindexes() {
        let json = r#"{
          "title": "Stale",
          "elements": [
            {"id": "a", "type": "heading", "label": "A", "index": 4},
            {"id": "b", "type": "number", "label": "B", "index": 9,
             "options": [{"label": "x", "value": "x"}]}
          ],
          "createdAt": "2024-01-01T00:00:00Z",
          "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let doc = from_json(json).unwrap();
        assert_eq!(doc.elements()[0].index(), 0);
        assert_eq!(doc.elements()[1].index(), 1);
        assert!(doc.elements()[1].options.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_type() {
        let json = r#"{"title": "X", "elements": [{"id": "a", "type": "signature", "label": "A"}],
                       "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"}"#;
        assert!(matches!(from_json(json), Err(FormForgeError::Serialization(_))));
    }

    #[test]
    fn test_html_document_structure() {
        let mut doc = FormDocument::new("Survey");
        doc.add(ElementTemplate::new(ElementType::Heading, "Survey"));
        doc.add(ElementType::RichText.template());

        let html = HtmlExporter::new().with_stylesheet("styles/app.css").render(&doc);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<link rel="stylesheet" href="styles/app.css" />"#));
        assert!(html.contains("<h2>Survey</h2>"));
        assert!(html.contains("<form"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("Rich Text"));
    }

    #[test]
    fn test_html_escapes_title() {
        let doc = FormDocument::new("<Feedback>");
        let html = to_static_html(&doc);
        assert!(html.contains("<title>&lt;Feedback&gt;</title>"));
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("html".parse::<ExportFormat>().unwrap(), ExportFormat::Html);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Job Application", ExportFormat::Html), "job-application.html");
        assert_eq!(export_file_name("", ExportFormat::Json), "form.json");
    }
}
