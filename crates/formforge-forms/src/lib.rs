//! # formforge-forms
//!
//! The form document model behind the builder: an element catalog, an ordered
//! element sequence with stable ids and live indices, a validation-rule
//! evaluator, a properties edit session, a canvas that publishes change
//! notifications, and JSON / static HTML export.
//!
//! ```
//! use formforge_forms::catalog::ElementType;
//! use formforge_forms::document::FormDocument;
//! use formforge_forms::element::ElementTemplate;
//!
//! let mut doc = FormDocument::new("Survey");
//! doc.add(ElementTemplate::new(ElementType::Heading, "Survey"));
//! doc.add(ElementTemplate::new(ElementType::SingleLine, "Name"));
//! doc.move_element(1, 0);
//! assert_eq!(doc.elements()[0].label, "Name");
//! assert_eq!(doc.elements()[0].index(), 0);
//! ```

pub mod canvas;
pub mod catalog;
pub mod document;
pub mod editor;
pub mod element;
pub mod export;
pub mod templates;
pub mod validation;

pub use canvas::{Canvas, DocumentChange, DragSession};
pub use catalog::{ElementCategory, ElementType};
pub use document::FormDocument;
pub use editor::EditSession;
pub use element::{
    ChoiceOption, ElementPatch, ElementStyle, ElementTemplate, FormElement, RuleKind,
    ValidationRule,
};
pub use export::{export_file_name, from_json, to_json, to_static_html, ExportFormat, HtmlExporter};
pub use templates::{HtmlTemplate, TemplateRegistry};
pub use validation::{evaluate, Evaluation, Evaluator, FieldErrors, FieldValue};
