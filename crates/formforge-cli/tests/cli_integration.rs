//! End-to-end tests driving the command registry against a store on disk.
//!
//! Covers:
//! 1. Form lifecycle: create, duplicate, delete
//! 2. Element editing: add, edit, move, remove
//! 3. Validate and export

use formforge_cli::{register_builtin_commands, CommandRegistry};
use formforge_core::{FormForgeError, Settings};
use formforge_forms::{from_json, ElementType, RuleKind};
use formforge_store::LocalStore;
use tempfile::TempDir;

// ============================================================================
// Shared helpers
// ============================================================================

struct Harness {
    dir: TempDir,
    settings: Settings,
    registry: CommandRegistry,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            store_path: dir.path().join("store.json"),
            export_dir: dir.path().join("exports"),
            ..Settings::default()
        };
        let mut registry = CommandRegistry::new();
        register_builtin_commands(&mut registry);
        Self {
            dir,
            settings,
            registry,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<(), FormForgeError> {
        let argv = std::iter::once("formforge").chain(args.iter().copied());
        let matches = self.registry.build_cli().try_get_matches_from(argv).unwrap();
        self.registry.execute(&matches, &self.settings).await
    }

    async fn store(&self) -> LocalStore {
        LocalStore::load(&self.settings.store_path).await.unwrap()
    }

    /// Creates a form and returns its id.
    async fn create(&self, title: &str) -> String {
        self.run(&["create", title]).await.unwrap();
        self.store().await.summaries().last().unwrap().id.clone()
    }

    /// Adds an element and returns its id.
    async fn add(&self, form: &str, element_type: &str, label: &str) -> String {
        self.run(&["add", form, element_type, "--label", label]).await.unwrap();
        let store = self.store().await;
        let doc = store.document(form).unwrap();
        doc.elements().last().unwrap().id().to_string()
    }

    async fn labels(&self, form: &str) -> Vec<String> {
        let store = self.store().await;
        store
            .document(form)
            .unwrap()
            .elements()
            .iter()
            .map(|el| el.label.clone())
            .collect()
    }
}

// ============================================================================
// 1. Form lifecycle
// ============================================================================

#[tokio::test]
async fn test_registry_has_every_command() {
    let harness = Harness::new();
    assert_eq!(
        harness.registry.list_commands(),
        vec![
            "add", "catalog", "create", "delete", "duplicate", "edit", "export", "list", "move",
            "remove", "show", "validate"
        ]
    );
    harness.run(&["catalog"]).await.unwrap();
    harness.run(&["list"]).await.unwrap();
}

#[tokio::test]
async fn test_create_duplicate_delete() {
    let harness = Harness::new();
    let form = harness.create("Job Application").await;
    harness.add(&form, "single-line", "Full name").await;

    harness.run(&["duplicate", &form]).await.unwrap();
    let store = harness.store().await;
    assert_eq!(store.len(), 2);
    let copy = &store.summaries()[1];
    assert_eq!(copy.title, "Job Application (Copy)");
    assert_eq!(store.document(&copy.id).unwrap().len(), 1);

    harness.run(&["delete", &form]).await.unwrap();
    assert_eq!(harness.store().await.len(), 1);

    let err = harness.run(&["delete", &form]).await.unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_blank_title_is_a_usage_error() {
    let harness = Harness::new();
    let err = harness.run(&["create", "   "]).await.unwrap_err();
    assert!(matches!(err, FormForgeError::EmptyTitle));
    assert_eq!(err.exit_code(), 2);
    assert!(harness.store().await.is_empty());
}

// ============================================================================
// 2. Element editing
// ============================================================================

#[tokio::test]
async fn test_add_move_remove() {
    let harness = Harness::new();
    let form = harness.create("ABC").await;
    harness.add(&form, "single-line", "A").await;
    let b = harness.add(&form, "number", "B").await;
    harness.add(&form, "date", "C").await;

    harness.run(&["move", &form, "2", "0"]).await.unwrap();
    assert_eq!(harness.labels(&form).await, vec!["C", "A", "B"]);

    harness.run(&["move", &form, "0", "99"]).await.unwrap();
    assert_eq!(harness.labels(&form).await, vec!["A", "B", "C"]);

    harness.run(&["remove", &form, &b]).await.unwrap();
    assert_eq!(harness.labels(&form).await, vec!["A", "C"]);
    let store = harness.store().await;
    for (i, el) in store.document(&form).unwrap().elements().iter().enumerate() {
        assert_eq!(el.index(), i);
    }
}

#[tokio::test]
async fn test_unknown_element_type() {
    let harness = Harness::new();
    let form = harness.create("Types").await;
    let err = harness.run(&["add", &form, "signature"]).await.unwrap_err();
    assert!(matches!(err, FormForgeError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_edit_element() {
    let harness = Harness::new();
    let form = harness.create("Signup").await;
    let email = harness.add(&form, "single-line", "Email").await;

    harness
        .run(&[
            "edit", &form, &email, "--required", "true", "--placeholder", "you@example.com",
            "--add-rule", "email", "--color", "#333",
        ])
        .await
        .unwrap();

    let store = harness.store().await;
    let el = store.document(&form).unwrap().get(&email).unwrap();
    assert_eq!(el.element_type, ElementType::SingleLine);
    assert!(el.required);
    assert_eq!(el.placeholder.as_deref(), Some("you@example.com"));
    assert_eq!(el.validation[0].kind, RuleKind::Email);
    assert_eq!(el.style.as_ref().and_then(|s| s.color.as_deref()), Some("#333"));

    let err = harness
        .run(&["edit", &form, &email, "--add-rule", "max=10"])
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

// ============================================================================
// 3. Validate and export
// ============================================================================

#[tokio::test]
async fn test_validate_exit_codes() {
    let harness = Harness::new();
    let form = harness.create("Signup").await;
    let name = harness.add(&form, "single-line", "Name").await;
    harness
        .run(&["edit", &form, &name, "--required", "true"])
        .await
        .unwrap();

    let err = harness.run(&["validate", &form, "--values", "{}"]).await.unwrap_err();
    match &err {
        FormForgeError::Validation(errors) => {
            assert_eq!(errors, &vec![(name.clone(), "This field is required".to_string())]);
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 4);

    let values_path = harness.dir.path().join("values.json");
    tokio::fs::write(&values_path, format!(r#"{{"{name}": "Ada"}}"#))
        .await
        .unwrap();
    harness
        .run(&["validate", &form, "--file", values_path.to_str().unwrap()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_export_json_and_html() {
    let harness = Harness::new();
    let form = harness.create("Customer Feedback").await;
    harness.add(&form, "heading", "Tell us more").await;
    harness.add(&form, "multi-choice", "Rating").await;

    harness.run(&["export", &form]).await.unwrap();
    let json_path = harness.settings.export_dir.join("customer-feedback.json");
    let json = tokio::fs::read_to_string(&json_path).await.unwrap();
    let store = harness.store().await;
    assert_eq!(&from_json(&json).unwrap(), store.document(&form).unwrap());

    let html_path = harness.dir.path().join("page.html");
    harness
        .run(&[
            "export", &form, "--format", "html", "--output", html_path.to_str().unwrap(),
        ])
        .await
        .unwrap();
    let html = tokio::fs::read_to_string(&html_path).await.unwrap();
    assert!(html.contains("<h1>Customer Feedback</h1>"));
    assert!(html.contains(r#"type="radio""#));
    assert!(!html.contains("<script"));
}
