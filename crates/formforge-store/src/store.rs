//! The local form store.
//!
//! Keeps the list of form summaries shown on the forms page and one saved
//! document per form, and persists both to a single JSON file. There is no
//! server: the file is the whole database.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use formforge_core::{FormForgeError, FormForgeResult};
use formforge_forms::FormDocument;

use crate::pagination::{Page, PaginationError, Paginator};

/// One row of the forms list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form summaries in creation order plus the saved document for each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalStore {
    #[serde(default)]
    forms: Vec<FormSummary>,
    #[serde(default)]
    documents: BTreeMap<String, FormDocument>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, and
    /// `Serialization` if it is not a valid store.
    pub async fn load(path: impl AsRef<Path>) -> FormForgeResult<Self> {
        let path = path.as_ref();
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no store file; starting empty");
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut store: Self = serde_json::from_str(&contents)?;
        store.normalize()?;
        tracing::debug!(path = %path.display(), forms = store.len(), "loaded store");
        Ok(store)
    }

    /// Writes the store to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` on failure.
    pub async fn save(&self, path: impl AsRef<Path>) -> FormForgeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        tracing::debug!(path = %path.display(), forms = self.len(), "saved store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// All summaries in creation order.
    pub fn summaries(&self) -> &[FormSummary] {
        &self.forms
    }

    pub fn get(&self, id: &str) -> Option<&FormSummary> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// Creates an empty form titled `title` (trimmed).
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::EmptyTitle`] for a blank title; nothing is stored.
    pub fn create(&mut self, title: &str) -> FormForgeResult<&FormSummary> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FormForgeError::EmptyTitle);
        }
        let document = FormDocument::new(title);
        Ok(self.insert(document))
    }

    /// Copies the form with `id` under the title `"<title> (Copy)"`, including
    /// its elements.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::NotFound`] for an unknown id.
    pub fn duplicate(&mut self, id: &str) -> FormForgeResult<&FormSummary> {
        let source = self.document(id)?;
        let copy = source.duplicate_as(format!("{} (Copy)", source.title));
        Ok(self.insert(copy))
    }

    /// Deletes the form with `id` and its document.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::NotFound`] for an unknown id.
    pub fn delete(&mut self, id: &str) -> FormForgeResult<FormSummary> {
        let pos = self
            .forms
            .iter()
            .position(|form| form.id == id)
            .ok_or_else(|| not_found(id))?;
        let summary = self.forms.remove(pos);
        self.documents.remove(id);
        tracing::info!(id, title = %summary.title, "deleted form");
        Ok(summary)
    }

    /// The saved document of the form with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::NotFound`] for an unknown id.
    pub fn document(&self, id: &str) -> FormForgeResult<&FormDocument> {
        self.documents.get(id).ok_or_else(|| not_found(id))
    }

    /// Replaces the saved document of the form with `id` and refreshes its
    /// summary's title and `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::NotFound`] for an unknown id.
    pub fn save_document(&mut self, id: &str, document: FormDocument) -> FormForgeResult<()> {
        let summary = self
            .forms
            .iter_mut()
            .find(|form| form.id == id)
            .ok_or_else(|| not_found(id))?;
        summary.title.clone_from(&document.title);
        summary.updated_at = Utc::now();
        self.documents.insert(id.to_string(), document);
        tracing::debug!(id, "saved document");
        Ok(())
    }

    /// Page `number` (1-based) of the summaries.
    ///
    /// # Errors
    ///
    /// See [`Paginator::page`].
    pub fn page(&self, number: usize, per_page: usize) -> Result<Page<'_, FormSummary>, PaginationError> {
        Paginator::new(&self.forms, per_page).page(number)
    }

    /// Page `number` of the summaries, or the last page if `number` is past
    /// the end.
    pub fn page_or_last(&self, number: usize, per_page: usize) -> Page<'_, FormSummary> {
        Paginator::new(&self.forms, per_page).page_or_last(number)
    }

    fn insert(&mut self, document: FormDocument) -> &FormSummary {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let summary = FormSummary {
            id: id.clone(),
            title: document.title.clone(),
            created_at: now,
            updated_at: now,
        };
        tracing::info!(%id, title = %summary.title, "created form");
        self.documents.insert(id, document);
        self.forms.push(summary);
        &self.forms[self.forms.len() - 1]
    }

    /// Gives every summary a document and restores each document's invariants.
    fn normalize(&mut self) -> FormForgeResult<()> {
        for document in self.documents.values_mut() {
            document.normalize()?;
        }
        for summary in &self.forms {
            self.documents
                .entry(summary.id.clone())
                .or_insert_with(|| FormDocument::new(summary.title.clone()));
        }
        Ok(())
    }
}

fn not_found(id: &str) -> FormForgeError {
    FormForgeError::NotFound(format!("form {id}"))
}
