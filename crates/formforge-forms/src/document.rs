//! The form document: an ordered sequence of elements plus title and timestamps.
//!
//! Invariants kept by every method here:
//!
//! - `elements()[i].index() == i` for every `i`. Structural changes re-derive
//!   every index from position instead of patching them incrementally.
//! - Element ids are unique within the document and never reused, even after
//!   the element carrying one is removed.
//! - Only choice kinds (see [`ElementType::has_options`]) carry `options`.
//!
//! Mutations on an unknown id or an out-of-range index are silent no-ops; the
//! boolean / `Option` results say whether anything changed.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formforge_core::FormForgeError;

use crate::catalog::ElementType;
use crate::element::{ElementPatch, ElementTemplate, FormElement};

/// A whole form: the unit of export and save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub title: String,
    #[serde(default)]
    elements: Vec<FormElement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Millisecond stamp of the last generated id; keeps ids unique when
    /// several elements are dropped within the same millisecond.
    #[serde(skip)]
    last_stamp: i64,
}

impl PartialEq for FormDocument {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.elements == other.elements
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

impl FormDocument {
    /// Creates an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            elements: Vec::new(),
            created_at: now,
            updated_at: now,
            last_stamp: 0,
        }
    }

    /// The elements in display order.
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by id.
    pub fn get(&self, id: &str) -> Option<&FormElement> {
        self.elements.iter().find(|el| el.id() == id)
    }

    /// The position of the element with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == id)
    }

    /// Renames the document.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::EmptyTitle`] if the trimmed title is empty;
    /// the document is left unchanged.
    pub fn set_title(&mut self, title: &str) -> Result<(), FormForgeError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(FormForgeError::EmptyTitle);
        }
        self.title = title.to_string();
        self.touch();
        Ok(())
    }

    /// Appends a new element built from `template` and returns it.
    ///
    /// The element gets a fresh id (`<type>-<millis>`) and
    /// `index == previous len`; no other element's index changes.
    pub fn add(&mut self, template: ElementTemplate) -> &FormElement {
        let id = self.next_id(template.element_type);
        let index = self.elements.len();
        tracing::debug!(%id, index, "adding element");

        let mut element = FormElement::from_template(id, index, template);
        element.enforce_options_invariant();
        self.elements.push(element);
        self.touch();
        &self.elements[index]
    }

    /// Removes the element with the given id and re-indexes the survivors.
    ///
    /// Returns the removed element, or `None` (leaving the document untouched)
    /// if no element has that id.
    pub fn remove(&mut self, id: &str) -> Option<FormElement> {
        let pos = self.position(id)?;
        let removed = self.elements.remove(pos);
        self.reindex();
        self.touch();
        tracing::debug!(id, pos, "removed element");
        Some(removed)
    }

    /// Moves the element at `from` so that it ends up at `to`, shifting the
    /// elements in between (splice semantics, not a swap), then re-indexes.
    ///
    /// - `from == to` is a no-op.
    /// - `from >= len` is a no-op.
    /// - `to >= len` is clamped to the last position, so `to == len` means
    ///   "move to end".
    ///
    /// Returns `true` if the order changed.
    pub fn move_element(&mut self, from: usize, to: usize) -> bool {
        let len = self.elements.len();
        if from >= len {
            tracing::debug!(from, len, "move source out of range; ignoring");
            return false;
        }
        let to = to.min(len - 1);
        if from == to {
            return false;
        }

        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        self.reindex();
        self.touch();
        tracing::debug!(from, to, "moved element");
        true
    }

    /// Shallow-merges `patch` into the element with the given id.
    ///
    /// Never changes the element's id, index, or type. Returns `false` if no
    /// element has that id or the patch is empty.
    pub fn update(&mut self, id: &str, patch: ElementPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == id) else {
            return false;
        };
        element.apply(patch);
        self.touch();
        true
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        if !self.elements.is_empty() {
            self.elements.clear();
            self.touch();
        }
    }

    /// Returns a copy of this document under a new title with fresh
    /// timestamps. Element ids are kept; they only need to be unique within
    /// one document.
    #[must_use]
    pub fn duplicate_as(&self, title: impl Into<String>) -> Self {
        let mut copy = Self::new(title);
        copy.elements = self.elements.clone();
        copy.last_stamp = self.last_stamp;
        copy
    }

    /// Restores the invariants on a document that came from outside
    /// (deserialized JSON): indices from positions, options only on choice
    /// kinds, and an id stamp past every `<type>-<millis>` id already present.
    ///
    /// # Errors
    ///
    /// Returns [`FormForgeError::Serialization`] if two elements share an id;
    /// the document is left unchanged.
    pub fn normalize(&mut self) -> Result<(), FormForgeError> {
        let mut seen = HashSet::with_capacity(self.elements.len());
        if let Some(dup) = self.elements.iter().find(|el| !seen.insert(el.id())) {
            return Err(FormForgeError::Serialization(format!(
                "duplicate element id {:?}",
                dup.id()
            )));
        }

        for element in &mut self.elements {
            element.enforce_options_invariant();
        }
        self.reindex();
        self.last_stamp = self
            .elements
            .iter()
            .filter_map(|el| el.id().rsplit_once('-')?.1.parse::<i64>().ok())
            .fold(self.last_stamp, i64::max);
        Ok(())
    }

    fn reindex(&mut self) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.set_index(i);
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Allocates `<type>-<millis>`. The stamp is strictly increasing per
    /// document and skips any value that would collide with an existing id.
    fn next_id(&mut self, element_type: ElementType) -> String {
        let mut stamp = Utc::now().timestamp_millis().max(self.last_stamp + 1);
        loop {
            let candidate = format!("{}-{stamp}", element_type.tag());
            if self.get(&candidate).is_none() {
                self.last_stamp = stamp;
                return candidate;
            }
            stamp += 1;
        }
    }
}
