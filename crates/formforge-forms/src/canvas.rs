//! The canvas: a document plus change notifications and drag reordering.
//!
//! Every effective mutation made through a [`Canvas`] publishes one
//! [`DocumentChange`] on its signal, so views re-render without polling.
//! No-op mutations (unknown id, `move(i, i)`) publish nothing.

use serde::Serialize;

use formforge_core::FormForgeResult;
use formforge_signals::Signal;

use crate::document::FormDocument;
use crate::editor::EditSession;
use crate::element::{ElementPatch, ElementTemplate, FormElement};

/// What changed in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocumentChange {
    Added { id: String, index: usize },
    Removed { id: String, index: usize },
    Moved { from: usize, to: usize },
    Updated { id: String },
    Renamed { title: String },
    Cleared,
    Loaded,
}

/// Whether hovering over the element at `hover_index` should move the dragged
/// element there.
///
/// `pointer_offset` is the pointer's distance from the top of the hovered
/// element and `target_height` its height. Dragging downward moves once the
/// pointer reaches the target's midpoint; dragging upward once it is at or
/// above it.
pub fn crosses_midpoint(
    drag_index: usize,
    hover_index: usize,
    pointer_offset: f64,
    target_height: f64,
) -> bool {
    let middle = target_height / 2.0;
    match drag_index.cmp(&hover_index) {
        std::cmp::Ordering::Less => pointer_offset >= middle,
        std::cmp::Ordering::Greater => pointer_offset <= middle,
        std::cmp::Ordering::Equal => false,
    }
}

/// An in-progress drag of one element.
///
/// Tracks the dragged element's current position. Dropping the session
/// aborts the drag; moves already committed stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    index: usize,
}

impl DragSession {
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// A document being edited, with change notifications.
#[derive(Debug)]
pub struct Canvas {
    document: FormDocument,
    changed: Signal<DocumentChange>,
    preview: bool,
}

impl Canvas {
    pub fn new(document: FormDocument) -> Self {
        Self {
            document,
            changed: Signal::new(),
            preview: false,
        }
    }

    pub const fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn into_document(self) -> FormDocument {
        self.document
    }

    /// The signal published after every effective mutation.
    pub const fn changes(&self) -> &Signal<DocumentChange> {
        &self.changed
    }

    /// Adds the element described by a drop payload and returns a copy of it.
    pub fn drop_element(&mut self, template: ElementTemplate) -> FormElement {
        let element = self.document.add(template).clone();
        self.publish(DocumentChange::Added {
            id: element.id().to_string(),
            index: element.index(),
        });
        element
    }

    pub fn remove(&mut self, id: &str) -> Option<FormElement> {
        let removed = self.document.remove(id)?;
        self.publish(DocumentChange::Removed {
            id: removed.id().to_string(),
            index: removed.index(),
        });
        Some(removed)
    }

    pub fn move_element(&mut self, from: usize, to: usize) -> bool {
        if !self.document.move_element(from, to) {
            return false;
        }
        let to = to.min(self.document.len() - 1);
        self.publish(DocumentChange::Moved { from, to });
        true
    }

    pub fn update(&mut self, id: &str, patch: ElementPatch) -> bool {
        let updated = self.document.update(id, patch);
        if updated {
            self.publish(DocumentChange::Updated { id: id.to_string() });
        }
        updated
    }

    /// Commits a properties edit session against this canvas's document.
    pub fn commit(&mut self, session: EditSession) -> bool {
        let id = session.element_id().to_string();
        let updated = session.commit(&mut self.document);
        if updated {
            self.publish(DocumentChange::Updated { id });
        }
        updated
    }

    /// Renames the document.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTitle` for a blank title.
    pub fn set_title(&mut self, title: &str) -> FormForgeResult<()> {
        self.document.set_title(title)?;
        self.publish(DocumentChange::Renamed {
            title: self.document.title.clone(),
        });
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.document.is_empty() {
            return;
        }
        self.document.clear();
        self.publish(DocumentChange::Cleared);
    }

    /// Replaces the whole document, e.g. after opening a saved form.
    pub fn load(&mut self, document: FormDocument) {
        self.document = document;
        self.publish(DocumentChange::Loaded);
    }

    /// Starts dragging the element at `index`. Returns `None` if there is none.
    pub fn begin_drag(&self, index: usize) -> Option<DragSession> {
        (index < self.document.len()).then_some(DragSession { index })
    }

    /// Handles the dragged element hovering over the element at `target_index`.
    ///
    /// Commits a move when the pointer crosses the target's midpoint in the
    /// direction of travel, after which the session tracks the new position.
    /// Returns `true` if a move was committed.
    pub fn hover(
        &mut self,
        session: &mut DragSession,
        target_index: usize,
        pointer_offset: f64,
        target_height: f64,
    ) -> bool {
        if target_index >= self.document.len()
            || !crosses_midpoint(session.index, target_index, pointer_offset, target_height)
        {
            return false;
        }
        let moved = self.move_element(session.index, target_index);
        if moved {
            session.index = target_index;
        }
        moved
    }

    pub const fn is_preview(&self) -> bool {
        self.preview
    }

    pub fn set_preview(&mut self, preview: bool) {
        self.preview = preview;
    }

    /// Flips preview mode and returns the new state.
    pub fn toggle_preview(&mut self) -> bool {
        self.preview = !self.preview;
        self.preview
    }

    fn publish(&self, change: DocumentChange) {
        tracing::trace!(?change, "document changed");
        self.changed.send(&change);
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(FormDocument::new("Untitled Form"))
    }
}
