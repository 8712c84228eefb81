//! The live single-user editing session.
//!
//! An [`EditorSession`] wraps one [`ThumbnailDocument`] plus the transient
//! selection, and mediates between external intents (toolbar actions) and
//! document edit operations. Every mutation pushes the prior document value
//! onto a bounded undo stack; the session never rasterizes or persists
//! itself - it hands value snapshots to collaborators.

use serde::{Deserialize, Serialize};

use crate::template::Template;
use crate::{Element, ElementId, ElementPatch, ThumbnailDocument};

/// Maximum retained undo/redo depth.
const HISTORY_LIMIT: usize = 64;

/// A snapshot handed to the export collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Requested output format; validation is the collaborator's job.
    pub format: String,
    /// The document to rasterize, immune to later session edits.
    pub document: ThumbnailDocument,
}

/// The live, single-user editing context.
#[derive(Debug, Clone)]
pub struct EditorSession {
    document: ThumbnailDocument,
    selection: Option<ElementId>,
    undo: Vec<ThumbnailDocument>,
    redo: Vec<ThumbnailDocument>,
}

impl EditorSession {
    /// Start a session on a fresh empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::from_document(ThumbnailDocument::new())
    }

    /// Start a session on an existing document.
    #[must_use]
    pub fn from_document(document: ThumbnailDocument) -> Self {
        Self {
            document,
            selection: None,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Start a session on a fresh instantiation of a template.
    #[must_use]
    pub fn from_template(template: &Template) -> Self {
        Self::from_document(template.instantiate())
    }

    /// The current document.
    #[must_use]
    pub fn document(&self) -> &ThumbnailDocument {
        &self.document
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The currently selected element, if any.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.document.element(id))
    }

    /// Change the selection.
    ///
    /// Selecting an ID not present in the document is a no-op; passing
    /// `None` clears the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        if let Some(target) = id {
            if self.document.contains(target) {
                self.selection = Some(target);
            }
        } else {
            self.selection = None;
        }
    }

    /// Add a default text element and select it.
    pub fn add_text(&mut self) -> ElementId {
        let element = Element::text(self.document.next_z_index());
        let id = element.id;
        self.commit(self.document.add_element(element));
        self.selection = Some(id);
        id
    }

    /// Add a sticker element with the given glyph and select it.
    pub fn add_sticker(&mut self, symbol: &str) -> ElementId {
        let element = Element::sticker(symbol, self.document.next_z_index());
        let id = element.id;
        self.commit(self.document.add_element(element));
        self.selection = Some(id);
        id
    }

    /// Apply a patch to the selected element; no-op without a selection.
    pub fn update_selected(&mut self, patch: &ElementPatch) {
        if let Some(id) = self.selection {
            self.commit(self.document.update_element(id, patch));
        }
    }

    /// Delete the selected element and clear the selection; no-op without
    /// a selection.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selection {
            self.commit(self.document.delete_element(id));
            self.selection = None;
        }
    }

    /// Delete an element by ID, clearing the selection if it referenced it.
    pub fn delete_element(&mut self, id: ElementId) {
        self.commit(self.document.delete_element(id));
        if self.selection == Some(id) {
            self.selection = None;
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Step back to the previous document value.
    ///
    /// Returns whether a step was taken.
    pub fn undo(&mut self) -> bool {
        let Some(prior) = self.undo.pop() else {
            return false;
        };
        self.redo.push(std::mem::replace(&mut self.document, prior));
        self.drop_stale_selection();
        true
    }

    /// Reapply the most recently undone document value.
    ///
    /// Returns whether a step was taken.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        self.undo.push(std::mem::replace(&mut self.document, next));
        self.drop_stale_selection();
        true
    }

    /// Build an export snapshot for the external export collaborator.
    #[must_use]
    pub fn export_request(&self, format: &str) -> ExportRequest {
        ExportRequest {
            format: format.to_string(),
            document: self.document.clone(),
        }
    }

    /// Build a save snapshot for the external persistence collaborator.
    #[must_use]
    pub fn save_request(&self) -> ThumbnailDocument {
        self.document.clone()
    }

    /// Install a new document value, recording history.
    ///
    /// A mutation that produced an identical value records nothing. New
    /// mutations clear the redo stack.
    fn commit(&mut self, next: ThumbnailDocument) {
        if next == self.document {
            return;
        }
        if self.undo.len() == HISTORY_LIMIT {
            self.undo.remove(0);
        }
        self.undo.push(std::mem::replace(&mut self.document, next));
        self.redo.clear();
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.document.contains(id) {
                self.selection = None;
            }
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::DEFAULT_TEXT_CONTENT;
    use crate::{ElementKind, ElementStyle};

    #[test]
    fn test_add_text_default_element() {
        let mut session = EditorSession::new();
        let id = session.add_text();

        let doc = session.document();
        assert_eq!(doc.element_count(), 1);
        let element = doc.element(id).expect("element exists");
        assert!(matches!(element.kind, ElementKind::Text { .. }));
        assert_eq!(element.content(), Some(DEFAULT_TEXT_CONTENT));
        assert!((element.x - 100.0).abs() < f32::EPSILON);
        assert!((element.y - 100.0).abs() < f32::EPSILON);
        assert!((element.width - 300.0).abs() < f32::EPSILON);
        assert!((element.height - 80.0).abs() < f32::EPSILON);
        assert_eq!(element.z_index, 1);
        let style = element.style.as_ref().expect("style present");
        assert_eq!(style.font_size, Some(48.0));
        assert_eq!(session.selection(), Some(id));
    }

    #[test]
    fn test_two_stickers_get_sequential_z_indices() {
        let mut session = EditorSession::new();
        let fire = session.add_sticker("🔥");
        let rocket = session.add_sticker("🚀");

        let doc = session.document();
        assert_eq!(doc.element_count(), 2);
        assert_eq!(doc.element(fire).expect("fire").z_index, 1);
        assert_eq!(doc.element(rocket).expect("rocket").z_index, 2);
        assert_eq!(doc.elements[0].content(), Some("🔥"));
        assert_eq!(doc.elements[1].content(), Some("🚀"));
    }

    #[test]
    fn test_update_selected_without_selection_is_noop() {
        let mut session = EditorSession::new();
        session.add_text();
        session.select(None);

        let before = session.document().clone();
        session.update_selected(&ElementPatch::content("Hello"));
        assert_eq!(session.document(), &before);
    }

    #[test]
    fn test_update_selected_applies_patch() {
        let mut session = EditorSession::new();
        let id = session.add_text();
        session.update_selected(&ElementPatch::content("Hello"));
        assert_eq!(
            session.document().element(id).expect("exists").content(),
            Some("Hello")
        );
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = EditorSession::new();
        let id = session.add_text();
        session.delete_selected();
        assert!(session.document().is_empty());
        assert_eq!(session.selection(), None);

        // And a second delete is a no-op
        let before = session.document().clone();
        session.delete_selected();
        assert_eq!(session.document(), &before);
        let _ = id;
    }

    #[test]
    fn test_select_unknown_id_is_noop() {
        let mut session = EditorSession::new();
        let id = session.add_text();
        session.select(Some(ElementId::new()));
        assert_eq!(session.selection(), Some(id));
    }

    #[test]
    fn test_undo_restores_prior_value_and_redo_reapplies() {
        let mut session = EditorSession::new();
        let empty = session.document().clone();
        session.add_text();
        let with_text = session.document().clone();

        assert!(session.undo());
        assert_eq!(session.document(), &empty);
        assert_eq!(session.selection(), None, "selection dropped with element");

        assert!(session.redo());
        assert_eq!(session.document(), &with_text);

        assert!(!session.redo(), "redo stack exhausted");
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut session = EditorSession::new();
        session.add_text();
        assert!(session.undo());
        assert!(session.can_redo());

        session.add_sticker("⭐");
        assert!(!session.can_redo());
    }

    #[test]
    fn test_identical_mutation_records_no_history() {
        let mut session = EditorSession::new();
        let id = session.add_text();
        let depth_before = session.can_redo();
        assert!(!depth_before);

        // Patch that matches current values exactly
        session.update_selected(&ElementPatch::position(100.0, 100.0));
        assert!(session.undo());
        // One undo steps all the way back to the empty document: the
        // identical patch pushed nothing.
        assert!(session.document().is_empty());
        let _ = id;
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = EditorSession::new();
        for _ in 0..(HISTORY_LIMIT + 10) {
            session.add_sticker("⭐");
        }
        let mut steps = 0;
        while session.undo() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_LIMIT);
    }

    #[test]
    fn test_style_merge_is_caller_side() {
        let mut session = EditorSession::new();
        session.add_text();

        // Caller merges the current style before patching, as the UI does
        // when dragging a single slider.
        let merged = ElementStyle {
            font_size: Some(72.0),
            ..session
                .selected_element()
                .and_then(|e| e.style.clone())
                .unwrap_or_default()
        };
        session.update_selected(&ElementPatch::style(merged));

        let style = session
            .selected_element()
            .and_then(|e| e.style.as_ref())
            .expect("style present");
        assert_eq!(style.font_size, Some(72.0));
        assert_eq!(style.font_family.as_deref(), Some("Inter"));
    }

    #[test]
    fn test_export_request_is_a_snapshot() {
        let mut session = EditorSession::new();
        session.add_text();
        let request = session.export_request("png");
        assert_eq!(request.format, "png");
        assert_eq!(&request.document, session.document());

        session.add_sticker("🔥");
        assert_ne!(&request.document, session.document());
    }
}
