use std::collections::VecDeque;

use log::{debug, warn};

use crate::document::Document;
use crate::element::{Element, ElementId, Geometry};
use crate::error::{LoadError, StoreError};
use crate::event::EditorEvent;
use crate::history::HistoryManager;
use crate::selection::SelectionController;
use crate::store::Store;

/// The editor façade: owns the live document, the history stacks, and the
/// selection, and exposes every user-facing operation.
///
/// Every discrete mutating operation records the pre-mutation document in
/// history exactly once before replacing the live document wholesale.
/// Operations whose preconditions are unmet (nothing selected, empty
/// stack, reorder at a boundary, unknown id) are silent no-ops that record
/// nothing.
///
/// Operations are synchronous and run to completion; the engine expects
/// gestures one at a time from the single UI thread. Renderer and store
/// only ever see snapshots or read-only views.
#[derive(Debug, Default)]
pub struct EditorEngine {
    document: Document,
    history: HistoryManager,
    selection: SelectionController,
    events: VecDeque<EditorEvent>,
}

impl EditorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose history keeps at most `limit` snapshots per stack.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: HistoryManager::with_limit(limit),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selection.selected_id()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Drain pending notifications (document replaced, selection changed,
    /// elements removed). The renderer adapter polls this once per frame.
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }

    // ---- element creation --------------------------------------------

    /// Append a text element with default content and geometry.
    pub fn add_text(&mut self) -> ElementId {
        self.add_element(Element::new_text())
    }

    /// Append an image element referencing `source_ref`.
    pub fn add_image(&mut self, source_ref: &str) -> ElementId {
        self.add_element(Element::new_image(source_ref))
    }

    /// Append a video element referencing `source_ref`.
    pub fn add_video(&mut self, source_ref: &str) -> ElementId {
        self.add_element(Element::new_video(source_ref))
    }

    fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id();
        debug!("add {} element {id}", element.kind_name());
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_added(element);
        self.commit(next);
        id
    }

    // ---- gestures -----------------------------------------------------

    /// A click that resolved to the element with `id`. Never records
    /// history.
    pub fn select(&mut self, id: ElementId) {
        if !self.document.contains(id) {
            return;
        }
        if self.selection.selected_id() != Some(id) {
            self.selection.select(id);
            self.events.push_back(EditorEvent::SelectionChanged {
                selected: Some(id),
            });
        }
    }

    /// A click that hit no element. Clears the selection; never records
    /// history.
    pub fn click_background(&mut self) {
        if self.selection.selected_id().is_some() {
            self.selection.clear();
            self.events
                .push_back(EditorEvent::SelectionChanged { selected: None });
        }
    }

    /// Translate the selected element by `(dx, dy)`. No-op without a
    /// selection.
    pub fn move_selected(&mut self, dx: f32, dy: f32) {
        let Some(id) = self.selection.selected_id() else {
            return;
        };
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_updated(id, |e| e.translate(dx, dy));
        self.commit(next);
    }

    /// Drag gesture ended: set the element's absolute position. Records
    /// history once, at gesture-end.
    pub fn apply_drag_end(&mut self, id: ElementId, x: f32, y: f32) {
        if !self.document.contains(id) {
            return;
        }
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_updated(id, |e| {
            e.x = x;
            e.y = y;
        });
        self.commit(next);
    }

    /// Transform gesture ended: apply the final geometry, absorbing scale
    /// factors into width/height. Records history once, at gesture-end.
    pub fn apply_transform_end(&mut self, id: ElementId, geometry: Geometry) {
        if !self.document.contains(id) {
            return;
        }
        self.history.record_before_mutation(&self.document);
        let next = self
            .document
            .with_updated(id, |e| e.apply_transform(geometry));
        self.commit(next);
    }

    // ---- stacking order ----------------------------------------------

    /// Swap the selected element with its next-front neighbour. No-op
    /// without a selection or when already frontmost (checked before the
    /// history push).
    pub fn bring_forward(&mut self) {
        let Some(id) = self.selection.selected_id() else {
            return;
        };
        let Some(index) = self.document.index_of(id) else {
            return;
        };
        if index + 1 == self.document.len() {
            return;
        }
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_reordered(id, index + 1);
        self.commit(next);
    }

    /// Swap the selected element with its next-back neighbour. No-op
    /// without a selection or when already backmost.
    pub fn send_backward(&mut self) {
        let Some(id) = self.selection.selected_id() else {
            return;
        };
        let Some(index) = self.document.index_of(id) else {
            return;
        };
        if index == 0 {
            return;
        }
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_reordered(id, index - 1);
        self.commit(next);
    }

    // ---- removal ------------------------------------------------------

    /// Delete the selected element. No-op without a selection. The
    /// removal is announced through [`EditorEvent::ElementRemoved`] so the
    /// renderer releases any id-keyed resources.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selection.selected_id() else {
            return;
        };
        debug!("delete element {id}");
        self.history.record_before_mutation(&self.document);
        let next = self.document.with_removed(id);
        self.commit(next);
    }

    // ---- history ------------------------------------------------------

    /// Restore the previous document snapshot. No-op when the undo stack
    /// is empty.
    pub fn undo(&mut self) {
        if let Some(prev) = self.history.undo(&self.document) {
            self.replace_document(prev);
        }
    }

    /// Restore the document undone most recently. No-op when the redo
    /// stack is empty.
    pub fn redo(&mut self) {
        if let Some(next) = self.history.redo(&self.document) {
            self.replace_document(next);
        }
    }

    // ---- persistence --------------------------------------------------

    /// Serialize the document to its persisted blob. Selection, history,
    /// and playback state are never part of the blob.
    pub fn serialize(&self) -> Result<String, StoreError> {
        Ok(self.document.to_json()?)
    }

    /// Replace the live document with a parsed blob. On a corrupt blob
    /// the current document is kept untouched.
    pub fn load_document(&mut self, blob: &str) -> Result<(), LoadError> {
        let doc = Document::from_json(blob)?;
        self.replace_document(doc);
        Ok(())
    }

    /// Save the serialized document to `store`.
    pub fn save_to(&self, store: &mut dyn Store) -> Result<(), StoreError> {
        let blob = self.serialize()?;
        store.save(&blob)
    }

    /// Load a document from `store`. Returns `Ok(false)` when the store
    /// holds nothing yet (a normal first-run state).
    pub fn load_from(&mut self, store: &dyn Store) -> Result<bool, LoadError> {
        match store.load()? {
            None => Ok(false),
            Some(blob) => {
                self.load_document(&blob)?;
                Ok(true)
            }
        }
    }

    // ---- internals ----------------------------------------------------

    /// Adopt `next` as the live document after a history-recorded
    /// mutation.
    fn commit(&mut self, next: Document) {
        self.replace_document(next);
    }

    /// Replace the live document wholesale, announce removed ids, and
    /// re-validate the selection against the new contents.
    fn replace_document(&mut self, next: Document) {
        let removed: Vec<ElementId> = self.document.ids().filter(|id| !next.contains(*id)).collect();
        self.document = next;
        self.events.push_back(EditorEvent::DocumentReplaced);
        for id in removed {
            debug!("element {id} left the document");
            self.events.push_back(EditorEvent::ElementRemoved { id });
        }
        let before = self.selection.selected_id();
        self.selection.on_document_changed(&self.document);
        let after = self.selection.selected_id();
        if after != before {
            warn!("selection {before:?} no longer present, cleared");
            self.events
                .push_back(EditorEvent::SelectionChanged { selected: after });
        }
    }
}
