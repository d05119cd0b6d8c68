use crate::document::Document;
use crate::element::ElementId;

/// Tracks at most one selected element id.
///
/// The controller never owns an element; the id is a pure lookup key into
/// the live document and must be re-validated after every document
/// replacement so a stale id cannot survive an undo, delete, or load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionController {
    selected: Option<ElementId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    /// Clears the selection (background click resolves to this).
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if the selected id no longer exists in `doc`.
    pub fn on_document_changed(&mut self, doc: &Document) {
        if let Some(id) = self.selected {
            if !doc.contains(id) {
                self.selected = None;
            }
        }
    }
}
