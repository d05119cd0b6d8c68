use crate::element::ElementId;

/// Notifications emitted by the engine after it replaces the live
/// document or the selection changes.
///
/// `ElementRemoved` fires for every id that disappears from the live
/// document, whatever the cause (delete, undo of an add, load), so the
/// renderer adapter can release id-keyed resources deterministically
/// instead of relying on implicit collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    DocumentReplaced,
    SelectionChanged { selected: Option<ElementId> },
    ElementRemoved { id: ElementId },
}
