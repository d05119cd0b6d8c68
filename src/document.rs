use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::element::{Element, ElementId};
use crate::error::LoadError;

// Immutable element for sharing between the live document and history
// snapshots.
pub type ElementRef = Arc<Element>;

/// Ordered sequence of elements; the single source of truth for scene
/// contents and stacking order (front = end of sequence).
///
/// All mutators return a new `Document` value. The live document is
/// replaced wholesale by the engine, so snapshots taken for history stay
/// valid indefinitely. Cloning shares the underlying elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<ElementRef>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from parsed element records, rejecting duplicate
    /// ids.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for element in &elements {
            if !seen.insert(element.id()) {
                return Err(LoadError::DuplicateId { id: element.id() });
            }
        }
        Ok(Self {
            elements: elements.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn elements(&self) -> &[ElementRef] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id).map(Arc::as_ref)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.iter().map(|e| e.id())
    }

    /// New document with `element` appended at the front of the stacking
    /// order.
    pub fn with_added(&self, element: Element) -> Self {
        let mut elements = self.elements.clone();
        elements.push(Arc::new(element));
        Self { elements }
    }

    /// New document with `patch` applied to the element with `id`.
    /// Returns the document unchanged if the id is not present.
    pub fn with_updated(&self, id: ElementId, patch: impl FnOnce(&mut Element)) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let mut elements = self.elements.clone();
        let mut element = (*elements[index]).clone();
        patch(&mut element);
        elements[index] = Arc::new(element);
        Self { elements }
    }

    /// New document with the element moved to `new_index`, clamped to the
    /// valid range. Moving to the current position returns the document
    /// unchanged.
    pub fn with_reordered(&self, id: ElementId, new_index: usize) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let new_index = new_index.min(self.elements.len() - 1);
        if new_index == index {
            return self.clone();
        }
        let mut elements = self.elements.clone();
        let moved = elements.remove(index);
        elements.insert(new_index, moved);
        Self { elements }
    }

    /// New document without the element with `id`. Returns the document
    /// unchanged if the id is not present.
    pub fn with_removed(&self, id: ElementId) -> Self {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let mut elements = self.elements.clone();
        elements.remove(index);
        Self { elements }
    }

    /// Serialize to the persisted blob layout: a JSON array of element
    /// records. Transient state (selection, history, playback) is never
    /// part of the blob.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.elements)
    }

    /// Parse a persisted blob. Unknown kinds, missing fields, and
    /// duplicate ids are corrupt-record errors; no partially-valid
    /// document is ever produced.
    pub fn from_json(blob: &str) -> Result<Self, LoadError> {
        let elements: Vec<Element> = serde_json::from_str(blob)?;
        Self::from_elements(elements)
    }
}
