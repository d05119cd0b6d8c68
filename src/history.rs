use std::collections::VecDeque;

use log::debug;

use crate::document::Document;

/// Default bound on each history stack.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Owns the undo/redo stacks of document snapshots and wraps every
/// mutation.
///
/// Each stack is bounded; at capacity the oldest snapshot is evicted so
/// long sessions cannot grow memory without limit. Snapshots are cheap:
/// a [`Document`] clone shares its elements.
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: VecDeque<Document>,
    redo_stack: VecDeque<Document>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// History bounded to `limit` snapshots per stack (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Record the pre-mutation document. Called exactly once per discrete
    /// user action, before the mutation is applied; this is the commit
    /// boundary (a drag records once at gesture-end, not per frame).
    /// Clears the redo stack.
    pub fn record_before_mutation(&mut self, doc: &Document) {
        self.push_bounded_undo(doc.clone());
        self.redo_stack.clear();
        debug!(
            "history: recorded snapshot, undo depth {}",
            self.undo_stack.len()
        );
    }

    /// Pop the most recent undo snapshot, stashing `current` on the redo
    /// stack. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let prev = self.undo_stack.pop_back()?;
        self.redo_stack.push_back(current.clone());
        if self.redo_stack.len() > self.limit {
            self.redo_stack.pop_front();
        }
        Some(prev)
    }

    /// Pop the most recent redo snapshot, stashing `current` on the undo
    /// stack. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let next = self.redo_stack.pop_back()?;
        self.push_bounded_undo(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_bounded_undo(&mut self, doc: Document) {
        self.undo_stack.push_back(doc);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }
}
