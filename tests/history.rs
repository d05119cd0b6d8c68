use canvas_editor::{Document, Element, HistoryManager};

fn doc_with(n: usize) -> Document {
    let mut doc = Document::new();
    for _ in 0..n {
        doc = doc.with_added(Element::new_text());
    }
    doc
}

#[test]
fn undo_restores_the_recorded_snapshot() {
    let mut history = HistoryManager::new();
    let before = doc_with(1);
    let after = before.with_added(Element::new_text());

    history.record_before_mutation(&before);
    let restored = history.undo(&after).unwrap();

    assert_eq!(restored, before);
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

#[test]
fn undo_on_empty_stack_is_a_no_op() {
    let mut history = HistoryManager::new();
    assert!(history.undo(&doc_with(1)).is_none());
    assert!(!history.can_redo());
}

#[test]
fn redo_restores_the_document_that_existed_before_the_undo() {
    let mut history = HistoryManager::new();
    let v1 = doc_with(1);
    let v2 = v1.with_added(Element::new_text());

    history.record_before_mutation(&v1);
    let undone = history.undo(&v2).unwrap();
    assert_eq!(undone, v1);

    let redone = history.redo(&undone).unwrap();
    assert_eq!(redone, v2);
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn interleaved_undo_redo_walks_the_same_versions() {
    let mut history = HistoryManager::new();
    let v1 = doc_with(1);
    let v2 = doc_with(2);
    let v3 = doc_with(3);

    // v1 -> v2 -> v3 with a snapshot before each step.
    history.record_before_mutation(&v1);
    history.record_before_mutation(&v2);

    let back_to_v2 = history.undo(&v3).unwrap();
    assert_eq!(back_to_v2, v2);
    let back_to_v1 = history.undo(&back_to_v2).unwrap();
    assert_eq!(back_to_v1, v1);

    let forward_to_v2 = history.redo(&back_to_v1).unwrap();
    assert_eq!(forward_to_v2, v2);
    let forward_to_v3 = history.redo(&forward_to_v2).unwrap();
    assert_eq!(forward_to_v3, v3);
    assert!(!history.can_redo());
}

#[test]
fn a_new_mutation_clears_the_redo_stack() {
    let mut history = HistoryManager::new();
    let v1 = doc_with(1);
    let v2 = doc_with(2);

    history.record_before_mutation(&v1);
    let undone = history.undo(&v2).unwrap();
    assert!(history.can_redo());

    history.record_before_mutation(&undone);
    assert!(!history.can_redo());
}

#[test]
fn the_oldest_snapshot_is_evicted_at_capacity() {
    let mut history = HistoryManager::with_limit(2);
    let v1 = doc_with(1);
    let v2 = doc_with(2);
    let v3 = doc_with(3);
    let v4 = doc_with(4);

    history.record_before_mutation(&v1);
    history.record_before_mutation(&v2);
    history.record_before_mutation(&v3);
    assert_eq!(history.undo_depth(), 2);

    // v1 was evicted; undo bottoms out at v2.
    assert_eq!(history.undo(&v4).unwrap(), v3);
    assert_eq!(history.undo(&v3).unwrap(), v2);
    assert!(!history.can_undo());
}
