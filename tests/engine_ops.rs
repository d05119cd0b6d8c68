use canvas_editor::{
    EditorEngine, EditorEvent, ElementId, ElementKind, Geometry, MIN_ELEMENT_SIZE, PlaybackTable,
};

#[test]
fn add_text_then_undo_then_redo_round_trips_the_element() {
    let mut engine = EditorEngine::new();
    assert!(engine.document().is_empty());

    let id = engine.add_text();
    assert_eq!(engine.document().len(), 1);
    let element = engine.document().find(id).unwrap();
    assert_eq!((element.x, element.y), (50.0, 50.0));
    assert!(matches!(element.kind, ElementKind::Text { .. }));

    engine.undo();
    assert!(engine.document().is_empty());

    // Redo brings the exact same element back, same id.
    engine.redo();
    assert_eq!(engine.document().len(), 1);
    assert!(engine.document().contains(id));
}

#[test]
fn move_selected_without_a_selection_records_nothing() {
    let mut engine = EditorEngine::new();
    engine.add_text();
    let depth = engine.undo_depth();
    let before = engine.document().clone();

    engine.move_selected(10.0, 10.0);

    assert_eq!(engine.undo_depth(), depth);
    assert_eq!(*engine.document(), before);
}

#[test]
fn move_selected_translates_and_is_undoable() {
    let mut engine = EditorEngine::new();
    let id = engine.add_text();
    engine.select(id);

    engine.move_selected(10.0, -5.0);
    let element = engine.document().find(id).unwrap();
    assert_eq!((element.x, element.y), (60.0, 45.0));

    engine.undo();
    let element = engine.document().find(id).unwrap();
    assert_eq!((element.x, element.y), (50.0, 50.0));
}

#[test]
fn selection_changes_never_record_history() {
    let mut engine = EditorEngine::new();
    let id = engine.add_text();
    let depth = engine.undo_depth();

    engine.select(id);
    engine.click_background();
    engine.select(id);

    assert_eq!(engine.undo_depth(), depth);
}

#[test]
fn selecting_an_unknown_id_is_ignored() {
    let mut engine = EditorEngine::new();
    engine.add_text();
    engine.select(ElementId::new());
    assert_eq!(engine.selected_id(), None);
}

#[test]
fn drag_end_sets_absolute_position_and_records_once() {
    let mut engine = EditorEngine::new();
    let id = engine.add_text();
    let depth = engine.undo_depth();

    engine.apply_drag_end(id, 300.0, 240.0);

    let element = engine.document().find(id).unwrap();
    assert_eq!((element.x, element.y), (300.0, 240.0));
    assert_eq!(engine.undo_depth(), depth + 1);

    // Unknown target: tolerated silently, nothing recorded.
    engine.apply_drag_end(ElementId::new(), 1.0, 1.0);
    assert_eq!(engine.undo_depth(), depth + 1);
}

#[test]
fn transform_end_clamps_size_through_the_engine() {
    let mut engine = EditorEngine::new();
    let id = engine.add_image("a.png"); // 200x150
    engine.apply_transform_end(
        id,
        Geometry {
            x: 80.0,
            y: 80.0,
            rotation: 15.0,
            scale_x: 0.02,
            scale_y: 0.02,
        },
    );

    let element = engine.document().find(id).unwrap();
    assert_eq!((element.width, element.height), (MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
    assert_eq!(element.rotation, 15.0);

    engine.undo();
    let element = engine.document().find(id).unwrap();
    assert_eq!((element.width, element.height), (200.0, 150.0));
}

#[test]
fn send_backward_swaps_then_stops_at_the_back() {
    let mut engine = EditorEngine::new();
    let a = engine.add_text();
    let b = engine.add_text(); // front
    let depth = engine.undo_depth();

    engine.select(b);
    engine.send_backward();
    let order: Vec<_> = engine.document().ids().collect();
    assert_eq!(order, vec![b, a]);
    assert_eq!(engine.undo_depth(), depth + 1);

    // Already backmost: no mutation, no history entry.
    engine.send_backward();
    let order: Vec<_> = engine.document().ids().collect();
    assert_eq!(order, vec![b, a]);
    assert_eq!(engine.undo_depth(), depth + 1);
}

#[test]
fn bring_forward_at_the_front_is_a_no_op() {
    let mut engine = EditorEngine::new();
    engine.add_text();
    let b = engine.add_text();
    let depth = engine.undo_depth();

    engine.select(b);
    engine.bring_forward();
    assert_eq!(engine.undo_depth(), depth);

    // Without a selection nothing happens either.
    engine.click_background();
    engine.bring_forward();
    engine.send_backward();
    assert_eq!(engine.undo_depth(), depth);
}

#[test]
fn a_new_mutation_after_undo_disables_redo() {
    let mut engine = EditorEngine::new();
    engine.add_text();
    engine.undo();
    assert!(engine.can_redo());

    engine.add_image("a.png");
    assert!(!engine.can_redo());
}

#[test]
fn delete_selected_removes_and_clears_the_selection() {
    let mut engine = EditorEngine::new();
    let id = engine.add_text();
    engine.select(id);
    engine.drain_events();

    engine.delete_selected();

    assert!(engine.document().is_empty());
    assert_eq!(engine.selected_id(), None);
    let events = engine.drain_events();
    assert!(events.contains(&EditorEvent::ElementRemoved { id }));
    assert!(events.contains(&EditorEvent::SelectionChanged { selected: None }));

    // Deleted element comes back on undo.
    engine.undo();
    assert!(engine.document().contains(id));
}

#[test]
fn undoing_an_add_announces_the_removal() {
    let mut engine = EditorEngine::new();
    let id = engine.add_video("clip.webm");
    engine.drain_events();

    engine.undo();

    let events = engine.drain_events();
    assert!(events.contains(&EditorEvent::ElementRemoved { id }));
}

#[test]
fn selection_is_revalidated_when_the_document_is_replaced() {
    let mut engine = EditorEngine::new();
    let id = engine.add_text();
    engine.select(id);

    // Load a document that no longer contains the selected element.
    engine.load_document("[]").unwrap();

    assert_eq!(engine.selected_id(), None);
}

#[test]
fn drain_events_empties_the_queue() {
    let mut engine = EditorEngine::new();
    engine.add_text();
    assert!(!engine.drain_events().is_empty());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn removal_events_drive_playback_cleanup() {
    let mut engine = EditorEngine::new();
    let mut playback = PlaybackTable::new();

    let id = engine.add_video("clip.webm");
    playback.ensure(id);
    playback.play(id);
    playback.tick(1.5);
    assert!(playback.get(id).unwrap().is_playing());
    assert_eq!(playback.get(id).unwrap().position_secs(), 1.5);
    engine.drain_events();

    engine.select(id);
    engine.delete_selected();
    for event in engine.drain_events() {
        if let EditorEvent::ElementRemoved { id } = event {
            playback.release(id);
        }
    }

    assert!(playback.is_empty());
}

#[test]
fn playback_state_is_not_an_editable_document_property() {
    let mut engine = EditorEngine::new();
    let id = engine.add_video("clip.webm");
    let mut playback = PlaybackTable::new();
    playback.ensure(id);

    let before = engine.document().clone();
    playback.play(id);
    playback.seek(id, 42.0);

    // The document is untouched by playback, so nothing became undoable.
    assert_eq!(*engine.document(), before);
    assert_eq!(engine.undo_depth(), 1); // just the add
}
