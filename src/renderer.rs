use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, pos2, vec2};

use crate::element::{Element, ElementId, ElementKind, Geometry};
use crate::engine::EditorEngine;
use crate::event::EditorEvent;
use crate::playback::PlaybackTable;
use crate::textures::TextureStore;

const CANVAS_BACKGROUND: Color32 = Color32::from_gray(238);
const SELECTION_COLOR: Color32 = Color32::from_rgb(0, 120, 255);
const RESIZE_HANDLE_SIZE: f32 = 10.0;

/// Draws the document with an egui painter and turns raw pointer
/// interaction into normalized gestures for the engine.
///
/// The renderer owns the id-keyed side-tables the document must never
/// contain: decoded image textures and video playback handles. It reports
/// gestures only at their end (one history entry per drag), and reads the
/// document as a snapshot; it never mutates engine state except through
/// gesture calls.
#[derive(Default)]
pub struct CanvasRenderer {
    textures: TextureStore,
    playback: PlaybackTable,
    interaction: Option<Interaction>,
}

/// In-flight pointer gesture, tracked locally so intermediate movement
/// frames draw a live preview without touching the document.
enum Interaction {
    Move { id: ElementId, delta: Vec2 },
    Resize { id: ElementId, start_size: Vec2, delta: Vec2 },
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playback(&self) -> &PlaybackTable {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackTable {
        &mut self.playback
    }

    /// React to engine notifications; removed elements release their
    /// textures and playback handles.
    pub fn process_events(&mut self, events: &[EditorEvent]) {
        for event in events {
            if let EditorEvent::ElementRemoved { id } = event {
                self.textures.release(*id);
                self.playback.release(*id);
            }
        }
    }

    /// Draw the current document snapshot and feed any finished gestures
    /// back into the engine.
    pub fn show(&mut self, ui: &mut Ui, engine: &mut EditorEngine) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let origin = response.rect.min;

        self.playback.tick(ui.input(|i| i.stable_dt));

        painter.rect_filled(response.rect, 0.0, CANVAS_BACKGROUND);

        // Sequence order is stacking order: later elements paint on top.
        let selected = engine.selected_id();
        for element in engine.document().elements() {
            let rect = self.preview_rect(origin, element);
            match &element.kind {
                ElementKind::Text { text, font_size } => {
                    painter.text(
                        rect.min,
                        Align2::LEFT_TOP,
                        text,
                        FontId::proportional(*font_size),
                        Color32::BLACK,
                    );
                }
                ElementKind::Image { source_ref } => {
                    self.textures.ensure(ui.ctx(), element.id(), source_ref);
                    if let Some(texture) = self.textures.get(element.id()) {
                        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                        painter.image(texture.id(), rect, uv, Color32::WHITE);
                    } else {
                        // Load failed or still unresolved: keep the element
                        // visible as a placeholder.
                        painter.rect_filled(rect, 0.0, Color32::from_gray(200));
                        let label = self
                            .textures
                            .failure(element.id())
                            .map_or("image".to_owned(), |err| format!("image: {err}"));
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            label,
                            FontId::proportional(12.0),
                            Color32::DARK_GRAY,
                        );
                    }
                }
                ElementKind::Video { .. } => {
                    let handle = self.playback.ensure(element.id());
                    let label = if handle.is_playing() {
                        format!("video {:.1}s", handle.position_secs())
                    } else {
                        "video (paused)".to_owned()
                    };
                    painter.rect_filled(rect, 0.0, Color32::from_gray(40));
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        label,
                        FontId::proportional(14.0),
                        Color32::WHITE,
                    );
                }
            }

            if selected == Some(element.id()) {
                painter.rect_stroke(rect, 0.0, Stroke::new(2.0, SELECTION_COLOR));
                painter.rect_filled(handle_rect(rect), 0.0, SELECTION_COLOR);
            }
        }

        self.handle_pointer(&response, origin, engine);

        // Playback advances while a video plays; keep frames coming.
        ui.ctx().request_repaint();
    }

    /// Element rect in screen space, adjusted for a live drag preview.
    fn preview_rect(&self, origin: Pos2, element: &Element) -> Rect {
        let mut min = origin + vec2(element.x, element.y);
        let mut size = vec2(element.width, element.height);
        match &self.interaction {
            Some(Interaction::Move { id, delta }) if *id == element.id() => {
                min += *delta;
            }
            Some(Interaction::Resize {
                id,
                start_size,
                delta,
            }) if *id == element.id() => {
                size = (*start_size + *delta).max(vec2(1.0, 1.0));
            }
            _ => {}
        }
        Rect::from_min_size(min, size)
    }

    fn handle_pointer(&mut self, response: &egui::Response, origin: Pos2, engine: &mut EditorEngine) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.interaction = self.begin_interaction(pos, origin, engine);
            }
        } else if response.dragged() {
            match &mut self.interaction {
                Some(Interaction::Move { delta, .. }) | Some(Interaction::Resize { delta, .. }) => {
                    *delta += response.drag_delta();
                }
                None => {}
            }
        } else if response.drag_stopped() {
            self.finish_interaction(engine);
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match hit_test(engine, origin, pos) {
                    Some(id) => engine.select(id),
                    None => engine.click_background(),
                }
            }
        }
    }

    /// Decide what a starting drag manipulates: the selected element's
    /// resize handle, an element body, or nothing.
    fn begin_interaction(
        &self,
        pos: Pos2,
        origin: Pos2,
        engine: &mut EditorEngine,
    ) -> Option<Interaction> {
        if let Some(id) = engine.selected_id() {
            if let Some(element) = engine.document().find(id) {
                let rect = element_rect(origin, element);
                if handle_rect(rect).contains(pos) {
                    return Some(Interaction::Resize {
                        id,
                        start_size: rect.size(),
                        delta: Vec2::ZERO,
                    });
                }
            }
        }
        match hit_test(engine, origin, pos) {
            Some(id) => {
                engine.select(id);
                Some(Interaction::Move {
                    id,
                    delta: Vec2::ZERO,
                })
            }
            None => {
                engine.click_background();
                None
            }
        }
    }

    /// Commit a finished gesture to the engine. This is the one point
    /// where a drag becomes a document mutation (and one history entry).
    fn finish_interaction(&mut self, engine: &mut EditorEngine) {
        match self.interaction.take() {
            Some(Interaction::Move { id, delta }) => {
                if let Some(element) = engine.document().find(id) {
                    let (x, y) = (element.x + delta.x, element.y + delta.y);
                    engine.apply_drag_end(id, x, y);
                }
            }
            Some(Interaction::Resize {
                id,
                start_size,
                delta,
            }) => {
                if let Some(element) = engine.document().find(id) {
                    let new_size = (start_size + delta).max(vec2(1.0, 1.0));
                    let geometry = Geometry {
                        x: element.x,
                        y: element.y,
                        rotation: element.rotation,
                        scale_x: new_size.x / start_size.x,
                        scale_y: new_size.y / start_size.y,
                    };
                    engine.apply_transform_end(id, geometry);
                }
            }
            None => {}
        }
    }
}

fn element_rect(origin: Pos2, element: &Element) -> Rect {
    Rect::from_min_size(
        origin + vec2(element.x, element.y),
        vec2(element.width, element.height),
    )
}

fn handle_rect(rect: Rect) -> Rect {
    Rect::from_center_size(rect.max, Vec2::splat(RESIZE_HANDLE_SIZE))
}

/// Topmost element under `pos`, if any. Checks front-to-back, so the
/// element painted last wins. Rotation is ignored here; hits use the
/// unrotated bounding rect.
fn hit_test(engine: &EditorEngine, origin: Pos2, pos: Pos2) -> Option<ElementId> {
    engine
        .document()
        .elements()
        .iter()
        .rev()
        .find(|e| element_rect(origin, e).contains(pos))
        .map(|e| e.id())
}
