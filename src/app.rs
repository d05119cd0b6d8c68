use egui::Button;
use log::{error, info};

use crate::engine::EditorEngine;
use crate::renderer::CanvasRenderer;
use crate::store::FileStore;

/// Default media sources for the toolbar's add buttons.
const DEFAULT_IMAGE_SOURCE: &str = "https://picsum.photos/200";
const DEFAULT_VIDEO_SOURCE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/transcoded/c/c4/Physicsworks.ogv/Physicsworks.ogv.240p.vp9.webm";

const TOOLBAR_WIDTH: f32 = 200.0;
const ARROW_STEP: f32 = 10.0;

/// The eframe shell: toolbar on the left, canvas in the center.
///
/// Owns the engine and the renderer adapter and wires them together; all
/// document mutation flows through the engine.
pub struct CanvasApp {
    engine: EditorEngine,
    renderer: CanvasRenderer,
    store: FileStore,
    status: Option<String>,
}

impl CanvasApp {
    /// Called once before the first frame. Restores the previous canvas
    /// if one was saved; an absent store is a normal first run.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let store = FileStore::new("canvas_state.json");
        let mut engine = EditorEngine::new();
        let mut status = None;
        match engine.load_from(&store) {
            Ok(true) => info!("restored canvas from {}", store.path().display()),
            Ok(false) => {}
            Err(err) => {
                error!("could not restore canvas: {err}");
                status = Some(format!("Load failed: {err}"));
            }
        }
        Self {
            engine,
            renderer: CanvasRenderer::new(),
            store,
            status,
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Canvas");
        ui.separator();

        if ui.button("Add Text").clicked() {
            self.engine.add_text();
        }
        if ui.button("Add Image").clicked() {
            self.engine.add_image(DEFAULT_IMAGE_SOURCE);
        }
        if ui.button("Add Video").clicked() {
            self.engine.add_video(DEFAULT_VIDEO_SOURCE);
        }

        ui.separator();
        ui.label("Playback:");
        ui.horizontal(|ui| {
            let selected = self.engine.selected_id();
            if ui.button("Play").clicked() {
                if let Some(id) = selected {
                    self.renderer.playback_mut().play(id);
                }
            }
            if ui.button("Pause").clicked() {
                if let Some(id) = selected {
                    self.renderer.playback_mut().pause(id);
                }
            }
            if ui.button("Stop").clicked() {
                if let Some(id) = selected {
                    self.renderer.playback_mut().stop(id);
                }
            }
        });

        ui.separator();
        ui.label("Move Selected:");
        ui.horizontal(|ui| {
            if ui.button("Up").clicked() {
                self.engine.move_selected(0.0, -ARROW_STEP);
            }
            if ui.button("Down").clicked() {
                self.engine.move_selected(0.0, ARROW_STEP);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Left").clicked() {
                self.engine.move_selected(-ARROW_STEP, 0.0);
            }
            if ui.button("Right").clicked() {
                self.engine.move_selected(ARROW_STEP, 0.0);
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.engine.can_undo(), Button::new("Undo"))
                .clicked()
            {
                self.engine.undo();
            }
            if ui
                .add_enabled(self.engine.can_redo(), Button::new("Redo"))
                .clicked()
            {
                self.engine.redo();
            }
        });

        ui.separator();
        ui.label("Layer Order:");
        if ui.button("Bring Forward").clicked() {
            self.engine.bring_forward();
        }
        if ui.button("Send Backward").clicked() {
            self.engine.send_backward();
        }

        ui.separator();
        if ui.button("Delete Selected").clicked() {
            self.engine.delete_selected();
        }

        ui.separator();
        ui.label("Save / Load:");
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.status = Some(match self.engine.save_to(&mut self.store) {
                    Ok(()) => "Canvas saved.".to_owned(),
                    Err(err) => {
                        error!("save failed: {err}");
                        format!("Save failed: {err}")
                    }
                });
            }
            if ui.button("Load").clicked() {
                self.status = Some(match self.engine.load_from(&self.store) {
                    Ok(true) => "Canvas loaded.".to_owned(),
                    Ok(false) => "No saved canvas found.".to_owned(),
                    Err(err) => {
                        error!("load failed: {err}");
                        format!("Load failed: {err}")
                    }
                });
            }
        });

        if let Some(status) = &self.status {
            ui.separator();
            ui.label(status.clone());
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("toolbar")
            .exact_width(TOOLBAR_WIDTH)
            .show(ctx, |ui| self.toolbar(ui));

        // Release id-keyed renderer resources for anything the toolbar
        // actions just removed (delete, undo, load).
        let events = self.engine.drain_events();
        self.renderer.process_events(&events);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.renderer.show(ui, &mut self.engine);
        });
    }
}
