use std::collections::HashMap;
use std::path::Path;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::warn;
use thiserror::Error;

use crate::element::ElementId;

/// Errors decoding an image element's media resource.
#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Id-keyed cache of image textures for the canvas renderer.
///
/// Loading happens lazily on first draw. A failed load is remembered so
/// it does not retry every frame and never blocks other operations; the
/// element stays in the document and draws as a placeholder until
/// `retry` is called.
#[derive(Default)]
pub struct TextureStore {
    textures: HashMap<ElementId, TextureHandle>,
    failed: HashMap<ElementId, String>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ElementId) -> Option<&TextureHandle> {
        self.textures.get(&id)
    }

    /// The load failure recorded for `id`, if any.
    pub fn failure(&self, id: ElementId) -> Option<&str> {
        self.failed.get(&id).map(String::as_str)
    }

    /// Make sure a texture exists for `id`, decoding `source_ref` as a
    /// local image file on first use.
    pub fn ensure(&mut self, ctx: &Context, id: ElementId, source_ref: &str) {
        if self.textures.contains_key(&id) || self.failed.contains_key(&id) {
            return;
        }
        match load_color_image(source_ref) {
            Ok(color) => {
                let handle = ctx.load_texture(format!("element-{id}"), color, TextureOptions::LINEAR);
                self.textures.insert(id, handle);
            }
            Err(err) => {
                warn!("image {source_ref} for element {id} failed to load: {err}");
                self.failed.insert(id, err.to_string());
            }
        }
    }

    /// Forget a recorded failure so the next draw attempts the load
    /// again.
    pub fn retry(&mut self, id: ElementId) {
        self.failed.remove(&id);
    }

    /// Drop cached state for a removed element.
    pub fn release(&mut self, id: ElementId) {
        self.textures.remove(&id);
        self.failed.remove(&id);
    }
}

fn load_color_image(source_ref: &str) -> Result<ColorImage, TextureLoadError> {
    let rgba = image::open(Path::new(source_ref))?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
