#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod document;
pub mod element;
pub mod engine;
pub mod error;
pub mod event;
pub mod history;
pub mod playback;
pub mod renderer;
pub mod selection;
pub mod store;
pub mod textures;

pub use app::CanvasApp;
pub use document::{Document, ElementRef};
pub use element::{Element, ElementId, ElementKind, Geometry, MIN_ELEMENT_SIZE};
pub use engine::EditorEngine;
pub use error::{LoadError, StoreError};
pub use event::EditorEvent;
pub use history::HistoryManager;
pub use playback::{PlaybackHandle, PlaybackTable};
pub use renderer::CanvasRenderer;
pub use selection::SelectionController;
pub use store::{FileStore, MemoryStore, Store};
