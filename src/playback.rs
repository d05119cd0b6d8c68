use std::collections::HashMap;

use log::debug;

use crate::element::ElementId;

/// Transient playback state for one video element.
///
/// Owned by the renderer adapter, never serialized and never part of an
/// undo/redo snapshot; playback is not an editable document property.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackHandle {
    playing: bool,
    position_secs: f32,
}

impl PlaybackHandle {
    fn new() -> Self {
        Self {
            playing: false,
            position_secs: 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position_secs(&self) -> f32 {
        self.position_secs
    }
}

/// Side-table of playback handles keyed by element id.
///
/// Handles are created lazily when a video element first draws and
/// released explicitly when the engine announces the element's removal,
/// so cleanup is deterministic.
#[derive(Debug, Default)]
pub struct PlaybackTable {
    handles: HashMap<ElementId, PlaybackHandle>,
}

impl PlaybackTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a (paused) handle exists for `id`.
    pub fn ensure(&mut self, id: ElementId) -> &PlaybackHandle {
        self.handles.entry(id).or_insert_with(PlaybackHandle::new)
    }

    pub fn get(&self, id: ElementId) -> Option<&PlaybackHandle> {
        self.handles.get(&id)
    }

    pub fn play(&mut self, id: ElementId) {
        if let Some(handle) = self.handles.get_mut(&id) {
            handle.playing = true;
        }
    }

    pub fn pause(&mut self, id: ElementId) {
        if let Some(handle) = self.handles.get_mut(&id) {
            handle.playing = false;
        }
    }

    /// Pause and rewind to the start.
    pub fn stop(&mut self, id: ElementId) {
        if let Some(handle) = self.handles.get_mut(&id) {
            handle.playing = false;
            handle.position_secs = 0.0;
        }
    }

    pub fn seek(&mut self, id: ElementId, position_secs: f32) {
        if let Some(handle) = self.handles.get_mut(&id) {
            handle.position_secs = position_secs.max(0.0);
        }
    }

    /// Advance every playing handle by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for handle in self.handles.values_mut() {
            if handle.playing {
                handle.position_secs += dt;
            }
        }
    }

    /// Drop the handle for a removed element.
    pub fn release(&mut self, id: ElementId) {
        if self.handles.remove(&id).is_some() {
            debug!("released playback handle for {id}");
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
