use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest width/height an element may have after any transform.
pub const MIN_ELEMENT_SIZE: f32 = 5.0;

/// Unique identifier for one placed element. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Generate a fresh globally-unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind-specific payload of an element. The `kind` tag and the camelCase
/// field names are the persisted wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementKind {
    Text {
        text: String,
        #[serde(rename = "fontSize")]
        font_size: f32,
    },
    Image {
        #[serde(rename = "sourceRef")]
        source_ref: String,
    },
    Video {
        #[serde(rename = "sourceRef")]
        source_ref: String,
    },
}

/// Final geometry reported by a transform gesture. Scale factors are
/// relative to the element's last committed width/height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// One placed visual object: shared geometry base plus a tagged kind.
///
/// `x`/`y` are the top-left corner, `rotation` is in degrees and
/// unconstrained. Stacking order is not stored here; it is the element's
/// position in its [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// New text element with the default content and geometry.
    pub fn new_text() -> Self {
        Self {
            id: ElementId::new(),
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 30.0,
            rotation: 0.0,
            kind: ElementKind::Text {
                text: "Hello World".to_owned(),
                font_size: 20.0,
            },
        }
    }

    /// New image element referencing an external media resource.
    pub fn new_image(source_ref: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            x: 80.0,
            y: 80.0,
            width: 200.0,
            height: 150.0,
            rotation: 0.0,
            kind: ElementKind::Image {
                source_ref: source_ref.into(),
            },
        }
    }

    /// New video element referencing an external media resource.
    pub fn new_video(source_ref: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            x: 100.0,
            y: 100.0,
            width: 320.0,
            height: 180.0,
            rotation: 0.0,
            kind: ElementKind::Video {
                source_ref: source_ref.into(),
            },
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The persisted kind tag for this element.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ElementKind::Text { .. } => "text",
            ElementKind::Image { .. } => "image",
            ElementKind::Video { .. } => "video",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, ElementKind::Video { .. })
    }

    pub fn source_ref(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { .. } => None,
            ElementKind::Image { source_ref } | ElementKind::Video { source_ref } => {
                Some(source_ref)
            }
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Apply the final geometry of a transform gesture.
    ///
    /// Width and height absorb the scale factors (clamped to
    /// [`MIN_ELEMENT_SIZE`]); geometry is always stored as absolute
    /// width/height, never as a residual scale multiplier. Position and
    /// rotation are stored as given, unclamped.
    pub fn apply_transform(&mut self, geometry: Geometry) {
        self.x = geometry.x;
        self.y = geometry.y;
        self.rotation = geometry.rotation;
        self.width = (self.width * geometry.scale_x).max(MIN_ELEMENT_SIZE);
        self.height = (self.height * geometry.scale_y).max(MIN_ELEMENT_SIZE);
    }
}
