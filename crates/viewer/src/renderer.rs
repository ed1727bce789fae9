use foundation::{ViewLimits, ViewPose};
use tour::GeometryLevel;

/// Construction options for the external renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    pub drag_view_enabled: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            drag_view_enabled: true,
        }
    }
}

/// Interactive marker for a navigable edge, positioned at its yaw/pitch
/// anchor. Activating it re-enters the scene switch with the target id.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkMarker {
    pub yaw: f64,
    pub pitch: f64,
    pub rotation: f64,
    pub target_scene_id: String,
}

/// Non-navigable annotation marker.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoMarker {
    pub yaw: f64,
    pub pitch: f64,
    pub text: String,
}

/// Renderer-facing description of one scene, fully built before any
/// renderer call so a failed build leaves the renderer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    pub scene_id: String,
    /// Tile source template with `{z}/{f}/{y}/{x}` placeholders intact.
    pub source_template: String,
    pub preview_url: String,
    pub levels: Vec<GeometryLevel>,
    /// Already limited; the renderer applies it as-is.
    pub initial_view: ViewPose,
    pub limits: ViewLimits,
    pub pin_first_level: bool,
    /// Markers in authoring order; no z-ordering beyond insertion order.
    pub link_markers: Vec<LinkMarker>,
    pub info_markers: Vec<InfoMarker>,
}

/// The renderer threw while building or switching a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererError {
    pub message: String,
}

impl RendererError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "renderer error: {}", self.message)
    }
}

impl std::error::Error for RendererError {}

/// The renderer could not be constructed for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConstructionError {
    pub message: String,
}

impl RendererConstructionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RendererConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "renderer construction failed: {}", self.message)
    }
}

impl std::error::Error for RendererConstructionError {}

/// Capability contract over the external panorama-drawing library.
///
/// The engine only ever builds scene descriptions, switches the active
/// scene, and destroys the handle; tile decoding, projection math and
/// input handling all live behind this seam. Implementations are injected
/// into the lifecycle controller, never looked up from ambient globals.
pub trait Renderer {
    type Scene;

    fn create_scene(&mut self, spec: &SceneSpec) -> Result<Self::Scene, RendererError>;
    fn switch_scene(&mut self, scene: &Self::Scene) -> Result<(), RendererError>;
    /// Tear the renderer down. Must be safe to call exactly once; the
    /// controller guarantees it never calls it twice on one handle.
    fn destroy(&mut self);
}
