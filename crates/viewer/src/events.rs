/// Structured record of one viewer session's lifecycle.
///
/// The host only ever observes a boolean loading state and, optionally,
/// these events; nothing in the session escapes as an uncaught error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Opened { tour_id: String },
    ResourcesFailed { url: String },
    RendererConstructed,
    ConstructionFailed { message: String },
    /// Construction finished after a close request; the handle was
    /// destroyed instead of used.
    ConstructionDiscarded,
    SceneActivated { scene_id: String },
    SceneSwitchFailed { scene_id: String, message: String },
    /// A hotspot referenced a scene that does not resolve; the activation
    /// was ignored.
    BrokenHotspot { target_scene_id: String },
    RendererDestroyed,
    Closed,
}

#[derive(Debug, Default)]
pub struct SessionLog {
    events: Vec<SessionEvent>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
