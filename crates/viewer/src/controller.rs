use std::collections::BTreeMap;

use foundation::Viewport;
use loader::{LoadTicket, Resource, ResourceHost, ResourceLoadError, ResourceLoader, TicketState};
use tour::{Scene, SceneResolutionError, TileUrlTemplate, TourCatalog};
use tracing::{debug, warn};

use crate::events::{SessionEvent, SessionLog};
use crate::renderer::{
    Renderer, RendererConstructionError, RendererError, ViewerOptions,
};
use crate::switch::build_scene_spec;

/// Lifecycle of one viewer session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Closed,
    ResourcesLoading,
    Constructing,
    Ready,
    Destroyed,
}

/// What to do with a hotspot whose target does not resolve. The default
/// swallows it; stricter builds can surface it to content authors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BrokenHotspotPolicy {
    #[default]
    Ignore,
    Surface,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewerConfig {
    pub options: ViewerOptions,
    pub viewport: Viewport,
    /// Keep the lowest pyramid level resident while better tiles stream.
    pub pin_first_level: bool,
    pub broken_hotspot: BrokenHotspotPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            options: ViewerOptions::default(),
            viewport: Viewport::new(1280, 720),
            pin_first_level: true,
            broken_hotspot: BrokenHotspotPolicy::Ignore,
        }
    }
}

/// Failure surfaced to the host. The worst case is a tour that fails to
/// open; nothing here is fatal to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    ResourceLoad(ResourceLoadError),
    Construction(RendererConstructionError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::ResourceLoad(e) => write!(f, "{e}"),
            SessionError::Construction(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenError {
    /// A session is already open or loading in this modal slot.
    SessionInProgress,
    Catalog(tour::CatalogError),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::SessionInProgress => write!(f, "a viewer session is already in progress"),
            OpenError::Catalog(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for OpenError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchError {
    NotReady,
    /// Only produced under `BrokenHotspotPolicy::Surface`.
    Resolution(SceneResolutionError),
    Renderer(RendererError),
}

impl std::fmt::Display for SwitchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchError::NotReady => write!(f, "viewer is not ready for scene switches"),
            SwitchError::Resolution(e) => write!(f, "{e}"),
            SwitchError::Renderer(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SwitchError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched,
    /// Broken target swallowed per policy; the active scene is unchanged.
    Ignored,
}

/// Asked of the caller after a lifecycle step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Drive {
    None,
    /// Construct a renderer with these options and report the result via
    /// [`ViewerController::construction_complete`].
    Construct(ViewerOptions),
}

/// Runtime state of one open tour; dropped on close.
#[derive(Debug)]
struct Session {
    tour_id: String,
    primary_scene_id: String,
    tiles: TileUrlTemplate,
    scenes: BTreeMap<String, Scene>,
    active_scene_id: Option<String>,
}

impl Session {
    fn lookup(&self, scene_id: &str) -> Result<&Scene, SceneResolutionError> {
        self.scenes
            .get(scene_id)
            .ok_or_else(|| SceneResolutionError {
                tour_id: self.tour_id.clone(),
                scene_id: scene_id.to_string(),
            })
    }
}

/// Owns the single renderer instance for an open tour session.
///
/// `Closed → ResourcesLoading → Constructing → Ready → Destroyed`, with
/// `* → Destroyed` on close from any state. Construction results arriving
/// after a close are discarded and the handle destroyed immediately, so
/// constructions and destructions always balance.
pub struct ViewerController<R: Renderer> {
    config: ViewerConfig,
    state: LifecycleState,
    session: Option<Session>,
    renderer: Option<R>,
    ticket: Option<LoadTicket>,
    error: Option<SessionError>,
    log: SessionLog,
}

impl<R: Renderer> ViewerController<R> {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            state: LifecycleState::Closed,
            session: None,
            renderer: None,
            ticket: None,
            error: None,
            log: SessionLog::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The boolean loading indicator the host renders.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::ResourcesLoading | LifecycleState::Constructing
        )
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn active_scene_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.active_scene_id.as_deref())
    }

    pub fn events(&self) -> &[SessionEvent] {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.log.drain()
    }

    /// Open a tour: snapshot its scene graph and start resource loading.
    ///
    /// Re-entry after `Destroyed` restarts from scratch; no state carries
    /// over between sessions. Returns `Drive::Construct` immediately when
    /// every resource is already present.
    pub fn open(
        &mut self,
        catalog: &TourCatalog,
        tour_id: &str,
        resources: &[Resource],
        resource_loader: &mut ResourceLoader,
        host: &mut dyn ResourceHost,
    ) -> Result<Drive, OpenError> {
        match self.state {
            LifecycleState::Closed | LifecycleState::Destroyed => {}
            _ => return Err(OpenError::SessionInProgress),
        }

        let view = catalog.tour(tour_id).map_err(OpenError::Catalog)?;
        let scenes: BTreeMap<String, Scene> =
            view.scenes().map(|s| (s.id.clone(), s.clone())).collect();

        self.session = Some(Session {
            tour_id: tour_id.to_string(),
            primary_scene_id: view.primary_scene_id().to_string(),
            tiles: view.tiles().clone(),
            scenes,
            active_scene_id: None,
        });
        self.renderer = None;
        self.error = None;
        self.log.record(SessionEvent::Opened {
            tour_id: tour_id.to_string(),
        });

        self.ticket = Some(resource_loader.ensure_loaded(host, resources));
        self.state = LifecycleState::ResourcesLoading;
        Ok(self.on_resources_event(resource_loader))
    }

    /// Advance the machine after a loader callback settled resources.
    pub fn on_resources_event(&mut self, resource_loader: &ResourceLoader) -> Drive {
        if self.state != LifecycleState::ResourcesLoading {
            return Drive::None;
        }
        let Some(ticket) = self.ticket else {
            return Drive::None;
        };

        match resource_loader.ticket_state(ticket) {
            Some(TicketState::Ready) => {
                debug!("viewer resources ready; requesting construction");
                self.state = LifecycleState::Constructing;
                Drive::Construct(self.config.options)
            }
            Some(TicketState::Failed(err)) => {
                warn!(%err, "viewer resources failed; session stays closed");
                self.log.record(SessionEvent::ResourcesFailed {
                    url: err.url.clone(),
                });
                self.error = Some(SessionError::ResourceLoad(err.clone()));
                self.abandon();
                Drive::None
            }
            _ => Drive::None,
        }
    }

    /// Report the result of the construction requested by
    /// [`Drive::Construct`]. A result arriving after a close request is
    /// discarded: the handle is destroyed, never used.
    pub fn construction_complete(
        &mut self,
        result: Result<R, RendererConstructionError>,
    ) {
        if self.state != LifecycleState::Constructing {
            if let Ok(mut renderer) = result {
                debug!("discarding renderer constructed after close");
                renderer.destroy();
                self.log.record(SessionEvent::ConstructionDiscarded);
                self.log.record(SessionEvent::RendererDestroyed);
            }
            return;
        }

        let renderer = match result {
            Ok(renderer) => renderer,
            Err(err) => {
                warn!(%err, "renderer construction failed");
                self.log.record(SessionEvent::ConstructionFailed {
                    message: err.message.clone(),
                });
                self.error = Some(SessionError::Construction(err));
                self.abandon();
                return;
            }
        };

        self.renderer = Some(renderer);
        self.log.record(SessionEvent::RendererConstructed);

        // Initial scene build for the primary scene. A failure here is a
        // construction failure: no partial UI is shown.
        let primary = self
            .session
            .as_ref()
            .map(|s| s.primary_scene_id.clone())
            .unwrap_or_default();
        match self.switch_to(&primary) {
            Ok(SwitchOutcome::Switched) => {
                self.state = LifecycleState::Ready;
            }
            Ok(SwitchOutcome::Ignored) | Err(_) => {
                let err = RendererConstructionError::new(format!(
                    "initial scene build failed for '{primary}'"
                ));
                warn!(%err, "tearing down renderer");
                self.log.record(SessionEvent::ConstructionFailed {
                    message: err.message.clone(),
                });
                self.error = Some(SessionError::Construction(err));
                self.destroy_renderer();
                self.abandon();
            }
        }
    }

    /// Hotspot-driven scene activation; the runtime graph traversal.
    pub fn activate_scene(&mut self, scene_id: &str) -> Result<SwitchOutcome, SwitchError> {
        if self.state != LifecycleState::Ready {
            return Err(SwitchError::NotReady);
        }
        self.switch_to(scene_id)
    }

    /// Close the tour from any state. Cancels an in-flight resource load,
    /// destroys a live renderer, and marks any construction still in
    /// flight for discard-on-arrival.
    pub fn close(&mut self, resource_loader: &mut ResourceLoader) {
        if self.state == LifecycleState::Destroyed {
            return;
        }
        if let Some(ticket) = self.ticket.take() {
            resource_loader.cancel(ticket);
        }
        self.destroy_renderer();
        self.session = None;
        self.state = LifecycleState::Destroyed;
        self.log.record(SessionEvent::Closed);
    }

    /// All-or-nothing scene switch: resolve, build, hand to the renderer,
    /// and only then update the active scene id. Any failure leaves the
    /// previous scene active.
    fn switch_to(&mut self, scene_id: &str) -> Result<SwitchOutcome, SwitchError> {
        let Some(session) = self.session.as_ref() else {
            return Err(SwitchError::NotReady);
        };

        let scene = match session.lookup(scene_id) {
            Ok(scene) => scene,
            Err(err) => {
                warn!(%err, "hotspot target did not resolve");
                self.log.record(SessionEvent::BrokenHotspot {
                    target_scene_id: scene_id.to_string(),
                });
                return match self.config.broken_hotspot {
                    BrokenHotspotPolicy::Ignore => Ok(SwitchOutcome::Ignored),
                    BrokenHotspotPolicy::Surface => Err(SwitchError::Resolution(err)),
                };
            }
        };

        let spec = build_scene_spec(
            &session.tiles,
            scene,
            self.config.viewport,
            self.config.pin_first_level,
        );

        let Some(renderer) = self.renderer.as_mut() else {
            return Err(SwitchError::NotReady);
        };
        let result = match renderer.create_scene(&spec) {
            Ok(scene) => renderer.switch_scene(&scene),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                if let Some(session) = self.session.as_mut() {
                    session.active_scene_id = Some(scene_id.to_string());
                }
                self.log.record(SessionEvent::SceneActivated {
                    scene_id: scene_id.to_string(),
                });
                Ok(SwitchOutcome::Switched)
            }
            Err(err) => {
                warn!(%err, scene_id, "scene switch failed; previous scene stays active");
                self.log.record(SessionEvent::SceneSwitchFailed {
                    scene_id: scene_id.to_string(),
                    message: err.message.clone(),
                });
                Err(SwitchError::Renderer(err))
            }
        }
    }

    /// Failure path: clear the loading indicator and return to `Closed`
    /// so the host may retry by opening again.
    fn abandon(&mut self) {
        self.ticket = None;
        self.session = None;
        self.state = LifecycleState::Closed;
    }

    fn destroy_renderer(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.destroy();
            self.log.record(SessionEvent::RendererDestroyed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BrokenHotspotPolicy, Drive, LifecycleState, SwitchError, SwitchOutcome, ViewerConfig,
        ViewerController,
    };
    use crate::events::SessionEvent;
    use crate::renderer::{Renderer, RendererConstructionError, RendererError, SceneSpec};
    use loader::{Resource, ResourceHost, ResourceLoader};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use tour::{InitialView, LinkHotspot, Scene, TourCatalog, TourInfo};

    #[derive(Debug, Default)]
    struct Counters {
        scenes_created: usize,
        switches: usize,
        destroys: usize,
        last_switched: Option<String>,
    }

    #[derive(Debug, Default)]
    struct FakeRenderer {
        counters: Rc<RefCell<Counters>>,
        fail_scene_ids: Vec<String>,
    }

    struct FakeScene {
        scene_id: String,
    }

    impl Renderer for FakeRenderer {
        type Scene = FakeScene;

        fn create_scene(&mut self, spec: &SceneSpec) -> Result<FakeScene, RendererError> {
            if self.fail_scene_ids.iter().any(|s| s == &spec.scene_id) {
                return Err(RendererError::new("tile source rejected"));
            }
            self.counters.borrow_mut().scenes_created += 1;
            Ok(FakeScene {
                scene_id: spec.scene_id.clone(),
            })
        }

        fn switch_scene(&mut self, scene: &FakeScene) -> Result<(), RendererError> {
            let mut counters = self.counters.borrow_mut();
            counters.switches += 1;
            counters.last_switched = Some(scene.scene_id.clone());
            Ok(())
        }

        fn destroy(&mut self) {
            self.counters.borrow_mut().destroys += 1;
        }
    }

    #[derive(Debug, Default)]
    struct FakeHost {
        begun: Vec<String>,
    }

    impl ResourceHost for FakeHost {
        fn is_present(&self, _resource: &Resource) -> bool {
            false
        }
        fn begin_load(&mut self, resource: &Resource) {
            self.begun.push(resource.url.clone());
        }
    }

    fn scene(id: &str, targets: &[&str]) -> Scene {
        Scene {
            id: id.to_string(),
            name: id.to_string(),
            geometry_levels: Vec::new(),
            face_size: 1024,
            initial_view: InitialView {
                yaw: 0.0,
                pitch: 0.0,
                fov: 1.2,
            },
            link_hotspots: targets
                .iter()
                .map(|t| LinkHotspot {
                    yaw: 0.0,
                    pitch: 0.0,
                    rotation: 0.0,
                    target_scene_id: t.to_string(),
                })
                .collect(),
            info_hotspots: Vec::new(),
        }
    }

    fn catalog() -> TourCatalog {
        let mut scenes = BTreeMap::new();
        scenes.insert("a".to_string(), scene("a", &["b", "z"]));
        scenes.insert("b".to_string(), scene("b", &["a"]));

        let mut tours = BTreeMap::new();
        tours.insert(
            "suite".to_string(),
            TourInfo {
                name: "Suite".to_string(),
                description: String::new(),
                scene_ids: vec!["a".to_string(), "b".to_string()],
                primary_scene_id: "a".to_string(),
                thumbnail: None,
            },
        );

        TourCatalog {
            tours,
            scenes,
            tiles: Default::default(),
        }
    }

    fn resources() -> Vec<Resource> {
        vec![
            Resource::stylesheet("pano.css"),
            Resource::script("pano.js"),
        ]
    }

    struct Rig {
        controller: ViewerController<FakeRenderer>,
        loader: ResourceLoader,
        host: FakeHost,
        counters: Rc<RefCell<Counters>>,
    }

    fn rig(config: ViewerConfig) -> Rig {
        Rig {
            controller: ViewerController::new(config),
            loader: ResourceLoader::new(),
            host: FakeHost::default(),
            counters: Rc::new(RefCell::new(Counters::default())),
        }
    }

    fn open_to_ready(rig: &mut Rig) {
        let mut drive = rig
            .controller
            .open(&catalog(), "suite", &resources(), &mut rig.loader, &mut rig.host)
            .unwrap();
        // Resources persist across sessions, so a reopen may be able to
        // construct straight away.
        if drive == Drive::None {
            assert_eq!(rig.controller.state(), LifecycleState::ResourcesLoading);
            rig.loader.resource_loaded("pano.css");
            rig.loader.resource_loaded("pano.js");
            drive = rig.controller.on_resources_event(&rig.loader);
        }
        assert!(matches!(drive, Drive::Construct(_)));

        rig.controller.construction_complete(Ok(FakeRenderer {
            counters: Rc::clone(&rig.counters),
            fail_scene_ids: Vec::new(),
        }));
        assert_eq!(rig.controller.state(), LifecycleState::Ready);
    }

    #[test]
    fn open_builds_the_primary_scene() {
        let mut r = rig(ViewerConfig::default());
        open_to_ready(&mut r);
        assert_eq!(r.controller.active_scene_id(), Some("a"));
        assert!(!r.controller.is_loading());
        assert_eq!(r.counters.borrow().scenes_created, 1);
        assert_eq!(r.counters.borrow().switches, 1);
    }

    #[test]
    fn hotspot_activation_traverses_the_graph() {
        let mut r = rig(ViewerConfig::default());
        open_to_ready(&mut r);

        let outcome = r.controller.activate_scene("b").unwrap();
        assert_eq!(outcome, SwitchOutcome::Switched);
        assert_eq!(r.controller.active_scene_id(), Some("b"));
        assert_eq!(r.counters.borrow().last_switched.as_deref(), Some("b"));

        let outcome = r.controller.activate_scene("a").unwrap();
        assert_eq!(outcome, SwitchOutcome::Switched);
        assert_eq!(r.controller.active_scene_id(), Some("a"));
    }

    #[test]
    fn broken_hotspot_is_an_inert_no_op_by_default() {
        let mut r = rig(ViewerConfig::default());
        open_to_ready(&mut r);

        let outcome = r.controller.activate_scene("z").unwrap();
        assert_eq!(outcome, SwitchOutcome::Ignored);
        assert_eq!(r.controller.active_scene_id(), Some("a"));
        assert!(r.controller.events().contains(&SessionEvent::BrokenHotspot {
            target_scene_id: "z".to_string()
        }));
    }

    #[test]
    fn broken_hotspot_surfaces_under_strict_policy() {
        let mut r = rig(ViewerConfig {
            broken_hotspot: BrokenHotspotPolicy::Surface,
            ..ViewerConfig::default()
        });
        open_to_ready(&mut r);

        let err = r.controller.activate_scene("z").unwrap_err();
        assert!(matches!(err, SwitchError::Resolution(_)));
        assert_eq!(r.controller.active_scene_id(), Some("a"));
    }

    #[test]
    fn failed_switch_leaves_previous_scene_active() {
        let mut r = rig(ViewerConfig::default());
        let drive = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        assert_eq!(drive, Drive::None);
        r.loader.resource_loaded("pano.css");
        r.loader.resource_loaded("pano.js");
        assert!(matches!(
            r.controller.on_resources_event(&r.loader),
            Drive::Construct(_)
        ));
        r.controller.construction_complete(Ok(FakeRenderer {
            counters: Rc::clone(&r.counters),
            fail_scene_ids: vec!["b".to_string()],
        }));
        assert_eq!(r.controller.state(), LifecycleState::Ready);

        let err = r.controller.activate_scene("b").unwrap_err();
        assert!(matches!(err, SwitchError::Renderer(_)));
        assert_eq!(r.controller.active_scene_id(), Some("a"));
    }

    #[test]
    fn resource_failure_returns_to_closed_with_error() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        r.loader.resource_failed("pano.js");
        let drive = r.controller.on_resources_event(&r.loader);
        assert_eq!(drive, Drive::None);
        assert_eq!(r.controller.state(), LifecycleState::Closed);
        assert!(!r.controller.is_loading());
        assert!(r.controller.last_error().is_some());
    }

    #[test]
    fn construction_failure_returns_to_closed_with_error() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        r.loader.resource_loaded("pano.css");
        r.loader.resource_loaded("pano.js");
        let _ = r.controller.on_resources_event(&r.loader);
        r.controller
            .construction_complete(Err(RendererConstructionError::new("no webgl")));
        assert_eq!(r.controller.state(), LifecycleState::Closed);
        assert!(r.controller.last_error().is_some());
        assert_eq!(r.counters.borrow().destroys, 0);
    }

    #[test]
    fn close_before_resources_resolve_constructs_nothing() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        r.controller.close(&mut r.loader);
        assert_eq!(r.controller.state(), LifecycleState::Destroyed);

        // Resolution after close must have no further side effects.
        r.loader.resource_loaded("pano.css");
        r.loader.resource_loaded("pano.js");
        let drive = r.controller.on_resources_event(&r.loader);
        assert_eq!(drive, Drive::None);
        assert_eq!(r.counters.borrow().scenes_created, 0);
    }

    #[test]
    fn construction_completing_after_close_is_destroyed_not_used() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        r.loader.resource_loaded("pano.css");
        r.loader.resource_loaded("pano.js");
        assert!(matches!(
            r.controller.on_resources_event(&r.loader),
            Drive::Construct(_)
        ));

        // Close lands while construction is in flight.
        r.controller.close(&mut r.loader);

        r.controller.construction_complete(Ok(FakeRenderer {
            counters: Rc::clone(&r.counters),
            fail_scene_ids: Vec::new(),
        }));
        assert_eq!(r.counters.borrow().destroys, 1);
        assert_eq!(r.counters.borrow().scenes_created, 0);
        assert!(r
            .controller
            .events()
            .contains(&SessionEvent::ConstructionDiscarded));
    }

    #[test]
    fn constructions_balance_destructions_over_many_cycles() {
        let mut r = rig(ViewerConfig::default());
        for _ in 0..4 {
            open_to_ready(&mut r);
            r.controller.close(&mut r.loader);
        }
        let counters = r.counters.borrow();
        assert_eq!(counters.destroys, 4);
        assert_eq!(r.controller.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn reopening_after_destroy_starts_a_fresh_session() {
        let mut r = rig(ViewerConfig::default());
        open_to_ready(&mut r);
        r.controller.activate_scene("b").unwrap();
        r.controller.close(&mut r.loader);

        open_to_ready(&mut r);
        // No state carried over: back at the primary scene.
        assert_eq!(r.controller.active_scene_id(), Some("a"));
    }

    #[test]
    fn open_while_in_progress_is_rejected() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        let err = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap_err();
        assert_eq!(err, super::OpenError::SessionInProgress);
    }

    #[test]
    fn unknown_tour_is_rejected_at_open() {
        let mut r = rig(ViewerConfig::default());
        let err = r
            .controller
            .open(&catalog(), "nope", &resources(), &mut r.loader, &mut r.host)
            .unwrap_err();
        assert!(matches!(err, super::OpenError::Catalog(_)));
        assert_eq!(r.controller.state(), LifecycleState::Closed);
    }

    #[test]
    fn switches_are_rejected_while_loading() {
        let mut r = rig(ViewerConfig::default());
        let _ = r
            .controller
            .open(&catalog(), "suite", &resources(), &mut r.loader, &mut r.host)
            .unwrap();
        let err = r.controller.activate_scene("b").unwrap_err();
        assert_eq!(err, SwitchError::NotReady);
    }
}
