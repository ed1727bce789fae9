//! Browser front end for the tour engine.
//!
//! This crate is the composition root: it owns the only lookups of
//! page-provided JS libraries, builds the DOM-backed hosts, and feeds
//! browser events back into the engine state machines. Everything below
//! this layer is browser-free and tested off the main thread's DOM.

use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use fullscreen::Reconciler;
use loader::{Resource, ResourceLoader};
use modal::ModalController;
use tour::TourCatalog;
use viewer::{
    Drive, LifecycleState, RendererConstructionError, SwitchError, SwitchOutcome, ViewerConfig,
    ViewerController, ViewerOptions,
};

mod dom;
mod pano;
mod screen;

use dom::{DomModalHost, DomResourceHost};
use pano::PanoRenderer;
use screen::{DomNativeFullscreen, JsFallbackFullscreen};

pub struct App {
    catalog: Option<TourCatalog>,
    container_id: String,
    /// Global name of the panorama library. Looked up once per
    /// construction, then injected; never reached for elsewhere.
    library_global: String,
    /// Global name of the fullscreen compatibility library. Optional; a
    /// missing global leaves only the native source enabled.
    fallback_global: String,
    resources: Vec<Resource>,
    loader: ResourceLoader,
    controller: ViewerController<PanoRenderer>,
    modal: ModalController,
    modal_host: Option<DomModalHost>,
    reconciler: Option<Reconciler<DomNativeFullscreen, JsFallbackFullscreen>>,
}

thread_local! {
    static STATE: RefCell<App> = RefCell::new(App {
        catalog: None,
        container_id: "pano".to_string(),
        library_global: "Marzipano".to_string(),
        fallback_global: "screenfull".to_string(),
        resources: Vec::new(),
        loader: ResourceLoader::new(),
        controller: ViewerController::new(ViewerConfig::default()),
        modal: ModalController::new(),
        modal_host: None,
        reconciler: None,
    });
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

#[wasm_bindgen]
pub fn configure(container_id: &str, library_global: &str, fallback_global: &str) {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        app.container_id = container_id.to_string();
        app.library_global = library_global.to_string();
        app.fallback_global = fallback_global.to_string();
    });
}

/// Register a script the panorama library needs before construction.
#[wasm_bindgen]
pub fn register_script(url: &str) {
    STATE.with(|state| {
        state.borrow_mut().resources.push(Resource::script(url));
    });
}

#[wasm_bindgen]
pub fn register_stylesheet(url: &str) {
    STATE.with(|state| {
        state.borrow_mut().resources.push(Resource::stylesheet(url));
    });
}

#[wasm_bindgen]
pub fn load_catalog(url: String) {
    spawn_local(async move {
        let catalog = match fetch_catalog(&url).await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn(&format!("failed to fetch tour catalog: {err:?}"));
                return;
            }
        };

        if let Err(issues) = catalog.validate() {
            for issue in issues {
                warn(&format!("catalog issue: {issue}"));
            }
        }

        STATE.with(|state| {
            state.borrow_mut().catalog = Some(catalog);
        });
        log("tour catalog loaded");
    });
}

#[wasm_bindgen]
pub fn open_tour(tour_id: &str) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        let app = &mut *app;
        let document = dom::document()?;
        let container = document
            .get_element_by_id(&app.container_id)
            .ok_or_else(|| JsValue::from_str("viewer container element not found"))?;

        let catalog = app
            .catalog
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no tour catalog loaded"))?;

        let mut resource_host = DomResourceHost::new(document.clone());
        let drive = app
            .controller
            .open(
                catalog,
                tour_id,
                &app.resources,
                &mut app.loader,
                &mut resource_host,
            )
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        // Page chrome only comes up once the engine accepted the open.
        let host = app
            .modal_host
            .get_or_insert_with(|| DomModalHost::new(document.clone()));
        app.modal.open(host);

        let native = DomNativeFullscreen::new(document, container.clone());
        let fallback = JsFallbackFullscreen::new(fallback_library(&app.fallback_global), container);
        let mut reconciler = Reconciler::new(native, fallback);
        reconciler.attach();
        app.reconciler = Some(reconciler);

        handle_drive(app, drive);
        sync_ui(app);
        pump_events(app);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn close_tour() {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        let app = &mut *app;
        app.controller.close(&mut app.loader);
        sync_ui(app);
        pump_events(app);
    });
}

/// Switch the open session to another scene, as hotspot clicks do.
#[wasm_bindgen]
pub fn activate_scene(scene_id: &str) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        let outcome = app.controller.activate_scene(scene_id);
        pump_events(&mut app);
        match outcome {
            Ok(_) => Ok(()),
            Err(err) => Err(JsValue::from_str(&err.to_string())),
        }
    })
}

#[wasm_bindgen]
pub fn active_scene_id() -> Option<String> {
    STATE.with(|state| {
        state
            .borrow()
            .controller
            .active_scene_id()
            .map(str::to_string)
    })
}

#[wasm_bindgen]
pub fn toggle_fullscreen() {
    STATE.with(|state| {
        if let Some(reconciler) = state.borrow_mut().reconciler.as_mut() {
            reconciler.toggle();
        }
    });
}

#[wasm_bindgen]
pub fn is_fullscreen() -> bool {
    STATE.with(|state| {
        state
            .borrow()
            .reconciler
            .as_ref()
            .is_some_and(|r| r.is_fullscreen())
    })
}

/// Loader callback: one inserted resource finished or failed.
pub(crate) fn resource_settled(url: &str, ok: bool) {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        let app = &mut *app;
        if ok {
            app.loader.resource_loaded(url);
        } else {
            app.loader.resource_failed(url);
        }
        let drive = app.controller.on_resources_event(&app.loader);
        handle_drive(app, drive);
        sync_ui(app);
        pump_events(app);
    });
}

pub(crate) fn link_marker_activated(scene_id: &str) {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        match app.controller.activate_scene(scene_id) {
            Ok(SwitchOutcome::Switched) | Ok(SwitchOutcome::Ignored) => {}
            Err(SwitchError::NotReady) => {}
            Err(err) => warn(&format!("scene switch failed: {err}")),
        }
        pump_events(&mut app);
    });
}

pub(crate) fn escape_pressed() {
    STATE.with(|state| {
        let mut app = state.borrow_mut();
        let app = &mut *app;
        if !app.modal.is_open() {
            return;
        }
        app.controller.close(&mut app.loader);
        sync_ui(app);
        pump_events(app);
    });
}

pub(crate) fn fullscreen_changed() {
    STATE.with(|state| {
        if let Some(reconciler) = state.borrow_mut().reconciler.as_mut() {
            reconciler.on_change();
        }
    });
}

pub(crate) fn fullscreen_errored() {
    STATE.with(|state| {
        if let Some(reconciler) = state.borrow_mut().reconciler.as_mut() {
            reconciler.on_error();
        }
    });
}

/// Perform the renderer construction a state transition asked for.
///
/// This is the one place the panorama library global is resolved; the
/// resulting namespace object is injected into the adapter.
fn handle_drive(app: &mut App, drive: Drive) {
    let Drive::Construct(options) = drive else {
        return;
    };
    let result = construct_renderer(app, options);
    app.controller.construction_complete(result);
}

fn construct_renderer(
    app: &App,
    options: ViewerOptions,
) -> Result<PanoRenderer, RendererConstructionError> {
    let document = dom::document()
        .map_err(|_| RendererConstructionError::new("no document available"))?;
    let container = document
        .get_element_by_id(&app.container_id)
        .ok_or_else(|| RendererConstructionError::new("viewer container element not found"))?;

    let global = js_sys::global();
    let namespace = Reflect::get(&global, &JsValue::from_str(&app.library_global))
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .ok_or_else(|| {
            RendererConstructionError::new(format!(
                "panorama library global {} is not available",
                app.library_global
            ))
        })?;

    PanoRenderer::construct(namespace, &container, options)
}

fn fallback_library(global_name: &str) -> Object {
    // An absent compatibility library behaves as a disabled source.
    Reflect::get(&js_sys::global(), &JsValue::from_str(global_name))
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .unwrap_or_else(Object::new)
}

/// Close the page chrome whenever the session is no longer running.
fn sync_ui(app: &mut App) {
    let running = !matches!(
        app.controller.state(),
        LifecycleState::Closed | LifecycleState::Destroyed
    );
    if running {
        return;
    }
    if let Some(mut reconciler) = app.reconciler.take() {
        reconciler.detach();
    }
    if app.modal.is_open()
        && let Some(host) = app.modal_host.as_mut()
    {
        app.modal.close(host);
    }
}

fn pump_events(app: &mut App) {
    for event in app.controller.drain_events() {
        web_sys::console::debug_1(&JsValue::from_str(&format!("tour event: {event:?}")));
    }
}

async fn fetch_catalog(url: &str) -> Result<TourCatalog, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    TourCatalog::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}
