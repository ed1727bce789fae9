//! Adapter from the [`viewer::Renderer`] seam to a JS panorama library.
//!
//! The library namespace object is handed to [`PanoRenderer::construct`]
//! by the composition root; nothing in here reaches for globals. All
//! calls go through `js_sys::Reflect` so the binding stays loose: the
//! library only has to expose the Marzipano-shaped surface the engine
//! actually uses (`Viewer`, `ImageUrlSource.fromString`, `CubeGeometry`,
//! `RectilinearView` and its `limit.traditional`).

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use viewer::{
    Renderer, RendererConstructionError, RendererError, SceneSpec, ViewerOptions,
};

pub struct PanoRenderer {
    namespace: Object,
    viewer: JsValue,
}

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, RendererError> {
    let value = Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| RendererError::new(describe(e)))?;
    if value.is_undefined() {
        return Err(RendererError::new(format!("missing library member {key}")));
    }
    Ok(value)
}

fn func(target: &JsValue, key: &str) -> Result<Function, RendererError> {
    get(target, key)?
        .dyn_into::<Function>()
        .map_err(|_| RendererError::new(format!("library member {key} is not callable")))
}

fn call(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, RendererError> {
    func(target, name)?
        .apply(target, args)
        .map_err(|e| RendererError::new(describe(e)))
}

fn construct(ctor: &Function, args: &Array) -> Result<JsValue, RendererError> {
    Reflect::construct(ctor, args).map_err(|e| RendererError::new(describe(e)))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), RendererError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map_err(|e| RendererError::new(describe(e)))?;
    Ok(())
}

impl PanoRenderer {
    /// Build the library's viewer over `container`. Fails cleanly when
    /// the namespace does not expose the expected surface.
    pub fn construct(
        namespace: Object,
        container: &Element,
        options: ViewerOptions,
    ) -> Result<Self, RendererConstructionError> {
        let build = || -> Result<JsValue, RendererError> {
            let controls = Object::new();
            let mode = if options.drag_view_enabled {
                "drag"
            } else {
                "qtvr"
            };
            set(&controls, "mouseViewMode", &JsValue::from_str(mode))?;
            let opts = Object::new();
            set(&opts, "controls", &controls)?;

            let ctor = func(&namespace, "Viewer")?;
            construct(&ctor, &Array::of2(container, &opts))
        };
        let viewer = build().map_err(|e| RendererConstructionError::new(e.message))?;
        Ok(Self { namespace, viewer })
    }

    fn build_source(&self, spec: &SceneSpec) -> Result<JsValue, RendererError> {
        let source_ctor = get(&self.namespace, "ImageUrlSource")?;
        let opts = Object::new();
        set(
            &opts,
            "cubeMapPreviewUrl",
            &JsValue::from_str(&spec.preview_url),
        )?;
        call(
            &source_ctor,
            "fromString",
            &Array::of2(&JsValue::from_str(&spec.source_template), &opts),
        )
    }

    fn build_geometry(&self, spec: &SceneSpec) -> Result<JsValue, RendererError> {
        let levels = Array::new();
        for level in &spec.levels {
            let obj = Object::new();
            set(&obj, "tileSize", &JsValue::from_f64(level.tile_size as f64))?;
            set(&obj, "size", &JsValue::from_f64(level.size as f64))?;
            if level.fallback_only {
                set(&obj, "fallbackOnly", &JsValue::TRUE)?;
            }
            levels.push(&obj);
        }
        let ctor = func(&self.namespace, "CubeGeometry")?;
        construct(&ctor, &Array::of1(&levels))
    }

    fn build_view(&self, spec: &SceneSpec) -> Result<JsValue, RendererError> {
        let view_ctor = get(&self.namespace, "RectilinearView")?;
        let limit = get(&view_ctor, "limit")?;
        let limiter = call(
            &limit,
            "traditional",
            &Array::of3(
                &JsValue::from_f64(spec.limits.max_resolution as f64),
                &JsValue::from_f64(spec.limits.max_vfov),
                &JsValue::from_f64(spec.limits.max_hfov),
            ),
        )?;

        let initial = Object::new();
        set(&initial, "yaw", &JsValue::from_f64(spec.initial_view.yaw))?;
        set(&initial, "pitch", &JsValue::from_f64(spec.initial_view.pitch))?;
        set(&initial, "fov", &JsValue::from_f64(spec.initial_view.fov))?;

        let ctor: Function = view_ctor
            .dyn_into()
            .map_err(|_| RendererError::new("RectilinearView is not a constructor"))?;
        construct(&ctor, &Array::of2(&initial, &limiter))
    }

    fn attach_markers(&self, scene: &JsValue, spec: &SceneSpec) -> Result<(), RendererError> {
        let container = call(scene, "hotspotContainer", &Array::new())?;
        for marker in &spec.link_markers {
            let element = crate::dom::link_marker_element(marker)
                .map_err(|e| RendererError::new(describe(e)))?;
            let position = Object::new();
            set(&position, "yaw", &JsValue::from_f64(marker.yaw))?;
            set(&position, "pitch", &JsValue::from_f64(marker.pitch))?;
            call(
                &container,
                "createHotspot",
                &Array::of2(&element, &position),
            )?;
        }
        for marker in &spec.info_markers {
            let element = crate::dom::info_marker_element(marker)
                .map_err(|e| RendererError::new(describe(e)))?;
            let position = Object::new();
            set(&position, "yaw", &JsValue::from_f64(marker.yaw))?;
            set(&position, "pitch", &JsValue::from_f64(marker.pitch))?;
            call(
                &container,
                "createHotspot",
                &Array::of2(&element, &position),
            )?;
        }
        Ok(())
    }
}

impl Renderer for PanoRenderer {
    type Scene = JsValue;

    fn create_scene(&mut self, spec: &SceneSpec) -> Result<JsValue, RendererError> {
        let source = self.build_source(spec)?;
        let geometry = self.build_geometry(spec)?;
        let view = self.build_view(spec)?;

        let opts = Object::new();
        set(&opts, "source", &source)?;
        set(&opts, "geometry", &geometry)?;
        set(&opts, "view", &view)?;
        set(
            &opts,
            "pinFirstLevel",
            &JsValue::from_bool(spec.pin_first_level),
        )?;

        let scene = call(&self.viewer, "createScene", &Array::of1(&opts))?;
        self.attach_markers(&scene, spec)?;
        Ok(scene)
    }

    fn switch_scene(&mut self, scene: &JsValue) -> Result<(), RendererError> {
        call(&self.viewer, "switchScene", &Array::of1(scene))?;
        Ok(())
    }

    fn destroy(&mut self) {
        if let Err(err) = call(&self.viewer, "destroy", &Array::new()) {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "viewer destroy raised: {}",
                err.message
            )));
        }
    }
}
