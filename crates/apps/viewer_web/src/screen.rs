//! Browser-backed fullscreen sources for the reconciler: the native
//! Fullscreen API, and an injected compatibility library with a
//! screenfull-shaped surface (`isEnabled`, `isFullscreen`, `request`,
//! `exit`, `on`, `off`).

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use fullscreen::{FallbackFullscreen, FullscreenTransitionError, NativeFullscreen};

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

pub struct DomNativeFullscreen {
    document: Document,
    container: Element,
    change: Option<Closure<dyn FnMut()>>,
    error: Option<Closure<dyn FnMut()>>,
}

impl DomNativeFullscreen {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
            change: None,
            error: None,
        }
    }

    fn listen(&self, event: &str, closure: &Closure<dyn FnMut()>) {
        let _ = self
            .document
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }

    fn unlisten(&self, event: &str, closure: &Closure<dyn FnMut()>) {
        let _ = self
            .document
            .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
}

impl NativeFullscreen for DomNativeFullscreen {
    fn is_supported(&self) -> bool {
        self.document.fullscreen_enabled()
    }

    fn is_active(&self) -> bool {
        self.document
            .fullscreen_element()
            .is_some_and(|el| Object::is(el.as_ref(), self.container.as_ref()))
    }

    fn request(&mut self) -> Result<(), FullscreenTransitionError> {
        self.container
            .request_fullscreen()
            .map_err(|e| FullscreenTransitionError::new(describe(e)))
    }

    fn exit(&mut self) -> Result<(), FullscreenTransitionError> {
        self.document.exit_fullscreen();
        Ok(())
    }

    fn observe(&mut self) {
        if self.change.is_some() {
            return;
        }
        let change = Closure::wrap(Box::new(crate::fullscreen_changed) as Box<dyn FnMut()>);
        let error = Closure::wrap(Box::new(crate::fullscreen_errored) as Box<dyn FnMut()>);
        self.listen("fullscreenchange", &change);
        self.listen("fullscreenerror", &error);
        self.change = Some(change);
        self.error = Some(error);
    }

    fn unobserve(&mut self) {
        if let Some(change) = self.change.take() {
            self.unlisten("fullscreenchange", &change);
        }
        if let Some(error) = self.error.take() {
            self.unlisten("fullscreenerror", &error);
        }
    }
}

pub struct JsFallbackFullscreen {
    library: Object,
    container: Element,
    change: Option<Closure<dyn FnMut()>>,
    error: Option<Closure<dyn FnMut()>>,
}

impl JsFallbackFullscreen {
    pub fn new(library: Object, container: Element) -> Self {
        Self {
            library,
            container,
            change: None,
            error: None,
        }
    }

    fn truthy(&self, key: &str) -> bool {
        Reflect::get(&self.library, &JsValue::from_str(key))
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }

    fn call(&self, name: &str, args: &Array) -> Result<JsValue, FullscreenTransitionError> {
        let member = Reflect::get(&self.library, &JsValue::from_str(name))
            .map_err(|e| FullscreenTransitionError::new(describe(e)))?;
        let function: Function = member.dyn_into().map_err(|_| {
            FullscreenTransitionError::new(format!("fallback library member {name} is not callable"))
        })?;
        function
            .apply(&self.library, args)
            .map_err(|e| FullscreenTransitionError::new(describe(e)))
    }

    fn subscribe(&self, event: &str, closure: &Closure<dyn FnMut()>) {
        let _ = self.call(
            "on",
            &Array::of2(
                &JsValue::from_str(event),
                closure.as_ref().unchecked_ref::<Function>(),
            ),
        );
    }

    fn unsubscribe(&self, event: &str, closure: &Closure<dyn FnMut()>) {
        let _ = self.call(
            "off",
            &Array::of2(
                &JsValue::from_str(event),
                closure.as_ref().unchecked_ref::<Function>(),
            ),
        );
    }
}

impl FallbackFullscreen for JsFallbackFullscreen {
    fn is_enabled(&self) -> bool {
        self.truthy("isEnabled")
    }

    fn is_fullscreen(&self) -> bool {
        self.truthy("isFullscreen")
    }

    fn request(&mut self) -> Result<(), FullscreenTransitionError> {
        self.call("request", &Array::of1(&self.container))?;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), FullscreenTransitionError> {
        self.call("exit", &Array::new())?;
        Ok(())
    }

    fn observe(&mut self) {
        if self.change.is_some() {
            return;
        }
        let change = Closure::wrap(Box::new(crate::fullscreen_changed) as Box<dyn FnMut()>);
        let error = Closure::wrap(Box::new(crate::fullscreen_errored) as Box<dyn FnMut()>);
        self.subscribe("change", &change);
        self.subscribe("error", &error);
        self.change = Some(change);
        self.error = Some(error);
    }

    fn unobserve(&mut self) {
        if let Some(change) = self.change.take() {
            self.unsubscribe("change", &change);
        }
        if let Some(error) = self.error.take() {
            self.unsubscribe("error", &error);
        }
    }
}
