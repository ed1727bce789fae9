//! Document-side host implementations: resource insertion, scroll lock,
//! and hotspot marker elements.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlLinkElement, HtmlScriptElement, KeyboardEvent};

use loader::{Resource, ResourceHost, ResourceKind};
use modal::ModalHost;
use viewer::{InfoMarker, LinkMarker};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Inserts scripts and stylesheets into `<head>` and reports completion
/// back through the engine's loader callbacks.
pub struct DomResourceHost {
    document: Document,
}

impl DomResourceHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn insert(&self, resource: &Resource) -> Result<(), JsValue> {
        let url = resource.url.clone();
        let onload = Closure::wrap(Box::new(move || {
            crate::resource_settled(&url, true);
        }) as Box<dyn FnMut()>);
        let url = resource.url.clone();
        let onerror = Closure::wrap(Box::new(move || {
            crate::resource_settled(&url, false);
        }) as Box<dyn FnMut()>);

        let element: Element = match resource.kind {
            ResourceKind::Script => {
                let script: HtmlScriptElement =
                    self.document.create_element("script")?.dyn_into()?;
                script.set_src(&resource.url);
                script.set_onload(Some(onload.as_ref().unchecked_ref()));
                script.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                script.into()
            }
            ResourceKind::Stylesheet => {
                let link: HtmlLinkElement = self.document.create_element("link")?.dyn_into()?;
                link.set_rel("stylesheet");
                link.set_href(&resource.url);
                link.set_onload(Some(onload.as_ref().unchecked_ref()));
                link.set_onerror(Some(onerror.as_ref().unchecked_ref()));
                link.into()
            }
        };

        let head = self
            .document
            .head()
            .ok_or_else(|| JsValue::from_str("document has no head"))?;
        head.append_child(&element)?;

        // Inserted elements stay in the document for the page lifetime,
        // so their callbacks are leaked along with them.
        onload.forget();
        onerror.forget();
        Ok(())
    }
}

impl ResourceHost for DomResourceHost {
    fn is_present(&self, resource: &Resource) -> bool {
        let selector = match resource.kind {
            ResourceKind::Script => format!("script[src=\"{}\"]", resource.url),
            ResourceKind::Stylesheet => {
                format!("link[rel=\"stylesheet\"][href=\"{}\"]", resource.url)
            }
        };
        matches!(self.document.query_selector(&selector), Ok(Some(_)))
    }

    fn begin_load(&mut self, resource: &Resource) {
        if let Err(err) = self.insert(resource) {
            web_sys::console::warn_2(
                &JsValue::from_str("failed to insert resource element:"),
                &err,
            );
        }
    }
}

/// Scroll lock and escape-key wiring over `document.body`.
pub struct DomModalHost {
    document: Document,
    escape: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl DomModalHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            escape: None,
        }
    }
}

impl ModalHost for DomModalHost {
    fn scroll_style(&self) -> String {
        self.document
            .body()
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default()
    }

    fn set_scroll_style(&mut self, value: &str) {
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", value);
        }
    }

    fn attach_escape_listener(&mut self) {
        if self.escape.is_some() {
            return;
        }
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                crate::escape_pressed();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let _ = self
            .document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        self.escape = Some(closure);
    }

    fn remove_escape_listener(&mut self) {
        if let Some(closure) = self.escape.take() {
            let _ = self
                .document
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    }
}

/// A navigable hotspot element. Clicks re-enter the engine with the
/// target scene id.
pub fn link_marker_element(marker: &LinkMarker) -> Result<Element, JsValue> {
    let document = document()?;
    let element = document.create_element("div")?;
    element.set_class_name("link-hotspot");
    element.set_attribute("title", &marker.target_scene_id)?;
    element.set_attribute(
        "style",
        &format!("transform: rotate({}rad);", marker.rotation),
    )?;

    let target = marker.target_scene_id.clone();
    let onclick = Closure::wrap(Box::new(move || {
        crate::link_marker_activated(&target);
    }) as Box<dyn FnMut()>);
    element.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
    // The element owns the listener for the life of the scene handle.
    onclick.forget();
    Ok(element)
}

pub fn info_marker_element(marker: &InfoMarker) -> Result<Element, JsValue> {
    let document = document()?;
    let element = document.create_element("div")?;
    element.set_class_name("info-hotspot");
    element.set_text_content(Some(&marker.text));
    Ok(element)
}
