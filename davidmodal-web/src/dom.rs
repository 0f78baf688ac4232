//! `web-sys` implementation of the controller's DOM seam

use davidmodal_core::{ClickEvent, ClickListener, Dom, DomError, ReloadTarget};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, Window};

/// Convert a thrown JS value into a [`DomError`]
pub(crate) fn js_error(context: &str, err: JsValue) -> DomError {
    let message = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    DomError::Operation(format!("{context}: {message}"))
}

struct WebClickEvent(Event);

impl ClickEvent for WebClickEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// The live document of the current window
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window()
            .ok_or_else(|| DomError::Operation("no global window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::Operation("window has no document".to_string()))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Result<Element, DomError> {
        self.document
            .create_element(tag)
            .map_err(|e| DomError::CreateElement {
                tag: tag.to_string(),
                reason: js_error("createElement", e).to_string(),
            })
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .add_1(class)
            .map_err(|e| js_error("classList.add", e))
    }

    fn remove_class(&self, node: &Element, class: &str) -> Result<(), DomError> {
        node.class_list()
            .remove_1(class)
            .map_err(|e| js_error("classList.remove", e))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), DomError> {
        node.set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", e))
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<(), DomError> {
        let element = node.dyn_ref::<HtmlElement>().ok_or_else(|| {
            DomError::Operation(format!("cannot style non-HTML element {}", node.tag_name()))
        })?;
        element
            .style()
            .set_property(property, value)
            .map_err(|e| js_error("style.setProperty", e))
    }

    fn computed_style(&self, node: &Element, property: &str) -> String {
        match self.window.get_computed_style(node) {
            Ok(Some(style)) => style.get_property_value(property).unwrap_or_default(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("getComputedStyle failed: {}", js_error("getComputedStyle", e));
                String::new()
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), DomError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|e| js_error("appendChild", e))
    }

    fn insert_before(
        &self,
        parent: &Element,
        child: &Element,
        reference: &Element,
    ) -> Result<(), DomError> {
        parent
            .insert_before(child, Some(reference))
            .map(|_| ())
            .map_err(|e| js_error("insertBefore", e))
    }

    fn detach(&self, node: &Element) -> Result<(), DomError> {
        node.remove();
        Ok(())
    }

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        let collection = self.document.get_elements_by_class_name(class);
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }

    fn on_click(&self, node: &Element, listener: ClickListener) -> Result<(), DomError> {
        let callback = Closure::wrap(Box::new(move |event: Event| {
            listener(&WebClickEvent(event));
        }) as Box<dyn FnMut(Event)>);
        node.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", e))?;
        // The listener lives as long as the element
        callback.forget();
        Ok(())
    }

    fn reload(&self, target: ReloadTarget) {
        let window = match target {
            ReloadTarget::Current => self.window.clone(),
            ReloadTarget::Parent => match self.window.parent() {
                Ok(Some(parent)) => parent,
                _ => self.window.clone(),
            },
        };
        if let Err(e) = window.location().reload() {
            warn!("Failed to reload {:?}: {}", target, js_error("location.reload", e));
        }
    }
}
