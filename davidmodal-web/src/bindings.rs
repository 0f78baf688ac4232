//! Script-facing API

use crate::dom::WebDom;
use crate::scheduler::TimeoutScheduler;
use davidmodal_core::{Callback, ConfigError, DomError, ModalConfig, ModalController};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

thread_local! {
    static CURRENT: RefCell<Option<ModalController<WebDom>>> = const { RefCell::new(None) };
}

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("DavidModal is already initialized on this page, use DavidModal.current()")]
    AlreadyInitialized,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Build the page's controller, run discovery and make it the current one
pub fn install(config: ModalConfig) -> Result<ModalController<WebDom>, InstallError> {
    if CURRENT.with(|current| current.borrow().is_some()) {
        return Err(InstallError::AlreadyInitialized);
    }
    config.validate()?;
    let dom = WebDom::new()?;
    let controller = ModalController::new(Rc::new(dom), Rc::new(TimeoutScheduler), config);
    controller.init();
    CURRENT.with(|current| *current.borrow_mut() = Some(controller.clone()));
    Ok(controller)
}

/// Wrap a JS function as a completion callback. Exceptions are logged, not rethrown.
fn js_callback(function: Option<js_sys::Function>) -> Option<Callback> {
    function.map(|function| -> Callback {
        Box::new(move || {
            if let Err(e) = function.call0(&JsValue::NULL) {
                warn!("Modal callback threw: {:?}", e);
            }
        })
    })
}

/// Handle to the page's modal controller
#[wasm_bindgen]
pub struct DavidModal {
    controller: ModalController<WebDom>,
}

#[wasm_bindgen]
impl DavidModal {
    /// Initialize by hand, for builds without the `auto-init` feature.
    ///
    /// `config` is an optional JSON object overriding marker names.
    pub fn init(config: Option<String>) -> Result<DavidModal, JsError> {
        let config = match config {
            Some(json) => ModalConfig::from_json(&json).map_err(|e| JsError::new(&e.to_string()))?,
            None => ModalConfig::default(),
        };
        let controller = install(config).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { controller })
    }

    /// The controller built for this page, if initialization has run
    pub fn current() -> Option<DavidModal> {
        CURRENT.with(|current| {
            current
                .borrow()
                .as_ref()
                .map(|controller| Self {
                    controller: controller.clone(),
                })
        })
    }

    pub fn show(&self, target: &Element) -> Option<Element> {
        self.controller.show(target)
    }

    pub fn hide(&self, target: Option<Element>, callback: Option<js_sys::Function>) -> Option<Element> {
        self.controller.hide(target.as_ref(), js_callback(callback))
    }

    pub fn remove(&self, target: Option<Element>) -> Option<Element> {
        self.controller.remove(target.as_ref())
    }

    #[wasm_bindgen(js_name = hideAndRemove)]
    pub fn hide_and_remove(
        &self,
        target: Option<Element>,
        callback: Option<js_sys::Function>,
    ) -> Option<Element> {
        self.controller
            .hide_and_remove(target.as_ref(), js_callback(callback))
    }

    /// Open an embedded-document modal for any element carrying the link attribute
    #[wasm_bindgen(js_name = openEmbedded)]
    pub fn open_embedded(&self, trigger: &Element) -> Option<Element> {
        self.controller.open_embedded(trigger)
    }

    /// Resolve an element to its container without changing anything
    #[wasm_bindgen(js_name = findContainer)]
    pub fn find_container(&self, target: &Element) -> Option<Element> {
        self.controller.find_container(target)
    }
}
