//! Browser binding for `davidmodal-core`
//!
//! With the default `auto-init` feature the module start hook installs console logging
//! and builds the page's controller once the document is parsed. Host script reaches it
//! through `DavidModal.current()`.

pub mod bindings;
pub mod dom;
pub mod logging;
pub mod scheduler;

pub use bindings::{install, DavidModal, InstallError};
pub use dom::WebDom;
pub use scheduler::TimeoutScheduler;

#[cfg(feature = "auto-init")]
mod start {
    use davidmodal_core::ModalConfig;
    use tracing::{info, warn};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;

    fn boot() {
        match crate::install(ModalConfig::default()) {
            Ok(_) => info!("DavidModal ready"),
            Err(e) => warn!("DavidModal failed to start: {}", e),
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        crate::logging::init(crate::logging::DEFAULT_FILTER);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            warn!("No document, DavidModal not started");
            return;
        };
        if document.ready_state() != "loading" {
            boot();
            return;
        }

        let listener = Closure::once_into_js(boot);
        if let Err(e) = document
            .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
        {
            warn!("Failed to wait for DOMContentLoaded: {:?}", e);
        }
    }
}
