//! Page background resolution

use crate::config::ModalConfig;
use crate::dom::{Dom, DomError};
use tracing::debug;

/// Resolve the color a content slot should paint so it matches the page.
///
/// Browsers disagree on how a transparent computed background is spelled, so an
/// invisible sample element is attached to the body to sample this browser's
/// "transparent". If the body resolves to that same value, the configured fallback is
/// returned instead.
pub fn resolve_page_background<D: Dom>(dom: &D, config: &ModalConfig) -> Result<String, DomError> {
    let body = dom.body().ok_or(DomError::NoBody)?;

    let sample = dom.create_element(&config.sample_tag)?;
    dom.set_style(&sample, "display", "none")?;
    dom.append_child(&body, &sample)?;

    let transparent = dom.computed_style(&sample, "background-color");
    let page = dom.computed_style(&body, "background-color");

    dom.detach(&sample)?;

    debug!("Body background {:?} (transparent is {:?})", page, transparent);
    if page == transparent || page.is_empty() {
        Ok(config.fallback_background.clone())
    } else {
        Ok(page)
    }
}
