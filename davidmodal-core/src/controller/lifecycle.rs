use super::{Callback, ModalController};
use crate::dom::Dom;
use crate::error::ModalError;
use crate::timing::parse_css_time;
use std::time::Duration;
use tracing::{debug, warn};

/// What to do once the fade-out has had time to finish
enum Finish {
    Hide,
    Remove,
}

impl<D: Dom + 'static> ModalController<D> {
    /// Show the container `target` belongs to.
    ///
    /// Synchronous: the fade-in is entirely up to CSS reacting to the marker swap.
    /// Any hide still waiting on this container is abandoned.
    pub fn show(&self, target: &D::Node) -> Option<D::Node> {
        let result = self
            .resolve(target)
            .and_then(|container| self.apply_show(&container).map(|_| container));
        self.log_outcome("show", result)
    }

    /// Fade out a container, then set `display: none` and run `callback`.
    ///
    /// `target` may be the container or anything inside it. Without a target, or if it
    /// isn't inside a container, the currently shown container is used. Returns the
    /// container immediately; the hide itself completes after its animation duration.
    pub fn hide(&self, target: Option<&D::Node>, callback: Option<Callback>) -> Option<D::Node> {
        let result = self.resolve_or_shown(target).and_then(|container| {
            self.begin_hide(&container, Finish::Hide, callback)
                .map(|_| container)
        });
        self.log_outcome("hide", result)
    }

    /// Detach a container from the document right away, without animation
    pub fn remove(&self, target: Option<&D::Node>) -> Option<D::Node> {
        let result = self.resolve_or_shown(target).and_then(|container| {
            self.dom().detach(&container)?;
            debug!("Removed modal {:?}", container);
            Ok(container)
        });
        self.log_outcome("remove", result)
    }

    /// Fade out a container, run `callback`, then detach the container.
    ///
    /// The callback runs while the container is still attached.
    pub fn hide_and_remove(
        &self,
        target: Option<&D::Node>,
        callback: Option<Callback>,
    ) -> Option<D::Node> {
        let result = self.resolve_or_shown(target).and_then(|container| {
            self.begin_hide(&container, Finish::Remove, callback)
                .map(|_| container)
        });
        self.log_outcome("hide_and_remove", result)
    }

    /// The container's computed `animation-duration`
    pub fn animation_duration(&self, container: &D::Node) -> Duration {
        parse_css_time(&self.dom().computed_style(container, "animation-duration"))
    }

    fn apply_show(&self, container: &D::Node) -> Result<(), ModalError> {
        let dom = self.dom();
        let config = self.config();
        dom.remove_class(container, &config.hidden_class)?;
        dom.add_class(container, &config.shown_class)?;
        dom.set_style(container, "display", &config.shown_display)?;

        let generation = self.generation(container).wrapping_add(1);
        dom.set_attribute(container, &config.generation_attribute, &generation.to_string())?;
        debug!("Showing modal {:?} (generation {})", container, generation);
        Ok(())
    }

    /// Swap markers and schedule the end of the fade-out.
    ///
    /// The task remembers the show generation it was scheduled under and does nothing
    /// if the container has been shown again in the meantime.
    fn begin_hide(
        &self,
        container: &D::Node,
        finish: Finish,
        callback: Option<Callback>,
    ) -> Result<(), ModalError> {
        let dom = self.dom();
        let config = self.config();
        dom.remove_class(container, &config.shown_class)?;
        dom.add_class(container, &config.hidden_class)?;

        let generation = self.generation(container);
        let delay = self.animation_duration(container);
        debug!(
            "Hiding modal {:?}, finishing in {}ms",
            container,
            delay.as_millis()
        );

        let weak = self.downgrade();
        let container = container.clone();
        self.inner.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(controller) = Self::upgrade(&weak) else {
                    return;
                };
                if controller.generation(&container) != generation {
                    debug!("Modal {:?} was shown again, abandoning hide", container);
                    return;
                }
                if let Err(e) = controller.finish_hide(&container, finish, callback) {
                    warn!("Failed to finish hiding modal {:?}: {}", container, e);
                }
            }),
        );
        Ok(())
    }

    fn finish_hide(
        &self,
        container: &D::Node,
        finish: Finish,
        callback: Option<Callback>,
    ) -> Result<(), ModalError> {
        match finish {
            Finish::Hide => {
                self.dom().set_style(container, "display", "none")?;
                if let Some(callback) = callback {
                    callback();
                }
            }
            Finish::Remove => {
                if let Some(callback) = callback {
                    callback();
                }
                self.dom().detach(container)?;
                debug!("Removed modal {:?} after fade-out", container);
            }
        }
        Ok(())
    }

    /// Show counter stored on the container, 0 if never shown
    fn generation(&self, container: &D::Node) -> u64 {
        self.dom()
            .attribute(container, &self.config().generation_attribute)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    }

    fn log_outcome(&self, operation: &str, result: Result<D::Node, ModalError>) -> Option<D::Node> {
        match result {
            Ok(container) => Some(container),
            Err(e) => {
                warn!("Unable to {} modal: {}", operation, e);
                None
            }
        }
    }
}
