use super::{ModalController, OverlayKind};
use crate::dom::{ClickEvent, Dom, DomError, ReloadTarget};
use crate::error::ModalError;
use tracing::{debug, warn};

/// A freshly built container and its content slot
struct Overlay<N> {
    container: N,
    content: N,
}

impl<D: Dom + 'static> ModalController<D> {
    /// Build an embedded-document container for a link trigger, append it to the body
    /// and show it. This is what a click on a link trigger does.
    pub fn open_embedded(&self, trigger: &D::Node) -> Option<D::Node> {
        match self.try_open_embedded(trigger) {
            Ok(container) => Some(container),
            Err(e) => {
                warn!("Unable to open embedded modal for {:?}: {}", trigger, e);
                None
            }
        }
    }

    fn try_open_embedded(&self, trigger: &D::Node) -> Result<D::Node, ModalError> {
        let src = self.link_target(trigger).ok_or_else(|| {
            DomError::Operation(format!(
                "trigger has no {} to embed",
                self.config().link_attribute
            ))
        })?;
        let body = self.dom().body().ok_or(DomError::NoBody)?;

        let refresh = self.wants_refresh(trigger);
        let overlay = self.build_overlay("iframe", OverlayKind::Embedded, refresh)?;
        self.dom().set_attribute(&overlay.content, "src", &src)?;
        self.dom().append_child(&body, &overlay.container)?;
        debug!("Appended embedded modal for {}", src);

        self.show(&overlay.container);
        Ok(overlay.container)
    }

    /// Move `element` into a new container inserted where the element used to be.
    ///
    /// The element is moved, not cloned, so listeners the page already attached to it
    /// keep working.
    pub(super) fn relocate(&self, element: &D::Node) -> Result<D::Node, ModalError> {
        let dom = self.dom();
        let parent = dom
            .parent(element)
            .ok_or_else(|| DomError::Operation("trigger element is not attached".to_string()))?;

        let refresh = self.wants_refresh(element);
        let overlay = self.build_overlay("div", OverlayKind::Relocated, refresh)?;
        dom.insert_before(&parent, &overlay.container, element)?;
        dom.append_child(&overlay.content, element)?;
        dom.set_style(element, "display", &self.config().relocated_display)?;

        debug!("Relocated {:?} into modal {:?}", element, overlay.container);
        Ok(overlay.container)
    }

    pub(super) fn wire_embedded_trigger(&self, trigger: &D::Node) -> Result<(), ModalError> {
        let weak = self.downgrade();
        let node = trigger.clone();
        self.dom().on_click(
            trigger,
            Box::new(move |event: &dyn ClickEvent| {
                event.prevent_default();
                if let Some(controller) = Self::upgrade(&weak) {
                    controller.open_embedded(&node);
                }
            }),
        )?;
        Ok(())
    }

    fn wants_refresh(&self, trigger: &D::Node) -> bool {
        self.dom().has_class(trigger, &self.config().refresh_class)
    }

    /// Container > (content slot, close control), detached
    fn build_overlay(
        &self,
        content_tag: &str,
        kind: OverlayKind,
        refresh: bool,
    ) -> Result<Overlay<D::Node>, DomError> {
        let dom = self.dom();
        let config = self.config();

        let container = dom.create_element("div")?;
        dom.add_class(&container, &config.container_class)?;

        let content = dom.create_element(content_tag)?;
        dom.add_class(&content, &config.content_class)?;
        dom.set_style(&content, "background-color", self.page_background())?;

        let close = dom.create_element("div")?;
        dom.add_class(&close, &config.close_class)?;
        self.wire_close_control(&close, &container, kind, refresh)?;

        dom.append_child(&container, &content)?;
        dom.append_child(&container, &close)?;
        Ok(Overlay { container, content })
    }

    fn wire_close_control(
        &self,
        close: &D::Node,
        container: &D::Node,
        kind: OverlayKind,
        refresh: bool,
    ) -> Result<(), DomError> {
        let weak = self.downgrade();
        let container = container.clone();
        self.dom().on_click(
            close,
            Box::new(move |_: &dyn ClickEvent| {
                let Some(controller) = Self::upgrade(&weak) else {
                    return;
                };
                let callback = refresh.then(|| controller.reload_callback(kind));
                match kind {
                    OverlayKind::Relocated => {
                        controller.hide(Some(&container), callback);
                    }
                    OverlayKind::Embedded => {
                        controller.hide_and_remove(Some(&container), callback);
                    }
                }
            }),
        )
    }

    /// Relocated modals live in the page itself, embedded ones reload the page that
    /// hosts the frame
    fn reload_callback(&self, kind: OverlayKind) -> super::Callback {
        let target = match kind {
            OverlayKind::Relocated => ReloadTarget::Current,
            OverlayKind::Embedded => ReloadTarget::Parent,
        };
        let weak = self.downgrade();
        Box::new(move || {
            if let Some(controller) = Self::upgrade(&weak) {
                debug!("Reloading {:?} after modal close", target);
                controller.dom().reload(target);
            }
        })
    }
}
