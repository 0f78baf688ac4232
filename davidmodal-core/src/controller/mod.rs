//! The modal controller: discovery, overlay construction and lifecycle

mod lifecycle;
mod overlay;

use crate::background::resolve_page_background;
use crate::config::ModalConfig;
use crate::dom::{Dom, Scheduler};
use crate::error::ModalError;
use crate::lookup::find_nearest_container;
use std::cell::{Cell, OnceCell};
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{info, warn};

/// Work to run once a hide finishes
pub type Callback = Box<dyn FnOnce()>;

/// How a container came to exist, which decides what its close control does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// An existing page element moved into a container that stays in the document
    Relocated,
    /// An embedded-document viewer created on click and removed on close
    Embedded,
}

/// What [`ModalController::init`] did with the marked elements it found
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    /// Elements moved into a new container
    pub relocated: usize,
    /// Link triggers wired to open an embedded document on click
    pub embedded: usize,
    /// Elements that could not be processed (logged)
    pub failed: usize,
}

struct Inner<D: Dom> {
    dom: Rc<D>,
    scheduler: Rc<dyn Scheduler>,
    config: ModalConfig,
    background: OnceCell<String>,
    initialized: Cell<bool>,
}

/// Controller for every modal on one page
///
/// Cloning is cheap and yields a handle to the same controller. Listeners installed on
/// close controls and triggers hold weak handles, so the page keeps one strong handle
/// for as long as modals should keep working.
pub struct ModalController<D: Dom> {
    inner: Rc<Inner<D>>,
}

impl<D: Dom> Clone for ModalController<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D: Dom> fmt::Debug for ModalController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalController")
            .field("config", &self.inner.config)
            .field("background", &self.inner.background.get())
            .field("initialized", &self.inner.initialized.get())
            .finish()
    }
}

impl<D: Dom + 'static> ModalController<D> {
    pub fn new(dom: Rc<D>, scheduler: Rc<dyn Scheduler>, config: ModalConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                dom,
                scheduler,
                config,
                background: OnceCell::new(),
                initialized: Cell::new(false),
            }),
        }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.inner.config
    }

    pub fn dom(&self) -> &D {
        &self.inner.dom
    }

    /// Scan the document for trigger elements and prepare each one.
    ///
    /// Triggers without a link target are relocated into a container right away; the
    /// page is still responsible for calling [`show`](Self::show) on them. Triggers with
    /// a link target get a click listener that builds and shows an embedded-document
    /// container. Runs once per controller; later calls are logged and ignored.
    pub fn init(&self) -> InitReport {
        let mut report = InitReport::default();
        if self.inner.initialized.replace(true) {
            warn!("Modal controller already initialized, ignoring");
            return report;
        }

        let triggers = self.dom().elements_with_class(&self.config().trigger_class);
        for trigger in triggers {
            let result = match self.link_target(&trigger) {
                None => self.relocate(&trigger).map(|_| report.relocated += 1),
                Some(_) => self
                    .wire_embedded_trigger(&trigger)
                    .map(|_| report.embedded += 1),
            };
            if let Err(e) = result {
                warn!("Failed to prepare modal trigger {:?}: {}", trigger, e);
                report.failed += 1;
            }
        }

        info!(
            "Modal controller initialized: {} relocated, {} embedded, {} failed",
            report.relocated, report.embedded, report.failed
        );
        report
    }

    /// The page background used for content slots, resolved on first use and cached
    pub fn page_background(&self) -> &str {
        self.inner.background.get_or_init(|| {
            resolve_page_background(self.dom(), self.config()).unwrap_or_else(|e| {
                warn!(
                    "Failed to resolve page background, using {}: {}",
                    self.config().fallback_background,
                    e
                );
                self.config().fallback_background.clone()
            })
        })
    }

    /// The container `node` belongs to, if any
    pub fn find_container(&self, node: &D::Node) -> Option<D::Node> {
        find_nearest_container(self.dom(), node, &self.config().container_class)
    }

    /// The first container currently bearing the shown marker
    pub fn shown_container(&self) -> Option<D::Node> {
        let config = self.config();
        self.dom()
            .elements_with_class(&config.shown_class)
            .into_iter()
            .find(|node| self.dom().has_class(node, &config.container_class))
    }

    /// Non-empty link target of a trigger
    fn link_target(&self, trigger: &D::Node) -> Option<String> {
        self.dom()
            .attribute(trigger, &self.config().link_attribute)
            .filter(|href| !href.trim().is_empty())
    }

    fn resolve(&self, target: &D::Node) -> Result<D::Node, ModalError> {
        self.find_container(target)
            .ok_or_else(|| ModalError::ContainerNotFound(format!("{target:?}")))
    }

    /// Resolve an optional target, falling back to the shown container
    fn resolve_or_shown(&self, target: Option<&D::Node>) -> Result<D::Node, ModalError> {
        target
            .and_then(|t| self.find_container(t))
            .or_else(|| self.shown_container())
            .ok_or_else(|| {
                ModalError::ContainerNotFound(match target {
                    Some(t) => format!("{t:?}"),
                    None => "no target given".to_string(),
                })
            })
    }

    fn downgrade(&self) -> Weak<Inner<D>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(inner: &Weak<Inner<D>>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }
}
