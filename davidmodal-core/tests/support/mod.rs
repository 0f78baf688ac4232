#![allow(dead_code)]

use davidmodal_core::testing::{ManualScheduler, MemoryDom, NodeId};
use davidmodal_core::{Callback, ModalConfig, ModalController};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

pub const CONTAINER: &str = "davidmodal-container";
pub const CONTENT: &str = "davidmodal-content";
pub const CLOSE: &str = "davidmodal-x";
pub const SHOWN: &str = "showdavidmodal";
pub const HIDDEN: &str = "hidedavidmodal";

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A page, a virtual clock and a controller over them
pub struct Page {
    pub dom: Rc<MemoryDom>,
    pub clock: Rc<ManualScheduler>,
    pub controller: ModalController<MemoryDom>,
}

impl Page {
    pub fn new() -> Self {
        Self::with_config(ModalConfig::default())
    }

    pub fn with_config(config: ModalConfig) -> Self {
        init_tracing();
        let dom = Rc::new(MemoryDom::new());
        let clock = Rc::new(ManualScheduler::new());
        let controller = ModalController::new(dom.clone(), clock.clone(), config);
        Self {
            dom,
            clock,
            controller,
        }
    }

    /// Give containers a fade of `ms` milliseconds
    pub fn with_fade_ms(self, ms: u64) -> Self {
        self.dom
            .add_rule(CONTAINER, "animation-duration", &format!("{ms}ms"));
        self
    }

    pub fn body(&self) -> NodeId {
        self.dom.body_id()
    }

    pub fn advance_ms(&self, ms: u64) -> usize {
        self.clock.advance(Duration::from_millis(ms))
    }

    pub fn has(&self, node: NodeId, class: &str) -> bool {
        self.dom.classes(node).iter().any(|c| c == class)
    }

    pub fn display(&self, node: NodeId) -> Option<String> {
        self.dom.inline_style(node, "display")
    }

    pub fn containers(&self) -> Vec<NodeId> {
        use davidmodal_core::Dom;
        self.dom.elements_with_class(CONTAINER)
    }

    /// The close control of a container built by the controller
    pub fn close_control(&self, container: NodeId) -> NodeId {
        self.dom.children(container)[1]
    }

    pub fn content_slot(&self, container: NodeId) -> NodeId {
        self.dom.children(container)[0]
    }
}

/// Shared event log for ordering assertions
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Callback that records `name` when it runs
    pub fn callback(&self, name: &str) -> Callback {
        let log = self.clone();
        let name = name.to_string();
        Box::new(move || log.push(name))
    }
}
