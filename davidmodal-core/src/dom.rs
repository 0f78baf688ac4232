//! Seams between the controller and the page it drives
//!
//! The controller never touches a browser API directly. Everything it does to the
//! document goes through [`Dom`], and the only suspension it needs (waiting out a CSS
//! animation) goes through [`Scheduler`]. The browser binding implements both over
//! `web-sys`; tests use the in-memory versions behind the `test-utils` feature.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`Dom`] backend for a mutation or node creation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("document has no body")]
    NoBody,
    #[error("failed to create <{tag}>: {reason}")]
    CreateElement { tag: String, reason: String },
    #[error("DOM operation failed: {0}")]
    Operation(String),
}

/// Which browsing context a reload applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadTarget {
    /// The page the controller runs in
    Current,
    /// The parent browsing context (the page itself when it is not framed)
    Parent,
}

/// A click delivered to a listener registered with [`Dom::on_click`]
pub trait ClickEvent {
    /// Suppress the browser's default action (link navigation)
    fn prevent_default(&self);
}

/// Listener registered for clicks on a node. Lives as long as the node does.
pub type ClickListener = Box<dyn Fn(&dyn ClickEvent)>;

/// Deferred task handed to a [`Scheduler`]
pub type Task = Box<dyn FnOnce()>;

/// Document operations the controller needs
///
/// `Node` is a cheap handle (a `web_sys::Element`, an arena index). Equality means
/// "same node", not structural equality.
pub trait Dom {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    fn body(&self) -> Option<Self::Node>;

    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    /// Parent node, `None` for the document root or a detached subtree root
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn remove_class(&self, node: &Self::Node, class: &str) -> Result<(), DomError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), DomError>;

    /// Set an inline style property (`display`, `background-color`)
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<(), DomError>;

    /// Resolved value of a CSS property, empty when the backend cannot compute it
    fn computed_style(&self, node: &Self::Node, property: &str) -> String;

    /// Append `child` as the last child of `parent`, moving it if already attached
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Insert `child` into `parent` right before `reference`, moving it if already attached
    fn insert_before(
        &self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: &Self::Node,
    ) -> Result<(), DomError>;

    /// Remove a node from its parent. Detaching a detached node is a no-op.
    fn detach(&self, node: &Self::Node) -> Result<(), DomError>;

    /// Attached elements carrying `class`, in document order
    fn elements_with_class(&self, class: &str) -> Vec<Self::Node>;

    fn on_click(&self, node: &Self::Node, listener: ClickListener) -> Result<(), DomError>;

    fn reload(&self, target: ReloadTarget);
}

/// One-shot deferred execution on the page's event loop
///
/// There is no cancellation: a scheduled task always runs. Callers that need to abandon
/// work check their own state when the task fires.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task);
}
