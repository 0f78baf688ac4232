//! Modal overlays driven by marker classes and CSS animations
//!
//! [`ModalController`] turns marked page elements into overlay containers, either by
//! relocating the element into a fresh container or, for link triggers, by building an
//! embedded-document container on click. Visual transitions belong to the host page's
//! CSS; the controller only swaps marker classes and waits out the container's computed
//! `animation-duration`.

pub mod background;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod lookup;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod timing;

pub use config::{ConfigError, ModalConfig};
pub use controller::{Callback, InitReport, ModalController, OverlayKind};
pub use dom::{ClickEvent, ClickListener, Dom, DomError, ReloadTarget, Scheduler, Task};
pub use error::ModalError;
pub use lookup::find_nearest_container;
