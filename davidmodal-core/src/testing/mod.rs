//! In-memory [`Dom`](crate::dom::Dom) and virtual-clock [`Scheduler`](crate::dom::Scheduler)
//! for exercising the controller without a browser

mod manual_scheduler;
mod memory_dom;

pub use manual_scheduler::ManualScheduler;
pub use memory_dom::{MemoryDom, NodeId, TRANSPARENT};
