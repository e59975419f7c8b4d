//! # Events Module
//!
//! View events and the bus that distributes them.

pub mod event_bus;
pub mod view_events;

pub use event_bus::{EventBus, SimpleEventBus, ViewEventHandler};
pub use view_events::ViewEvent;
