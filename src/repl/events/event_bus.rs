//! # Event Bus
//!
//! Central event distribution system for decoupled communication
//! between the view model and its observers using the observer pattern.

use super::view_events::ViewEvent;

/// Type alias for view event handlers to reduce complexity
pub type ViewEventHandler = Box<dyn Fn(&ViewEvent) + Send + Sync>;

/// Event bus for decoupled communication between components
pub trait EventBus: Send + Sync {
    /// Publish a view event
    fn publish_view_event(&mut self, event: ViewEvent);

    /// Subscribe to view events
    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler);
}

/// Simple in-memory event bus implementation
pub struct SimpleEventBus {
    view_handlers: Vec<ViewEventHandler>,
}

impl SimpleEventBus {
    pub fn new() -> Self {
        Self {
            view_handlers: Vec::new(),
        }
    }
}

impl Default for SimpleEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for SimpleEventBus {
    fn publish_view_event(&mut self, event: ViewEvent) {
        for handler in &self.view_handlers {
            handler(&event);
        }
    }

    fn subscribe_to_view_events(&mut self, handler: ViewEventHandler) {
        self.view_handlers.push(handler);
    }
}
