//! DOM Events
//!
//! Listener registration payloads and the event object handed to them.

use std::cell::Cell;
use std::rc::Rc;

use crate::NodeId;

/// Event listener callback
pub type EventListener = Rc<dyn Fn(&Event)>;

/// DOM event
#[derive(Debug)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub bubbles: bool,
    current_target: Cell<NodeId>,
    propagation_stopped: Cell<bool>,
}

impl Event {
    /// Create a bubbling event aimed at `target`
    pub fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            bubbles: true,
            current_target: Cell::new(target),
            propagation_stopped: Cell::new(false),
        }
    }

    /// Create an event that only reaches `target`
    pub fn non_bubbling(event_type: &str, target: NodeId) -> Self {
        Self {
            bubbles: false,
            ..Self::new(event_type, target)
        }
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub(crate) fn set_current_target(&self, node: NodeId) {
        self.current_target.set(node);
    }

    /// Stop propagation to ancestors
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}
