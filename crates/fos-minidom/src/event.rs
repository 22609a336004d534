//! DOM Events
//!
//! A plain signal object. It knows nothing about the tree; `dispatch_event`
//! fills in `target`/`current_target` and drives the stop flags.

use crate::NodeId;

/// Flags accepted when constructing an [`Event`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventInit {
    pub bubbles: bool,
    pub cancelable: bool,
    /// Deliver to capture-phase listeners of every ancestor (root first).
    /// Without it only the target's own capture listeners run.
    pub captures: bool,
}

impl EventInit {
    /// Bubbling, cancelable and capturing
    pub fn propagating() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            captures: true,
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    bubbles: bool,
    cancelable: bool,
    captures: bool,
    default_prevented: bool,
    pub(crate) target: Option<NodeId>,
    pub(crate) current_target: Option<NodeId>,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
    /// Set while a passive listener runs
    pub(crate) passive: bool,
}

impl Event {
    /// Create an event of `event_type`
    pub fn new(event_type: &str, init: EventInit) -> Self {
        Self {
            event_type: event_type.to_string(),
            bubbles: init.bubbles,
            cancelable: init.cancelable,
            captures: init.captures,
            default_prevented: false,
            target: None,
            current_target: None,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
            passive: false,
        }
    }

    /// Event type
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn cancelable(&self) -> bool {
        self.cancelable
    }

    pub fn captures(&self) -> bool {
        self.captures
    }

    /// Node the event was dispatched on
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Check if default was prevented
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Prevent default action
    ///
    /// Ignored with a diagnostic inside passive listeners (and for
    /// non-cancelable events, which always run listeners passively).
    pub fn prevent_default(&mut self) {
        if self.passive {
            tracing::warn!(
                "Unable to preventDefault inside passive event listener invocation ({})",
                self.event_type
            );
            return;
        }
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation after the current bucket of listeners
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners of this bucket
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}
