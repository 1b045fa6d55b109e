/// Input listener wiring for the active card
///
/// Exactly one card (the active, non-animating one) carries the drag
/// listeners. When the active card changes the old set is detached before
/// the new one is attached.

use serde::Serialize;

/// Recognizer entry point a listener forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputHandler {
    Start,
    Move,
    End,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListenerSpec {
    pub event: &'static str,
    pub handler: InputHandler,
    /// `Some(false)` when the handler may cancel the default action;
    /// `None` leaves the platform default
    pub passive: Option<bool>,
}

/// Listeners attached to the active card
pub const LISTENERS: [ListenerSpec; 7] = [
    ListenerSpec {
        event: "touchstart",
        handler: InputHandler::Start,
        passive: Some(false),
    },
    ListenerSpec {
        event: "touchmove",
        handler: InputHandler::Move,
        passive: Some(false),
    },
    ListenerSpec {
        event: "touchend",
        handler: InputHandler::End,
        passive: Some(false),
    },
    ListenerSpec {
        event: "mousedown",
        handler: InputHandler::Start,
        passive: None,
    },
    ListenerSpec {
        event: "mousemove",
        handler: InputHandler::Move,
        passive: None,
    },
    ListenerSpec {
        event: "mouseup",
        handler: InputHandler::End,
        passive: None,
    },
    ListenerSpec {
        event: "mouseleave",
        handler: InputHandler::Leave,
        passive: None,
    },
];

/// Look up the handler for a DOM event name
pub fn handler_for(event: &str) -> Option<InputHandler> {
    LISTENERS
        .iter()
        .find(|spec| spec.event == event)
        .map(|spec| spec.handler)
}

/// Change the host must apply to its listener set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum BindingChange {
    Detach { step: u32 },
    Attach { step: u32 },
}

/// Tracks which card currently carries the listener set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerBinding {
    bound_step: Option<u32>,
}

impl ListenerBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound_step(&self) -> Option<u32> {
        self.bound_step
    }

    /// Bring the binding in line with the current frame.
    ///
    /// The active card is unbound while it is the card flying out.
    pub fn sync(&mut self, current_step: u32, animating_card: Option<u32>) -> Vec<BindingChange> {
        let wanted = (animating_card != Some(current_step)).then_some(current_step);
        if wanted == self.bound_step {
            return Vec::new();
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(step) = self.bound_step.take() {
            changes.push(BindingChange::Detach { step });
        }
        if let Some(step) = wanted {
            changes.push(BindingChange::Attach { step });
        }
        self.bound_step = wanted;

        tracing::debug!("Listener binding changed: {:?}", changes);
        changes
    }

    /// Detach everything
    pub fn unbind(&mut self) -> Option<BindingChange> {
        self.bound_step
            .take()
            .map(|step| BindingChange::Detach { step })
    }
}
