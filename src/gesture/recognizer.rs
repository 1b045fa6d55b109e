/// Swipe gesture recognizer
///
/// Turns start/move/end events on the active card into a live drag offset
/// and, at release, a one-shot swipe decision. Knows nothing about steps.

use serde::{Deserialize, Serialize};

use super::event::PointerEvent;
use super::suppression::suppressing_class;
use crate::config::GestureConfig;
use crate::wizard::NavigationTarget;

/// Discrete outcome of a completed gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swipe {
    /// Pointer travelled left: go forward
    Left,

    /// Pointer travelled right: go back
    Right,
}

impl Swipe {
    pub fn target(&self) -> NavigationTarget {
        match self {
            Swipe::Left => NavigationTarget::Next,
            Swipe::Right => NavigationTarget::Prev,
        }
    }
}

/// Why `start` declined to open a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRejection {
    Disabled,
    Suppressed(super::event::SelectorClass),
}

/// Ephemeral record of one drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub start_x: f64,
    pub start_y: f64,
    /// Last horizontal position seen by `move_to`; none until the pointer moves
    pub last_x: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    session: Option<GestureSession>,
    drag_offset: f64,
    disabled: bool,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config: config.normalized(),
            session: None,
            drag_offset: 0.0,
            disabled: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Live horizontal offset of the active card
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// While disabled no new drag can start and an ongoing one cannot swipe
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Begin a drag unless the event starts on a suppressed element.
    pub fn start(&mut self, event: &mut PointerEvent<'_>) -> Result<(), StartRejection> {
        if self.disabled {
            return Err(StartRejection::Disabled);
        }

        if let Some(class) = event.target.and_then(suppressing_class) {
            tracing::trace!("Drag start suppressed on {:?}", class);
            return Err(StartRejection::Suppressed(class));
        }

        event.prevent_default();
        self.session = Some(GestureSession {
            start_x: event.x,
            start_y: event.y,
            last_x: None,
        });
        self.drag_offset = 0.0;
        tracing::trace!("Drag started at ({}, {})", event.x, event.y);
        Ok(())
    }

    /// Track the pointer and publish the clamped drag offset.
    pub fn move_to(&mut self, event: &mut PointerEvent<'_>) {
        if self.disabled {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.last_x = Some(event.x);
        let dx = event.x - session.start_x;
        let dy = event.y - session.start_y;

        // Keep the page from scrolling under a horizontal swipe.
        if event.is_touch() && dx.abs() > dy.abs() {
            event.prevent_default();
        }

        self.drag_offset = dx.clamp(-self.config.max_drag_offset, self.config.soft_max_right);
    }

    /// Finish the drag, returning the swipe it amounts to, if any.
    pub fn end(&mut self) -> Option<Swipe> {
        let session = self.session.take()?;
        self.drag_offset = 0.0;

        if self.disabled {
            return None;
        }
        let last_x = session.last_x?;

        let distance = session.start_x - last_x;
        let swipe = if distance >= self.config.min_swipe_distance {
            Some(Swipe::Left)
        } else if distance <= -self.config.min_swipe_distance {
            Some(Swipe::Right)
        } else {
            None
        };

        tracing::trace!("Drag ended after {}px: {:?}", distance, swipe);
        swipe
    }

    /// Abandon the drag (pointer left the surface) without evaluating it.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.drag_offset = 0.0;
            tracing::trace!("Drag cancelled");
        }
    }

    /// Drop any session state, e.g. when the active card changes
    pub fn reset(&mut self) {
        self.session = None;
        self.drag_offset = 0.0;
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
