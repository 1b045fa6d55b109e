/// Animation phase and transition bookkeeping
///
/// Tracks which card is mid-transition and how it is animating. The phase is
/// `Idle` both before and after every transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Animation sub-state of the navigation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationPhase {
    /// No transition in flight
    #[default]
    Idle,

    /// The current card is flying out; the step advances when the timer fires
    FlyOut,

    /// The previous card is sliding in on top; the step retreats when the timer fires
    SlideIn,
}

impl AnimationPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, AnimationPhase::Idle)
    }

    pub fn is_animating(&self) -> bool {
        !self.is_idle()
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnimationPhase::Idle => "idle",
            AnimationPhase::FlyOut => "flyOut",
            AnimationPhase::SlideIn => "slideIn",
        }
    }
}

impl fmt::Display for AnimationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Step mutation applied when the animation timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCommit {
    Advance,
    Retreat,
}

/// Phase plus the card it applies to.
///
/// The animating card exists exactly while the phase is not `Idle`; both are
/// set and cleared together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionState {
    phase: AnimationPhase,
    animating_card: Option<u32>,
}

impl TransitionState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn animating_card(&self) -> Option<u32> {
        self.animating_card
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    /// Enter a transient phase for `card`.
    pub fn begin(&mut self, phase: AnimationPhase, card: u32) {
        debug_assert!(phase.is_animating(), "begin() needs a transient phase");
        self.phase = phase;
        self.animating_card = Some(card);
    }

    /// Return to `Idle`, clearing the animating card.
    pub fn reset(&mut self) {
        self.phase = AnimationPhase::Idle;
        self.animating_card = None;
    }
}
