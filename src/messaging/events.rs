/// Wizard events
///
/// Events describe state changes that already happened (past tense) and are
/// broadcast to every subscriber of the bus.
use serde::Serialize;

use crate::gesture::{SelectorClass, Swipe};
use crate::render::BindingChange;
use crate::wizard::{AnimationPhase, NavigationContext};

/// What moved the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepChangeCause {
    /// Absolute jump, applied immediately
    Jump,

    /// Completion of a fly-out or slide-in
    Animation(AnimationPhase),

    /// Step count shrank below the current step
    Reconfigured,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    /// A fly-out or slide-in began
    TransitionStarted {
        phase: AnimationPhase,
        animating_card: u32,
        target_step: u32,
    },

    /// The current step changed
    StepChanged {
        from: u32,
        to: u32,
        cause: StepChangeCause,
    },

    /// The guard rejected a transition
    NavigationVetoed { context: NavigationContext },

    /// The sub-step within the current (or landing) step changed
    SubStepChanged { step: u32, sub_step: u32 },

    /// A drag ended past the swipe threshold
    SwipeRecognized { swipe: Swipe },

    /// A drag was refused because it started on an interactive element
    GestureSuppressed { class: SelectorClass },

    /// The input listeners moved between cards
    ListenersRebound { changes: Vec<BindingChange> },

    /// The wizard was torn down
    TornDown,
}

impl WizardEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            WizardEvent::TransitionStarted {
                phase,
                animating_card,
                target_step,
            } => format!(
                "Transition {} of card {} towards step {}",
                phase, animating_card, target_step
            ),
            WizardEvent::StepChanged { from, to, .. } => {
                format!("Step changed {} -> {}", from, to)
            }
            WizardEvent::NavigationVetoed { context } => format!(
                "Navigation vetoed {} -> {}",
                context.current_step, context.target_step
            ),
            WizardEvent::SubStepChanged { step, sub_step } => {
                format!("Sub-step {} of step {}", sub_step, step)
            }
            WizardEvent::SwipeRecognized { swipe } => format!("Swipe {:?}", swipe),
            WizardEvent::GestureSuppressed { class } => {
                format!("Gesture suppressed on {:?}", class)
            }
            WizardEvent::ListenersRebound { changes } => {
                format!("Listeners rebound ({} changes)", changes.len())
            }
            WizardEvent::TornDown => "Torn down".to_string(),
        }
    }
}
