/// Step navigation for the card-stack wizard
///
/// Provides the step/animation state machine behind the wizard.
///
/// ## Architecture
///
/// ```text
/// NavigationStateMachine
///   ├── TransitionState (animation phase + animating card)
///   ├── NavigationGuard (injected veto)
///   └── DeferredAction (animation completion, polled against a Clock)
///
/// SubStepCursor (caller side, resolves sub-steps before the machine sees a request)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use swipe_wizard::wizard::{NavigationStateMachine, NavigationTarget, AllowAll};
///
/// let mut machine = NavigationStateMachine::new(&config, AllowAll);
/// machine.navigate_to_step(NavigationTarget::Next);
///
/// // Each frame
/// if let Some(commit) = machine.tick() {
///     // step committed
/// }
/// ```

pub mod flow;
pub mod guard;
pub mod state;
pub mod steps;
pub mod sub_steps;


// Re-export commonly used types
pub use flow::{IgnoreReason, NavigationOutcome, NavigationStateMachine, StepCommit};
pub use guard::{AllowAll, DenyAll, NavigationGuard};
pub use state::{AnimationPhase, TransitionState};
pub use steps::{Direction, NavigationContext, NavigationTarget, NavigationType};
pub use sub_steps::{NavigationAvailability, SubStepCursor, SubStepPlan};
