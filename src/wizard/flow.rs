/// Navigation state machine
///
/// Owns the current step and the animation sub-state. Every transition is
/// checked against an injected guard before anything changes.
///
/// ```text
/// Idle --(next, guard ok, steps remain)--> FlyOut  --(timer)--> Idle (step + 1)
/// Idle --(prev, guard ok, step > 1)------> SlideIn --(timer)--> Idle (step - 1)
/// Idle --(absolute, guard ok)------------> Idle (step = target)
/// Idle --(guard rejects)-----------------> Idle (unchanged)
/// FlyOut | SlideIn --(any request)-------> ignored
/// ```

use std::time::Duration;

use super::guard::NavigationGuard;
use super::state::{AnimationPhase, PendingCommit, TransitionState};
use super::steps::{Direction, NavigationContext, NavigationTarget, NavigationType};
use crate::clock::{Clock, DeferredAction, SystemClock};
use crate::config::WizardConfig;

/// Why a request left the state untouched without consulting the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A transition is already in flight
    Locked,

    /// `next` on the last step or `prev` on the first
    AtBoundary,

    /// Absolute target equals the current step after clamping
    AlreadyThere,
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Absolute jump applied immediately
    Committed { from: u32, to: u32 },

    /// Animated transition started; the step changes when the timer fires
    Started {
        phase: AnimationPhase,
        animating_card: u32,
        target_step: u32,
    },

    /// The guard rejected the transition
    Vetoed(NavigationContext),

    /// Nothing to do
    Ignored(IgnoreReason),
}

impl NavigationOutcome {
    /// Whether the request changed (or will change) the current step
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Committed { .. } | NavigationOutcome::Started { .. }
        )
    }
}

/// A step change applied by the animation timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCommit {
    pub from: u32,
    pub to: u32,
    pub phase: AnimationPhase,
}

impl StepCommit {
    /// False when a reconfiguration already moved the step to the target
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Step navigation engine for one wizard instance
pub struct NavigationStateMachine {
    current_step: u32,
    total_steps: u32,
    animation_duration: Duration,
    transition: TransitionState,
    timer: DeferredAction<(PendingCommit, AnimationPhase)>,
    guard: Box<dyn NavigationGuard>,
    clock: Box<dyn Clock>,
}

impl NavigationStateMachine {
    /// Create a state machine on step 1 using the system clock
    pub fn new(config: &WizardConfig, guard: impl NavigationGuard + 'static) -> Self {
        Self::with_clock(config, guard, SystemClock::new())
    }

    /// Create a state machine driven by `clock`
    pub fn with_clock(
        config: &WizardConfig,
        guard: impl NavigationGuard + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let config = config.clone().normalized();
        Self {
            current_step: 1,
            total_steps: config.total_steps,
            animation_duration: config.animation_duration(),
            transition: TransitionState::idle(),
            timer: DeferredAction::new(),
            guard: Box::new(guard),
            clock: Box::new(clock),
        }
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    pub fn phase(&self) -> AnimationPhase {
        self.transition.phase()
    }

    pub fn animating_card(&self) -> Option<u32> {
        self.transition.animating_card()
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_animating()
    }

    pub fn is_first(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_step == self.total_steps
    }

    /// Replace the guard consulted on future requests
    pub fn set_guard(&mut self, guard: impl NavigationGuard + 'static) {
        self.guard = Box::new(guard);
    }

    /// Request a transition.
    pub fn navigate_to_step(&mut self, target: NavigationTarget) -> NavigationOutcome {
        self.navigate_with_sub_step(target, None)
    }

    /// Request a transition, passing the caller's sub-step through to the guard.
    pub fn navigate_with_sub_step(
        &mut self,
        target: NavigationTarget,
        sub_step: Option<u32>,
    ) -> NavigationOutcome {
        // A completion that is already due fires before the new request.
        self.tick();

        if self.is_animating() {
            tracing::trace!("Ignoring {} request: transition in flight", target);
            return NavigationOutcome::Ignored(IgnoreReason::Locked);
        }

        match target {
            NavigationTarget::Step(step) => self.jump_to(step, sub_step),
            NavigationTarget::Next => self.step_forward(sub_step),
            NavigationTarget::Prev => self.step_backward(sub_step),
        }
    }

    fn jump_to(&mut self, step: i64, sub_step: Option<u32>) -> NavigationOutcome {
        let clamped = step.clamp(1, i64::from(self.total_steps)) as u32;
        if clamped == self.current_step {
            return NavigationOutcome::Ignored(IgnoreReason::AlreadyThere);
        }

        let ctx = self.context(clamped, NavigationType::Direct, sub_step);
        if !self.guard.can_navigate(&ctx) {
            tracing::debug!("Guard vetoed direct jump {} -> {}", ctx.current_step, clamped);
            return NavigationOutcome::Vetoed(ctx);
        }

        let from = self.current_step;
        self.cancel_transition();
        self.current_step = clamped;
        tracing::debug!("Jumped from step {} to {}", from, clamped);
        NavigationOutcome::Committed { from, to: clamped }
    }

    fn step_forward(&mut self, sub_step: Option<u32>) -> NavigationOutcome {
        if self.current_step >= self.total_steps {
            return NavigationOutcome::Ignored(IgnoreReason::AtBoundary);
        }

        let target_step = self.current_step + 1;
        let ctx = self.context(target_step, NavigationType::Step, sub_step);
        if !self.guard.can_navigate(&ctx) {
            tracing::debug!("Guard vetoed next from step {}", self.current_step);
            return NavigationOutcome::Vetoed(ctx);
        }

        let card = self.current_step;
        self.begin(AnimationPhase::FlyOut, card, PendingCommit::Advance);
        NavigationOutcome::Started {
            phase: AnimationPhase::FlyOut,
            animating_card: card,
            target_step,
        }
    }

    fn step_backward(&mut self, sub_step: Option<u32>) -> NavigationOutcome {
        if self.current_step <= 1 {
            return NavigationOutcome::Ignored(IgnoreReason::AtBoundary);
        }

        let target_step = self.current_step - 1;
        let ctx = self.context(target_step, NavigationType::Step, sub_step);
        if !self.guard.can_navigate(&ctx) {
            tracing::debug!("Guard vetoed prev from step {}", self.current_step);
            return NavigationOutcome::Vetoed(ctx);
        }

        self.begin(AnimationPhase::SlideIn, target_step, PendingCommit::Retreat);
        NavigationOutcome::Started {
            phase: AnimationPhase::SlideIn,
            animating_card: target_step,
            target_step,
        }
    }

    fn context(
        &self,
        target_step: u32,
        nav_type: NavigationType,
        sub_step: Option<u32>,
    ) -> NavigationContext {
        NavigationContext {
            current_step: self.current_step,
            target_step,
            direction: Direction::between(self.current_step, target_step),
            nav_type,
            sub_step,
        }
    }

    fn begin(&mut self, phase: AnimationPhase, card: u32, commit: PendingCommit) {
        self.transition.begin(phase, card);
        let id = self
            .timer
            .schedule(self.clock.now(), self.animation_duration, (commit, phase));
        tracing::debug!(
            "Started {} of card {} ({}, {:?})",
            phase,
            card,
            id,
            self.animation_duration
        );
    }

    /// Apply the pending completion if its timer has elapsed.
    ///
    /// Hosts call this from their event loop; it is cheap when nothing is due.
    pub fn tick(&mut self) -> Option<StepCommit> {
        let (commit, phase) = self.timer.take_due(self.clock.now())?;
        let from = self.current_step;
        self.current_step = match commit {
            PendingCommit::Advance => (self.current_step + 1).min(self.total_steps),
            PendingCommit::Retreat => self.current_step.saturating_sub(1).max(1),
        };
        self.transition.reset();
        tracing::debug!("Committed step {} -> {} after {}", from, self.current_step, phase);
        Some(StepCommit {
            from,
            to: self.current_step,
            phase,
        })
    }

    /// Time left before the in-flight transition commits
    pub fn remaining(&self) -> Option<Duration> {
        self.timer.remaining(self.clock.now())
    }

    /// Change the step count. The current step is clamped into the new
    /// range without consulting the guard or animating.
    ///
    /// Returns the step it was clamped from, if clamping was needed.
    pub fn set_total_steps(&mut self, total_steps: u32) -> Option<u32> {
        let total_steps = total_steps.max(1);
        self.total_steps = total_steps;

        if self.current_step > total_steps {
            let from = self.current_step;
            self.current_step = total_steps;
            tracing::debug!("Clamped step {} -> {} after reconfiguration", from, total_steps);
            Some(from)
        } else {
            None
        }
    }

    /// Cancel any in-flight transition without committing it.
    ///
    /// Returns true if a pending completion was discarded.
    pub fn teardown(&mut self) -> bool {
        self.cancel_transition()
    }

    fn cancel_transition(&mut self) -> bool {
        let cancelled = self.timer.cancel().is_some();
        self.transition.reset();
        cancelled
    }
}

impl Drop for NavigationStateMachine {
    fn drop(&mut self) {
        if self.cancel_transition() {
            tracing::debug!("Cancelled pending transition on teardown");
        }
    }
}

impl std::fmt::Debug for NavigationStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationStateMachine")
            .field("current_step", &self.current_step)
            .field("total_steps", &self.total_steps)
            .field("transition", &self.transition)
            .field("timer_pending", &self.timer.is_pending())
            .finish()
    }
}
