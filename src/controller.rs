/// Card stack wizard controller
///
/// Wires the pieces together for one wizard instance:
///
/// ```text
/// pointer / key ──> GestureRecognizer ──> SubStepCursor ──> NavigationStateMachine
///                                                                   │
///                        EventBus <── CardStackWizard <─────────────┘
///                                           │
///                                           └──> CardStackRenderer / ListenerBinding
/// ```
///
/// Everything runs on the host's UI thread. Other threads talk to the wizard
/// through the command queue.

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::config::WizardConfig;
use crate::gesture::{
    key_navigation, EventTarget, GestureRecognizer, NavigationKey, PointerEvent, StartRejection,
};
use crate::messaging::{Command, EventBus, StepChangeCause, WizardEvent};
use crate::render::{
    handler_for, BindingChange, CardRender, CardStackRenderer, InputHandler, ListenerBinding,
    RenderInput,
};
use crate::wizard::{
    AnimationPhase, IgnoreReason, NavigationAvailability, NavigationGuard, NavigationOutcome,
    NavigationStateMachine, NavigationTarget, StepCommit, SubStepCursor, SubStepPlan,
};

/// Result of a navigation request once sub-steps are considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Moved within the current step
    SubStep(u32),

    /// Forwarded to the state machine
    Step(NavigationOutcome),
}

impl RequestOutcome {
    pub fn is_accepted(&self) -> bool {
        match self {
            RequestOutcome::SubStep(_) => true,
            RequestOutcome::Step(outcome) => outcome.is_accepted(),
        }
    }
}

/// Point-in-time view of the wizard for hosts and tooling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardSnapshot {
    pub current_step: u32,
    pub total_steps: u32,
    pub sub_step: u32,
    pub phase: AnimationPhase,
    pub drag_offset: f64,
    pub availability: NavigationAvailability,
    pub cards: Vec<CardRender>,
}

pub struct CardStackWizard {
    machine: NavigationStateMachine,
    recognizer: GestureRecognizer,
    renderer: CardStackRenderer,
    binding: ListenerBinding,
    sub_steps: SubStepCursor,
    bus: EventBus,
    command_tx: Sender<Command>,
    command_rx: Receiver<Command>,
    torn_down: bool,
}

impl CardStackWizard {
    pub fn new(config: &WizardConfig, guard: impl NavigationGuard + 'static) -> Self {
        Self::with_clock(config, guard, SystemClock::new())
    }

    pub fn with_clock(
        config: &WizardConfig,
        guard: impl NavigationGuard + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        let config = config.clone().normalized();
        let (command_tx, command_rx) = unbounded();
        tracing::info!(
            "Card stack wizard created with {} steps ({:?} transitions)",
            config.total_steps,
            config.animation_duration()
        );

        Self {
            machine: NavigationStateMachine::with_clock(&config, guard, clock),
            recognizer: GestureRecognizer::new(config.gesture),
            renderer: CardStackRenderer::from_config(&config),
            binding: ListenerBinding::new(),
            sub_steps: SubStepCursor::from_config(&config),
            bus: EventBus::new(),
            command_tx,
            command_rx,
            torn_down: false,
        }
    }

    pub fn machine(&self) -> &NavigationStateMachine {
        &self.machine
    }

    pub fn current_step(&self) -> u32 {
        self.machine.current_step()
    }

    pub fn sub_step(&self) -> u32 {
        self.sub_steps.current()
    }

    pub fn is_animating(&self) -> bool {
        self.machine.is_animating()
    }

    pub fn drag_offset(&self) -> f64 {
        self.recognizer.drag_offset()
    }

    pub fn bound_step(&self) -> Option<u32> {
        self.binding.bound_step()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    /// Sender for queuing commands from other threads
    pub fn command_sender(&self) -> Sender<Command> {
        self.command_tx.clone()
    }

    pub fn set_guard(&mut self, guard: impl NavigationGuard + 'static) {
        self.machine.set_guard(guard);
    }

    /// Request navigation, resolving sub-steps first.
    pub fn navigate(&mut self, target: NavigationTarget) -> RequestOutcome {
        if self.torn_down {
            return RequestOutcome::Step(NavigationOutcome::Ignored(IgnoreReason::Locked));
        }

        self.tick();
        if self.machine.is_animating() {
            return RequestOutcome::Step(NavigationOutcome::Ignored(IgnoreReason::Locked));
        }

        let step = self.machine.current_step();
        match self.sub_steps.plan(step, target) {
            SubStepPlan::Within { sub_step } => {
                self.sub_steps.set(sub_step);
                self.bus.publish(WizardEvent::SubStepChanged { step, sub_step });
                RequestOutcome::SubStep(sub_step)
            }
            SubStepPlan::Step {
                target,
                landing_sub_step,
            } => {
                let outcome = self
                    .machine
                    .navigate_with_sub_step(target, Some(self.sub_steps.current()));
                self.apply_outcome(&outcome, landing_sub_step);
                RequestOutcome::Step(outcome)
            }
        }
    }

    fn apply_outcome(&mut self, outcome: &NavigationOutcome, landing_sub_step: u32) {
        match *outcome {
            NavigationOutcome::Committed { from, to } => {
                self.land_on(to, landing_sub_step);
                self.recognizer.reset();
                self.bus.publish(WizardEvent::StepChanged {
                    from,
                    to,
                    cause: StepChangeCause::Jump,
                });
            }
            NavigationOutcome::Started {
                phase,
                animating_card,
                target_step,
            } => {
                self.land_on(target_step, landing_sub_step);
                self.recognizer.reset();
                self.bus.publish(WizardEvent::TransitionStarted {
                    phase,
                    animating_card,
                    target_step,
                });
            }
            NavigationOutcome::Vetoed(context) => {
                self.bus.publish(WizardEvent::NavigationVetoed { context });
            }
            NavigationOutcome::Ignored(reason) => {
                tracing::trace!("Navigation ignored: {:?}", reason);
            }
        }
        self.sync_input();
    }

    fn land_on(&mut self, step: u32, sub_step: u32) {
        if self.sub_steps.current() != sub_step {
            self.bus.publish(WizardEvent::SubStepChanged { step, sub_step });
        }
        self.sub_steps.set(sub_step);
    }

    /// Feed one pointer event to the recognizer.
    ///
    /// Returns the navigation outcome when the event completed a swipe.
    pub fn handle_input(
        &mut self,
        handler: InputHandler,
        event: &mut PointerEvent<'_>,
    ) -> Option<RequestOutcome> {
        if self.torn_down {
            return None;
        }
        self.tick();

        match handler {
            InputHandler::Start => {
                if let Err(StartRejection::Suppressed(class)) = self.recognizer.start(event) {
                    self.bus.publish(WizardEvent::GestureSuppressed { class });
                }
                None
            }
            InputHandler::Move => {
                self.recognizer.move_to(event);
                None
            }
            InputHandler::End => {
                let swipe = self.recognizer.end()?;
                self.bus.publish(WizardEvent::SwipeRecognized { swipe });
                Some(self.navigate(swipe.target()))
            }
            InputHandler::Leave => {
                self.recognizer.cancel();
                None
            }
        }
    }

    /// Dispatch by DOM event name (`touchstart`, `mouseup`, ...)
    pub fn handle_dom_event(
        &mut self,
        name: &str,
        event: &mut PointerEvent<'_>,
    ) -> Option<RequestOutcome> {
        let handler = handler_for(name)?;
        self.handle_input(handler, event)
    }

    /// Arrow-key navigation
    pub fn handle_key(
        &mut self,
        key: NavigationKey,
        target: Option<&dyn EventTarget>,
    ) -> Option<RequestOutcome> {
        if self.torn_down {
            return None;
        }
        self.tick();
        let nav = key_navigation(key, target, self.machine.is_animating())?;
        Some(self.navigate(nav))
    }

    /// Apply a finished animation, if any, and bring input wiring up to date.
    pub fn tick(&mut self) -> Option<StepCommit> {
        if self.torn_down {
            return None;
        }

        let commit = self.machine.tick();
        if let Some(commit) = commit {
            self.recognizer.reset();
        }
        if let Some(commit) = commit.filter(StepCommit::moved) {
            self.bus.publish(WizardEvent::StepChanged {
                from: commit.from,
                to: commit.to,
                cause: StepChangeCause::Animation(commit.phase),
            });
        }
        self.sync_input();
        commit
    }

    fn sync_input(&mut self) {
        self.recognizer.set_disabled(self.machine.is_animating());
        let changes = self
            .binding
            .sync(self.machine.current_step(), self.machine.animating_card());
        if !changes.is_empty() {
            self.bus.publish(WizardEvent::ListenersRebound { changes });
        }
    }

    /// Apply every queued command. Returns how many were applied.
    pub fn process_commands(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.command_rx.try_recv() {
            tracing::debug!("Processing command: {}", command.description());
            match command {
                Command::Reconfigure { total_steps } => self.reconfigure(total_steps),
                Command::Teardown => self.teardown(),
                _ => {
                    if let Some(target) = command.target() {
                        self.navigate(target);
                    }
                }
            }
            applied += 1;
        }
        applied
    }

    /// Change the step count, clamping the current step if needed.
    pub fn reconfigure(&mut self, total_steps: u32) {
        if self.torn_down {
            return;
        }

        if let Some(from) = self.machine.set_total_steps(total_steps) {
            let to = self.machine.current_step();
            self.land_on(to, 0);
            self.recognizer.reset();
            self.bus.publish(WizardEvent::StepChanged {
                from,
                to,
                cause: StepChangeCause::Reconfigured,
            });
        }
        self.sync_input();
    }

    /// Cancel pending work and release the input listeners. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        if self.machine.teardown() {
            tracing::debug!("Discarded in-flight transition on teardown");
        }
        self.recognizer.reset();
        if let Some(change) = self.binding.unbind() {
            self.bus.publish(WizardEvent::ListenersRebound {
                changes: vec![change],
            });
        }
        self.bus.publish(WizardEvent::TornDown);
        tracing::info!("Card stack wizard torn down on step {}", self.machine.current_step());
    }

    pub fn availability(&self) -> NavigationAvailability {
        self.sub_steps.availability(
            self.machine.current_step(),
            self.machine.total_steps(),
            self.machine.is_animating(),
        )
    }

    /// Render descriptors for the mounted cards
    pub fn frame(&self) -> Vec<CardRender> {
        self.renderer.render(&RenderInput {
            total_steps: self.machine.total_steps(),
            current_step: self.machine.current_step(),
            animating_card: self.machine.animating_card(),
            phase: self.machine.phase(),
            drag_offset: self.recognizer.drag_offset(),
        })
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            current_step: self.machine.current_step(),
            total_steps: self.machine.total_steps(),
            sub_step: self.sub_steps.current(),
            phase: self.machine.phase(),
            drag_offset: self.recognizer.drag_offset(),
            availability: self.availability(),
            cards: self.frame(),
        }
    }

    /// Listener changes the host has not applied yet, without publishing
    pub fn pending_listener_changes(&self) -> Vec<BindingChange> {
        let mut preview = self.binding.clone();
        if self.torn_down {
            return preview.unbind().into_iter().collect();
        }
        preview.sync(self.machine.current_step(), self.machine.animating_card())
    }
}

impl std::fmt::Debug for CardStackWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardStackWizard")
            .field("machine", &self.machine)
            .field("sub_step", &self.sub_steps.current())
            .field("bound_step", &self.binding.bound_step())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
