// Integration tests for Swipe Wizard
// These tests drive the public API the way a host UI would

use std::cell::RefCell;
use std::rc::Rc;

use swipe_wizard::clock::VirtualClock;
use swipe_wizard::gesture::{ElementNode, ElementPath, NavigationKey};
use swipe_wizard::messaging::StepChangeCause;
use swipe_wizard::render::{BindingChange, CardRole, InputHandler};
use swipe_wizard::script::{self, SessionScript};
use swipe_wizard::wizard::{AnimationPhase, DenyAll, Direction, NavigationType};
use swipe_wizard::{
    AllowAll, CardStackWizard, Command, NavigationContext, NavigationOutcome,
    NavigationStateMachine, NavigationTarget, PointerEvent, RequestOutcome, WizardConfig,
    WizardEvent,
};

/// Helper to build a machine whose guard records every context it sees
fn recording_machine(
    total_steps: u32,
    clock: &VirtualClock,
) -> (NavigationStateMachine, Rc<RefCell<Vec<NavigationContext>>>) {
    let seen: Rc<RefCell<Vec<NavigationContext>>> = Rc::default();
    let log = Rc::clone(&seen);
    let config = WizardConfig {
        animation_duration_ms: 400,
        ..WizardConfig::with_steps(total_steps)
    };
    let machine = NavigationStateMachine::with_clock(
        &config,
        move |ctx: &NavigationContext| {
            log.borrow_mut().push(*ctx);
            true
        },
        clock.clone(),
    );
    (machine, seen)
}

#[test]
fn test_next_then_direct_jump_scenario() {
    let clock = VirtualClock::new();
    let (mut machine, seen) = recording_machine(3, &clock);

    let outcome = machine.navigate_to_step(NavigationTarget::Next);
    assert!(matches!(outcome, NavigationOutcome::Started { .. }));
    assert!(machine.is_animating());
    assert_eq!(machine.animating_card(), Some(1));
    assert_eq!(machine.current_step(), 1);

    clock.advance_ms(399);
    machine.tick();
    assert!(machine.is_animating());

    clock.advance_ms(1);
    machine.tick();
    assert_eq!(machine.current_step(), 2);
    assert!(!machine.is_animating());

    let outcome = machine.navigate_to_step(NavigationTarget::Step(1));
    assert_eq!(outcome, NavigationOutcome::Committed { from: 2, to: 1 });
    assert_eq!(
        seen.borrow().last(),
        Some(&NavigationContext {
            current_step: 2,
            target_step: 1,
            direction: Direction::Backward,
            nav_type: NavigationType::Direct,
            sub_step: None,
        })
    );
    assert_eq!(machine.current_step(), 1);
    assert_eq!(machine.phase(), AnimationPhase::Idle);
}

#[test]
fn test_boundaries_never_call_guard() {
    let clock = VirtualClock::new();
    let (mut machine, seen) = recording_machine(4, &clock);

    machine.navigate_to_step(NavigationTarget::Prev);
    assert_eq!(machine.current_step(), 1);

    machine.navigate_to_step(NavigationTarget::Step(4));
    let asked = seen.borrow().len();
    machine.navigate_to_step(NavigationTarget::Next);
    assert_eq!(machine.current_step(), 4);
    assert!(!machine.is_animating());
    assert_eq!(seen.borrow().len(), asked);
}

#[test]
fn test_reconfiguration_clamps_without_guard() {
    let clock = VirtualClock::new();
    let (mut machine, seen) = recording_machine(5, &clock);
    machine.navigate_to_step(NavigationTarget::Step(4));
    let asked = seen.borrow().len();

    assert_eq!(machine.set_total_steps(2), Some(4));
    assert_eq!(machine.current_step(), 2);
    assert_eq!(seen.borrow().len(), asked);
}

#[test]
fn test_rejecting_guard_blocks_every_form() {
    let clock = VirtualClock::new();
    let mut machine =
        NavigationStateMachine::with_clock(&WizardConfig::with_steps(5), DenyAll, clock.clone());

    for target in [
        NavigationTarget::Next,
        NavigationTarget::Step(3),
        NavigationTarget::Step(5),
    ] {
        assert!(matches!(
            machine.navigate_to_step(target),
            NavigationOutcome::Vetoed(_)
        ));
        clock.advance_ms(500);
        machine.tick();
        assert_eq!(machine.current_step(), 1);
    }
}

#[test]
fn test_teardown_discards_pending_commit() {
    let clock = VirtualClock::new();
    let (mut machine, _seen) = recording_machine(3, &clock);

    machine.navigate_to_step(NavigationTarget::Next);
    assert!(machine.teardown());
    clock.advance_ms(1_000);
    assert_eq!(machine.tick(), None);
    assert_eq!(machine.current_step(), 1);
}

#[test]
fn test_swipe_on_button_does_not_navigate() {
    let clock = VirtualClock::new();
    let mut wizard = CardStackWizard::with_clock(&WizardConfig::with_steps(3), AllowAll, clock);
    let button = ElementPath::new(vec![
        ElementNode::new("button"),
        ElementNode::new("div").with_class("draggable-card-container"),
    ]);

    let mut start = PointerEvent::touch(300.0, 100.0).with_target(&button);
    assert_eq!(wizard.handle_input(InputHandler::Start, &mut start), None);
    assert!(!start.default_prevented());

    wizard.handle_input(InputHandler::Move, &mut PointerEvent::touch(0.0, 100.0));
    assert_eq!(wizard.drag_offset(), 0.0);
    assert_eq!(
        wizard.handle_input(InputHandler::End, &mut PointerEvent::touch(0.0, 100.0)),
        None
    );
    assert_eq!(wizard.current_step(), 1);
    assert!(!wizard.is_animating());
}

#[test]
fn test_swipe_right_slides_previous_card_in() {
    let clock = VirtualClock::new();
    let mut wizard =
        CardStackWizard::with_clock(&WizardConfig::with_steps(3), AllowAll, clock.clone());
    let (events, _id) = wizard.event_bus().subscribe();
    wizard.navigate(NavigationTarget::Step(3));
    wizard.tick();

    let surface = ElementPath::card_surface();
    let mut start = PointerEvent::mouse(100.0, 50.0).with_target(&surface);
    wizard.handle_dom_event("mousedown", &mut start);
    wizard.handle_dom_event("mousemove", &mut PointerEvent::mouse(400.0, 50.0));
    assert_eq!(wizard.drag_offset(), 50.0);

    let outcome = wizard.handle_dom_event("mouseup", &mut PointerEvent::mouse(400.0, 50.0));
    assert_eq!(
        outcome,
        Some(RequestOutcome::Step(NavigationOutcome::Started {
            phase: AnimationPhase::SlideIn,
            animating_card: 2,
            target_step: 2,
        }))
    );

    let frame = wizard.frame();
    let sliding = frame.iter().find(|c| c.step == 2).unwrap();
    assert_eq!(sliding.role, CardRole::SlidingIn);
    assert!(frame
        .iter()
        .all(|c| c.transform.z_index <= sliding.transform.z_index));
    // The current card keeps its listeners during a slide-in.
    assert_eq!(wizard.bound_step(), Some(3));

    clock.advance_ms(400);
    wizard.tick();
    assert_eq!(wizard.current_step(), 2);
    assert_eq!(wizard.bound_step(), Some(2));

    let received: Vec<WizardEvent> = events.try_iter().collect();
    assert!(received.contains(&WizardEvent::StepChanged {
        from: 3,
        to: 2,
        cause: StepChangeCause::Animation(AnimationPhase::SlideIn),
    }));
    assert!(received.contains(&WizardEvent::ListenersRebound {
        changes: vec![
            BindingChange::Detach { step: 3 },
            BindingChange::Attach { step: 2 }
        ],
    }));
}

#[test]
fn test_keyboard_and_commands_share_the_lock() {
    let clock = VirtualClock::new();
    let mut wizard =
        CardStackWizard::with_clock(&WizardConfig::with_steps(4), AllowAll, clock.clone());

    assert!(wizard
        .handle_key(NavigationKey::ArrowRight, None)
        .is_some_and(|o| o.is_accepted()));

    wizard.command_sender().send(Command::JumpTo(4)).unwrap();
    wizard.process_commands();
    assert_eq!(wizard.current_step(), 1);

    clock.advance_ms(400);
    wizard.tick();
    assert_eq!(wizard.current_step(), 2);

    wizard.command_sender().send(Command::JumpTo(4)).unwrap();
    wizard.process_commands();
    assert_eq!(wizard.current_step(), 4);
}

#[test]
fn test_replayed_session_matches_live_input() {
    let session = SessionScript::from_json_str(
        r#"{
            "blocked_steps": [2],
            "entries": [
                { "pointer": { "event": "touchstart", "x": 320, "y": 200,
                               "target": [ { "tag": "div", "classes": ["draggable-card-container"] } ] } },
                { "pointer": { "event": "touchmove", "x": 200, "y": 210 } },
                { "pointer": { "event": "touchend", "x": 200, "y": 210 } },
                { "advance_ms": 400 },
                { "key": "ArrowRight" },
                { "advance_ms": 400 },
                { "navigate": 4 },
                { "reconfigure": 3 }
            ]
        }"#,
    )
    .unwrap();

    let clock = VirtualClock::new();
    let mut wizard =
        CardStackWizard::with_clock(&WizardConfig::with_steps(5), session.guard(), clock.clone());
    script::replay(&mut wizard, &clock, &session.entries);

    // Step 2 is blocked forwards, including the direct jump to 4.
    let snapshot = wizard.snapshot();
    assert_eq!(snapshot.current_step, 2);
    assert_eq!(snapshot.total_steps, 3);
    assert_eq!(snapshot.phase, AnimationPhase::Idle);
    assert!(snapshot.availability.next_enabled());
}
