/// Session scripts
///
/// A session script is a JSON recording of host input (pointer events, key
/// presses, navigation requests and clock advances) that can be replayed
/// against a wizard driven by a virtual clock.
///
/// ```json
/// {
///   "blocked_steps": [2],
///   "entries": [
///     { "pointer": { "event": "touchstart", "x": 300, "y": 120 } },
///     { "pointer": { "event": "touchmove", "x": 180, "y": 125 } },
///     { "pointer": { "event": "touchend", "x": 180, "y": 125 } },
///     { "advance_ms": 400 },
///     { "navigate": 1 },
///     { "key": "ArrowRight" },
///     { "reconfigure": 3 },
///     "teardown"
///   ]
/// }
/// ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::clock::VirtualClock;
use crate::controller::CardStackWizard;
use crate::error::ScriptError;
use crate::gesture::{ElementPath, EventTarget, NavigationKey, PointerEvent, PointerKind};
use crate::wizard::{Direction, NavigationContext, NavigationGuard, NavigationTarget};

/// One recorded pointer event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointerInput {
    /// DOM event name, e.g. `touchstart` or `mouseup`
    pub event: String,
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Ancestry of the event target, innermost first
    #[serde(default)]
    pub target: Option<ElementPath>,
}

impl PointerInput {
    pub fn kind(&self) -> PointerKind {
        if self.event.starts_with("touch") {
            PointerKind::Touch
        } else {
            PointerKind::Mouse
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEntry {
    Navigate(NavigationTarget),
    Pointer(PointerInput),
    Key(NavigationKey),
    AdvanceMs(u64),
    Reconfigure(u32),
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionScript {
    /// Steps that may not be left forwards
    #[serde(default)]
    pub blocked_steps: BTreeSet<u32>,
    pub entries: Vec<ScriptEntry>,
}

impl SessionScript {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ScriptError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Self::parse(json, "<inline>")
    }

    fn parse(json: &str, origin: &str) -> Result<Self, ScriptError> {
        let script: SessionScript =
            serde_json::from_str(json).map_err(|source| ScriptError::ParseFailed {
                path: origin.to_string(),
                source,
            })?;
        if script.entries.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(script)
    }

    /// Guard implementing `blocked_steps`
    pub fn guard(&self) -> BlockedSteps {
        BlockedSteps::new(self.blocked_steps.clone())
    }
}

/// Demo guard: forbids moving forward out of the listed steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockedSteps {
    steps: BTreeSet<u32>,
}

impl BlockedSteps {
    pub fn new(steps: BTreeSet<u32>) -> Self {
        Self { steps }
    }
}

impl NavigationGuard for BlockedSteps {
    fn can_navigate(&mut self, ctx: &NavigationContext) -> bool {
        if ctx.direction == Direction::Forward && self.steps.contains(&ctx.current_step) {
            tracing::warn!(
                "Step {} must be completed before moving on to step {}",
                ctx.current_step,
                ctx.target_step
            );
            return false;
        }
        true
    }
}

/// Apply `entries` in order, ticking the wizard after each one.
pub fn replay(wizard: &mut CardStackWizard, clock: &VirtualClock, entries: &[ScriptEntry]) {
    for (index, entry) in entries.iter().enumerate() {
        tracing::debug!("Replaying entry {}: {:?}", index, entry);
        match entry {
            ScriptEntry::Navigate(target) => {
                let outcome = wizard.navigate(*target);
                tracing::info!("navigate {} -> {:?}", target, outcome);
            }
            ScriptEntry::Pointer(input) => {
                let mut event = PointerEvent::new(input.kind(), input.x, input.y);
                if let Some(path) = input.target.as_ref() {
                    event = event.with_target(path as &dyn EventTarget);
                }
                if let Some(outcome) = wizard.handle_dom_event(&input.event, &mut event) {
                    tracing::info!("{} -> {:?}", input.event, outcome);
                }
            }
            ScriptEntry::Key(key) => {
                if let Some(outcome) = wizard.handle_key(*key, None) {
                    tracing::info!("{:?} -> {:?}", key, outcome);
                }
            }
            ScriptEntry::AdvanceMs(ms) => clock.advance_ms(*ms),
            ScriptEntry::Reconfigure(total_steps) => wizard.reconfigure(*total_steps),
            ScriptEntry::Teardown => wizard.teardown(),
        }
        wizard.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WizardConfig;
    use crate::wizard::NavigationType;

    const SCRIPT: &str = r#"{
        "blocked_steps": [3],
        "entries": [
            { "pointer": { "event": "touchstart", "x": 300, "y": 120 } },
            { "pointer": { "event": "touchmove", "x": 180, "y": 125 } },
            { "pointer": { "event": "touchend", "x": 180, "y": 125 } },
            { "advance_ms": 400 },
            { "navigate": "next" },
            { "advance_ms": 400 },
            { "key": "ArrowRight" },
            { "advance_ms": 400 }
        ]
    }"#;

    #[test]
    fn test_parse_script() {
        let script = SessionScript::from_json_str(SCRIPT).unwrap();
        assert_eq!(script.entries.len(), 8);
        assert_eq!(script.entries[4], ScriptEntry::Navigate(NavigationTarget::Next));
        assert_eq!(script.entries[6], ScriptEntry::Key(NavigationKey::ArrowRight));

        let script = SessionScript::from_json_str(
            r#"{ "entries": [ { "navigate": 4 }, { "reconfigure": 2 }, "teardown" ] }"#,
        )
        .unwrap();
        assert_eq!(
            script.entries,
            vec![
                ScriptEntry::Navigate(NavigationTarget::Step(4)),
                ScriptEntry::Reconfigure(2),
                ScriptEntry::Teardown,
            ]
        );
        assert!(script.blocked_steps.is_empty());
    }

    #[test]
    fn test_empty_script_rejected() {
        assert!(matches!(
            SessionScript::from_json_str(r#"{ "entries": [] }"#),
            Err(ScriptError::Empty)
        ));
        assert!(matches!(
            SessionScript::from_json_str("{"),
            Err(ScriptError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SessionScript::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScriptError::ReadFailed { .. }));
    }

    #[test]
    fn test_blocked_steps_only_block_forward() {
        let mut guard = BlockedSteps::new(BTreeSet::from([2]));
        let mut ctx = NavigationContext {
            current_step: 2,
            target_step: 3,
            direction: Direction::Forward,
            nav_type: NavigationType::Step,
            sub_step: None,
        };
        assert!(!guard.can_navigate(&ctx));

        ctx.target_step = 1;
        ctx.direction = Direction::Backward;
        assert!(guard.can_navigate(&ctx));
    }

    #[test]
    fn test_replay_stops_at_blocked_step() {
        let script = SessionScript::from_json_str(SCRIPT).unwrap();
        let clock = VirtualClock::new();
        let mut wizard = CardStackWizard::with_clock(
            &WizardConfig::with_steps(5),
            script.guard(),
            clock.clone(),
        );

        replay(&mut wizard, &clock, &script.entries);

        assert_eq!(wizard.current_step(), 3);
        assert!(!wizard.is_animating());
    }

    #[test]
    fn test_pointer_kind_from_event_name() {
        let input = PointerInput {
            event: "mousedown".to_string(),
            x: 0.0,
            y: 0.0,
            target: None,
        };
        assert_eq!(input.kind(), PointerKind::Mouse);
    }
}
