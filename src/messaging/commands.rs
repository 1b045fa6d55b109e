/// Wizard commands
///
/// Commands are requests (imperative) that may be queued from any thread and
/// are applied by the wizard on its own thread.
use serde::{Deserialize, Serialize};

use crate::wizard::NavigationTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Go forward one sub-step or step
    Next,

    /// Go back one sub-step or step
    Prev,

    /// Jump directly to a step (clamped into range)
    JumpTo(i64),

    /// Change the number of steps
    Reconfigure { total_steps: u32 },

    /// Cancel pending work and release listeners
    Teardown,
}

impl Command {
    /// Navigation request carried by the command, if any
    pub fn target(&self) -> Option<NavigationTarget> {
        match self {
            Command::Next => Some(NavigationTarget::Next),
            Command::Prev => Some(NavigationTarget::Prev),
            Command::JumpTo(step) => Some(NavigationTarget::Step(*step)),
            Command::Reconfigure { .. } | Command::Teardown => None,
        }
    }

    /// Get a human-readable description of the command
    pub fn description(&self) -> String {
        match self {
            Command::Next => "Next".to_string(),
            Command::Prev => "Previous".to_string(),
            Command::JumpTo(step) => format!("Jump to step {}", step),
            Command::Reconfigure { total_steps } => {
                format!("Reconfigure to {} steps", total_steps)
            }
            Command::Teardown => "Tear down".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_description() {
        assert_eq!(Command::Next.description(), "Next");
        assert_eq!(Command::JumpTo(4).description(), "Jump to step 4");
        assert_eq!(
            Command::Reconfigure { total_steps: 3 }.description(),
            "Reconfigure to 3 steps"
        );
    }

    #[test]
    fn test_command_targets() {
        assert_eq!(Command::Prev.target(), Some(NavigationTarget::Prev));
        assert_eq!(Command::JumpTo(-2).target(), Some(NavigationTarget::Step(-2)));
        assert_eq!(Command::Teardown.target(), None);
    }
}
