/// Navigation vocabulary
///
/// Targets accepted by `navigate_to_step` and the context handed to guards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TargetParseError;

/// Requested destination of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TargetRepr", into = "TargetRepr")]
pub enum NavigationTarget {
    /// The following step, animated as a fly-out
    Next,

    /// The preceding step, animated as a slide-in
    Prev,

    /// An absolute step number, clamped into range and committed without animation
    Step(i64),
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::Next => write!(f, "next"),
            NavigationTarget::Prev => write!(f, "prev"),
            NavigationTarget::Step(step) => write!(f, "{}", step),
        }
    }
}

impl FromStr for NavigationTarget {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TargetParseError::Empty);
        }
        match s {
            "next" => Ok(NavigationTarget::Next),
            "prev" => Ok(NavigationTarget::Prev),
            other => other
                .parse::<i64>()
                .map(NavigationTarget::Step)
                .map_err(|_| TargetParseError::Unknown(other.to_string())),
        }
    }
}

/// Wire form: either a keyword string or a step number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Number(i64),
    Keyword(String),
}

impl TryFrom<TargetRepr> for NavigationTarget {
    type Error = TargetParseError;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Number(step) => Ok(NavigationTarget::Step(step)),
            TargetRepr::Keyword(keyword) => keyword.parse(),
        }
    }
}

impl From<NavigationTarget> for TargetRepr {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Step(step) => TargetRepr::Number(step),
            other => TargetRepr::Keyword(other.to_string()),
        }
    }
}

/// Direction of a proposed transition relative to the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
    None,
}

impl Direction {
    pub fn between(current: u32, target: u32) -> Self {
        match target.cmp(&current) {
            std::cmp::Ordering::Greater => Direction::Forward,
            std::cmp::Ordering::Less => Direction::Backward,
            std::cmp::Ordering::Equal => Direction::None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
            Direction::None => write!(f, "none"),
        }
    }
}

/// How the transition was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
    /// Absolute jump (category navigation)
    Direct,

    /// Adjacent next/prev (buttons, swipes, arrow keys)
    Step,
}

impl fmt::Display for NavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationType::Direct => write!(f, "direct"),
            NavigationType::Step => write!(f, "step"),
        }
    }
}

/// Everything a guard knows about a proposed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    pub current_step: u32,
    pub target_step: u32,
    pub direction: Direction,
    #[serde(rename = "type")]
    pub nav_type: NavigationType,

    /// Caller-owned sub-step at the time of the request, when the caller tracks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_step: Option<u32>,
}
