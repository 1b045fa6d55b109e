/// Caller-side sub-step bookkeeping
///
/// Some steps are split into sub-steps. The state machine never sees them:
/// relative requests are first resolved here, and only requests that leave the
/// current step reach `navigate_to_step`.

use serde::Serialize;
use std::collections::BTreeMap;

use super::steps::NavigationTarget;
use crate::config::WizardConfig;

/// What a request means once sub-steps are taken into account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubStepPlan {
    /// Stay on the step and move to another sub-step
    Within { sub_step: u32 },

    /// Ask the state machine for `target`; on acceptance land on `landing_sub_step`
    Step {
        target: NavigationTarget,
        landing_sub_step: u32,
    },
}

/// Current sub-step plus the per-step sub-step counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubStepCursor {
    counts: BTreeMap<u32, u32>,
    current: u32,
}

impl SubStepCursor {
    pub fn new(counts: BTreeMap<u32, u32>) -> Self {
        Self { counts, current: 0 }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.sub_steps.clone())
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn set(&mut self, sub_step: u32) {
        self.current = sub_step;
    }

    /// Number of sub-steps of `step` (0 when it has none)
    pub fn count_for(&self, step: u32) -> u32 {
        self.counts.get(&step).copied().unwrap_or(0)
    }

    /// Index of the last sub-step of `step`
    pub fn last_of(&self, step: u32) -> u32 {
        self.count_for(step).saturating_sub(1)
    }

    /// Resolve `target` requested while on `step`.
    pub fn plan(&self, step: u32, target: NavigationTarget) -> SubStepPlan {
        match target {
            NavigationTarget::Next if self.current + 1 < self.count_for(step) => {
                SubStepPlan::Within {
                    sub_step: self.current + 1,
                }
            }
            NavigationTarget::Next => SubStepPlan::Step {
                target,
                landing_sub_step: 0,
            },
            NavigationTarget::Prev if self.current > 0 => SubStepPlan::Within {
                sub_step: self.current - 1,
            },
            NavigationTarget::Prev => SubStepPlan::Step {
                target,
                landing_sub_step: self.last_of(step.saturating_sub(1)),
            },
            NavigationTarget::Step(_) => SubStepPlan::Step {
                target,
                landing_sub_step: 0,
            },
        }
    }

    /// Button availability for `step` of `total_steps`
    pub fn availability(
        &self,
        step: u32,
        total_steps: u32,
        animating: bool,
    ) -> NavigationAvailability {
        let count = self.count_for(step);
        NavigationAvailability {
            can_go_prev: step > 1 || self.current > 0,
            has_next: step < total_steps || self.current + 1 < count,
            animating,
        }
    }
}

/// Which navigation buttons a host should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationAvailability {
    pub can_go_prev: bool,
    pub has_next: bool,
    pub animating: bool,
}

impl NavigationAvailability {
    pub fn prev_enabled(&self) -> bool {
        self.can_go_prev && !self.animating
    }

    pub fn next_enabled(&self) -> bool {
        self.has_next && !self.animating
    }
}
