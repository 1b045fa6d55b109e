use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TOTAL_STEPS: u32 = 7;
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 400;

fn default_total_steps() -> u32 {
    DEFAULT_TOTAL_STEPS
}

fn default_animation_duration_ms() -> u64 {
    DEFAULT_ANIMATION_DURATION_MS
}

/// Thresholds used by the gesture recognizer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Net horizontal displacement needed at release to count as a swipe
    pub min_swipe_distance: f64,

    /// Largest leftward drag offset published while dragging
    pub max_drag_offset: f64,

    /// Largest rightward drag offset published while dragging
    pub soft_max_right: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: 50.0,
            max_drag_offset: 200.0,
            soft_max_right: 50.0,
        }
    }
}

/// A distance usable as a clamp bound, or the fallback
fn repair_distance(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("gesture.{} was {}, using {}", name, value, fallback);
        fallback
    }
}

impl GestureConfig {
    /// Replace negative or non-finite distances with their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            min_swipe_distance: repair_distance(
                "min_swipe_distance",
                self.min_swipe_distance,
                defaults.min_swipe_distance,
            ),
            max_drag_offset: repair_distance(
                "max_drag_offset",
                self.max_drag_offset,
                defaults.max_drag_offset,
            ),
            soft_max_right: repair_distance(
                "soft_max_right",
                self.soft_max_right,
                defaults.soft_max_right,
            ),
        }
    }
}

/// Visual parameters of the card stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// The next card becomes visible once the drag offset is below this value
    pub next_preview_threshold: f64,

    /// Degrees of rotation per pixel of drag offset on the active card
    pub rotation_factor: f64,

    /// Rotation applied to a card flying out
    pub fly_out_rotation_deg: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            next_preview_threshold: -20.0,
            rotation_factor: 0.1,
            fly_out_rotation_deg: -15.0,
        }
    }
}

impl RenderConfig {
    /// Replace non-finite values with their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let repair = |name: &str, value: f64, fallback: f64| {
            if value.is_finite() {
                value
            } else {
                tracing::warn!("render.{} was {}, using {}", name, value, fallback);
                fallback
            }
        };
        Self {
            next_preview_threshold: repair(
                "next_preview_threshold",
                self.next_preview_threshold,
                defaults.next_preview_threshold,
            ),
            rotation_factor: repair(
                "rotation_factor",
                self.rotation_factor,
                defaults.rotation_factor,
            ),
            fly_out_rotation_deg: repair(
                "fly_out_rotation_deg",
                self.fly_out_rotation_deg,
                defaults.fly_out_rotation_deg,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Number of steps in the wizard (1-indexed, at least 1)
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,

    /// How long a fly-out or slide-in transition keeps navigation locked
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: u64,

    #[serde(default)]
    pub gesture: GestureConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Sub-step count per step; steps not listed have no sub-steps
    #[serde(default)]
    pub sub_steps: BTreeMap<u32, u32>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            total_steps: DEFAULT_TOTAL_STEPS,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            gesture: GestureConfig::default(),
            render: RenderConfig::default(),
            sub_steps: BTreeMap::new(),
        }
    }
}

impl WizardConfig {
    /// Configuration with the given step count and defaults elsewhere.
    pub fn with_steps(total_steps: u32) -> Self {
        Self {
            total_steps,
            ..Self::default()
        }
        .normalized()
    }

    /// Load configuration from a JSON file and normalize it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let config: WizardConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::ParseFailed {
                path: path.display().to_string(),
                source,
            })?;

        tracing::info!("Loaded wizard config from: {}", path.display());
        config.validate()?;
        Ok(config.normalized())
    }

    /// Parse configuration from JSON text and normalize it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WizardConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::ParseFailed {
                path: "<inline>".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Reject values that cannot be repaired by clamping.
    fn validate(&self) -> Result<(), ConfigError> {
        let gesture = &self.gesture;
        let finite = [
            gesture.min_swipe_distance,
            gesture.max_drag_offset,
            gesture.soft_max_right,
            self.render.next_preview_threshold,
            self.render.rotation_factor,
            self.render.fly_out_rotation_deg,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid(
                "gesture and render values must be finite numbers".to_string(),
            ));
        }
        if gesture.min_swipe_distance < 0.0
            || gesture.max_drag_offset < 0.0
            || gesture.soft_max_right < 0.0
        {
            return Err(ConfigError::Invalid(
                "gesture distances must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Repair every value into its valid range.
    ///
    /// A step count below one is a programmer error; it is repaired rather
    /// than rejected so the wizard always has at least one card. Gesture and
    /// render values that `validate` would reject fall back to defaults.
    pub fn normalized(mut self) -> Self {
        if self.total_steps < 1 {
            tracing::warn!("total_steps was {}, normalizing to 1", self.total_steps);
            self.total_steps = 1;
        }
        if self.animation_duration_ms < 1 {
            tracing::warn!("animation_duration_ms was 0, normalizing to 1");
            self.animation_duration_ms = 1;
        }
        self.gesture = self.gesture.normalized();
        self.render = self.render.normalized();
        self
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Number of sub-steps configured for a step (0 when it has none).
    pub fn sub_step_count(&self, step: u32) -> u32 {
        self.sub_steps.get(&step).copied().unwrap_or(0)
    }
}
