/// Card stack render selection
///
/// Decides which cards are mounted and how each one is transformed for the
/// current phase. At most the previous, current and next cards (plus the
/// animating card) are mounted, however many steps the wizard has.

use serde::Serialize;
use std::fmt;

use crate::config::{RenderConfig, WizardConfig, DEFAULT_ANIMATION_DURATION_MS};
use crate::wizard::AnimationPhase;

const TRANSFORM_ORIGIN: &str = "center bottom";

/// Part a mounted card plays in the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CardRole {
    FlyingOut,
    SlidingIn,
    Active,
    Next,
    Previous,
}

/// Horizontal placement of a card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Translate {
    Pixels(f64),
    /// One full viewport width to the left
    OffscreenLeft,
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translate::Pixels(px) if *px == 0.0 => write!(f, "0"),
            Translate::Pixels(px) => write!(f, "{}px", px),
            Translate::OffscreenLeft => write!(f, "-100vw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardTransform {
    pub translate_x: Translate,
    pub rotation_deg: f64,
    pub opacity: f64,
    pub z_index: i32,
}

impl CardTransform {
    /// CSS `transform` value
    pub fn css_transform(&self) -> String {
        format!("translateX({}) rotate({}deg)", self.translate_x, self.rotation_deg)
    }

    pub fn transform_origin(&self) -> &'static str {
        TRANSFORM_ORIGIN
    }
}

/// How the host should animate property changes on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardTransition {
    /// Keyframed slide-in from the left
    SlideInKeyframes,

    /// Eased transition of all properties
    Eased { duration_ms: u64 },
}

/// Render descriptor for one mounted card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardRender {
    pub step: u32,
    pub role: CardRole,
    pub transform: CardTransform,
    pub transition: CardTransition,
    /// Only the active card receives pointer listeners
    pub interactive: bool,
}

/// Everything the renderer reads for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInput {
    pub total_steps: u32,
    pub current_step: u32,
    pub animating_card: Option<u32>,
    pub phase: AnimationPhase,
    pub drag_offset: f64,
}

#[derive(Debug, Clone)]
pub struct CardStackRenderer {
    config: RenderConfig,
    /// Eased transitions run as long as the step animation
    transition_ms: u64,
}

impl CardStackRenderer {
    pub fn new(config: RenderConfig, transition_ms: u64) -> Self {
        Self {
            config,
            transition_ms,
        }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.render, config.animation_duration_ms.max(1))
    }

    /// Descriptors for every mounted card, ordered by step.
    pub fn render(&self, input: &RenderInput) -> Vec<CardRender> {
        let window = input.current_step.saturating_sub(1)..=input.current_step + 1;
        let mut candidates: Vec<u32> = window.chain(input.animating_card).collect();
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .filter_map(|step| self.card(step, input))
            .collect()
    }

    /// Descriptor for `step`, or `None` if it is not mounted.
    pub fn card(&self, step: u32, input: &RenderInput) -> Option<CardRender> {
        if !(1..=input.total_steps).contains(&step) {
            return None;
        }

        let animating = input.animating_card == Some(step);
        let current = input.current_step;
        let in_window = step + 1 >= current && step <= current + 1;
        if !animating && !in_window {
            return None;
        }

        let (role, transform) = match (animating, input.phase) {
            (true, AnimationPhase::FlyOut) => (
                CardRole::FlyingOut,
                CardTransform {
                    translate_x: Translate::OffscreenLeft,
                    rotation_deg: self.config.fly_out_rotation_deg,
                    opacity: 0.0,
                    z_index: 30,
                },
            ),
            (true, AnimationPhase::SlideIn) => (
                CardRole::SlidingIn,
                CardTransform {
                    translate_x: Translate::Pixels(0.0),
                    rotation_deg: 0.0,
                    opacity: 1.0,
                    z_index: 35,
                },
            ),
            _ if step == current => (
                CardRole::Active,
                CardTransform {
                    translate_x: Translate::Pixels(input.drag_offset),
                    rotation_deg: input.drag_offset * self.config.rotation_factor,
                    opacity: 1.0,
                    z_index: 30,
                },
            ),
            _ if step == current + 1 => {
                let preview = input.drag_offset < self.config.next_preview_threshold;
                (
                    CardRole::Next,
                    CardTransform {
                        translate_x: Translate::Pixels(0.0),
                        rotation_deg: 0.0,
                        opacity: if preview { 1.0 } else { 0.0 },
                        z_index: 20,
                    },
                )
            }
            _ if step + 1 == current => (
                CardRole::Previous,
                CardTransform {
                    translate_x: Translate::OffscreenLeft,
                    rotation_deg: 0.0,
                    opacity: 1.0,
                    z_index: 10,
                },
            ),
            _ => return None,
        };

        let transition = if role == CardRole::SlidingIn {
            CardTransition::SlideInKeyframes
        } else {
            CardTransition::Eased {
                duration_ms: self.transition_ms,
            }
        };

        Some(CardRender {
            step,
            role,
            transform,
            transition,
            interactive: role == CardRole::Active,
        })
    }
}

impl Default for CardStackRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default(), DEFAULT_ANIMATION_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(current_step: u32, total_steps: u32) -> RenderInput {
        RenderInput {
            total_steps,
            current_step,
            animating_card: None,
            phase: AnimationPhase::Idle,
            drag_offset: 0.0,
        }
    }

    fn roles(cards: &[CardRender]) -> Vec<(u32, CardRole)> {
        cards.iter().map(|c| (c.step, c.role)).collect()
    }

    #[test]
    fn test_window_is_bounded() {
        let renderer = CardStackRenderer::default();
        let cards = renderer.render(&input(5, 100));
        assert_eq!(
            roles(&cards),
            vec![
                (4, CardRole::Previous),
                (5, CardRole::Active),
                (6, CardRole::Next)
            ]
        );
        assert!(renderer.card(7, &input(5, 100)).is_none());
        assert!(renderer.card(3, &input(5, 100)).is_none());
    }

    #[test]
    fn test_window_clipped_at_edges() {
        let renderer = CardStackRenderer::default();
        assert_eq!(
            roles(&renderer.render(&input(1, 3))),
            vec![(1, CardRole::Active), (2, CardRole::Next)]
        );
        assert_eq!(
            roles(&renderer.render(&input(3, 3))),
            vec![(2, CardRole::Previous), (3, CardRole::Active)]
        );
        assert_eq!(roles(&renderer.render(&input(1, 1))), vec![(1, CardRole::Active)]);
    }

    #[test]
    fn test_card_outside_step_range_is_not_mounted() {
        let renderer = CardStackRenderer::default();
        assert!(renderer.card(4, &input(3, 3)).is_none());
        assert!(renderer.card(0, &input(1, 3)).is_none());
        assert!(renderer.card(2, &input(1, 3)).is_some());

        let mut frame = input(2, 2);
        frame.phase = AnimationPhase::FlyOut;
        frame.animating_card = Some(3);
        assert!(renderer.card(3, &frame).is_none());
        assert_eq!(
            roles(&renderer.render(&frame)),
            vec![(1, CardRole::Previous), (2, CardRole::Active)]
        );
    }

    #[test]
    fn test_active_card_follows_drag() {
        let renderer = CardStackRenderer::default();
        let mut frame = input(2, 5);
        frame.drag_offset = -80.0;

        let active = renderer.card(2, &frame).unwrap();
        assert_eq!(active.transform.translate_x, Translate::Pixels(-80.0));
        assert!((active.transform.rotation_deg + 8.0).abs() < 1e-9);
        assert_eq!(active.transform.z_index, 30);
        assert!(active.interactive);
        assert_eq!(active.transform.css_transform(), "translateX(-80px) rotate(-8deg)");
        assert_eq!(active.transform.transform_origin(), "center bottom");
    }

    #[test]
    fn test_next_card_preview_threshold() {
        let renderer = CardStackRenderer::default();
        let mut frame = input(2, 5);

        frame.drag_offset = -20.0;
        assert_eq!(renderer.card(3, &frame).unwrap().transform.opacity, 0.0);

        frame.drag_offset = -21.0;
        let next = renderer.card(3, &frame).unwrap();
        assert_eq!(next.transform.opacity, 1.0);
        assert_eq!(next.transform.z_index, 20);
        assert!(!next.interactive);
    }

    #[test]
    fn test_previous_card_parked_offscreen() {
        let renderer = CardStackRenderer::default();
        let previous = renderer.card(1, &input(2, 5)).unwrap();
        assert_eq!(previous.role, CardRole::Previous);
        assert_eq!(previous.transform.translate_x, Translate::OffscreenLeft);
        assert_eq!(previous.transform.z_index, 10);
        assert_eq!(
            previous.transform.css_transform(),
            "translateX(-100vw) rotate(0deg)"
        );
    }

    #[test]
    fn test_fly_out_frame() {
        let renderer = CardStackRenderer::default();
        let mut frame = input(2, 5);
        frame.phase = AnimationPhase::FlyOut;
        frame.animating_card = Some(2);

        let cards = renderer.render(&frame);
        assert_eq!(
            roles(&cards),
            vec![
                (1, CardRole::Previous),
                (2, CardRole::FlyingOut),
                (3, CardRole::Next)
            ]
        );
        let flying = cards[1];
        assert_eq!(flying.transform.opacity, 0.0);
        assert_eq!(flying.transform.rotation_deg, -15.0);
        assert!(!flying.interactive);
        assert_eq!(flying.transition, CardTransition::Eased { duration_ms: 400 });
    }

    #[test]
    fn test_slide_in_frame() {
        let renderer = CardStackRenderer::default();
        let mut frame = input(3, 5);
        frame.phase = AnimationPhase::SlideIn;
        frame.animating_card = Some(2);

        let cards = renderer.render(&frame);
        assert_eq!(
            roles(&cards),
            vec![
                (2, CardRole::SlidingIn),
                (3, CardRole::Active),
                (4, CardRole::Next)
            ]
        );
        let sliding = cards[0];
        assert_eq!(sliding.transform.z_index, 35);
        assert_eq!(sliding.transform.opacity, 1.0);
        assert_eq!(sliding.transition, CardTransition::SlideInKeyframes);
        assert!(cards
            .iter()
            .all(|c| c.transform.z_index <= sliding.transform.z_index));
    }

    #[test]
    fn test_transition_follows_animation_duration() {
        let renderer = CardStackRenderer::from_config(&WizardConfig {
            animation_duration_ms: 250,
            ..WizardConfig::default()
        });
        let active = renderer.card(1, &input(1, 3)).unwrap();
        assert_eq!(active.transition, CardTransition::Eased { duration_ms: 250 });
    }

    #[test]
    fn test_animating_card_outside_window_still_mounted() {
        let renderer = CardStackRenderer::default();
        let mut frame = input(5, 10);
        frame.phase = AnimationPhase::FlyOut;
        frame.animating_card = Some(2);

        let cards = renderer.render(&frame);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].step, 2);
        assert_eq!(cards[0].role, CardRole::FlyingOut);
    }
}
