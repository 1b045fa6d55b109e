/// Arrow-key navigation
///
/// Left/Right arrows page through the wizard unless the key press lands in a
/// text-entry control or a transition is running.

use serde::{Deserialize, Serialize};

use super::event::{EventTarget, SelectorClass};
use crate::wizard::NavigationTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
}

impl NavigationKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(NavigationKey::ArrowLeft),
            "ArrowRight" => Some(NavigationKey::ArrowRight),
            _ => None,
        }
    }
}

/// Navigation requested by a key press, if any
pub fn key_navigation(
    key: NavigationKey,
    target: Option<&dyn EventTarget>,
    animating: bool,
) -> Option<NavigationTarget> {
    if animating {
        return None;
    }
    if target.is_some_and(|t| t.matches_ancestor(SelectorClass::TextEntry)) {
        return None;
    }

    Some(match key {
        NavigationKey::ArrowRight => NavigationTarget::Next,
        NavigationKey::ArrowLeft => NavigationTarget::Prev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::event::{ElementNode, ElementPath};

    #[test]
    fn test_key_names() {
        assert_eq!(
            NavigationKey::from_key_name("ArrowRight"),
            Some(NavigationKey::ArrowRight)
        );
        assert_eq!(NavigationKey::from_key_name("Enter"), None);
    }

    #[test]
    fn test_arrows_map_to_relative_targets() {
        assert_eq!(
            key_navigation(NavigationKey::ArrowRight, None, false),
            Some(NavigationTarget::Next)
        );
        assert_eq!(
            key_navigation(NavigationKey::ArrowLeft, None, false),
            Some(NavigationTarget::Prev)
        );
    }

    #[test]
    fn test_ignored_while_animating() {
        assert_eq!(key_navigation(NavigationKey::ArrowRight, None, true), None);
    }

    #[test]
    fn test_ignored_inside_text_entry() {
        let field = ElementPath::new(vec![ElementNode::new("textarea")]);
        assert_eq!(
            key_navigation(NavigationKey::ArrowRight, Some(&field), false),
            None
        );

        // Buttons take clicks, not text, so arrows still navigate.
        let button = ElementPath::new(vec![ElementNode::new("button")]);
        assert_eq!(
            key_navigation(NavigationKey::ArrowLeft, Some(&button), false),
            Some(NavigationTarget::Prev)
        );
    }
}
