/// Gesture suppression rule
///
/// Cards mix free-form dragging with dense form content on the same surface.
/// A drag must not start on anything the user is more likely trying to tap,
/// type into or drag on its own.

use super::event::{EventTarget, SelectorClass};

/// First suppressing class the target falls into, if any.
pub fn suppressing_class(target: &dyn EventTarget) -> Option<SelectorClass> {
    SelectorClass::GESTURE_SUPPRESSED
        .into_iter()
        .find(|class| target.matches_ancestor(*class))
}

/// True if a drag starting on `target` must be ignored
pub fn is_suppressed(target: &dyn EventTarget) -> bool {
    suppressing_class(target).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::event::{ElementNode, ElementPath};

    /// Target that reports membership from a fixed list
    struct Marked(Vec<SelectorClass>);

    impl EventTarget for Marked {
        fn matches_ancestor(&self, class: SelectorClass) -> bool {
            self.0.contains(&class)
        }
    }

    #[test]
    fn test_plain_surface_not_suppressed() {
        assert!(!is_suppressed(&Marked(vec![])));
        assert!(!is_suppressed(&ElementPath::card_surface()));
    }

    #[test]
    fn test_each_class_suppresses() {
        for class in SelectorClass::GESTURE_SUPPRESSED {
            assert_eq!(suppressing_class(&Marked(vec![class])), Some(class));
        }
    }

    #[test]
    fn test_text_entry_alone_does_not_suppress_drag() {
        assert!(!is_suppressed(&Marked(vec![SelectorClass::TextEntry])));
    }

    #[test]
    fn test_reports_first_class_in_order() {
        let button_in_badge = ElementPath::new(vec![
            ElementNode::new("button"),
            ElementNode::new("span").with_class("badge"),
        ]);
        assert_eq!(
            suppressing_class(&button_in_badge),
            Some(SelectorClass::FormControl)
        );
    }
}
