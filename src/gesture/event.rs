/// Pointer event model
///
/// A framework-neutral view of mouse and touch events. The only thing the
/// recognizer needs from the event target is whether it, or one of its
/// ancestors, falls into a `SelectorClass`; hosts backed by a real DOM answer
/// that with `element.closest(class.css())`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input device that produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Groups of elements a card-level gesture must not start on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorClass {
    /// Inputs, text areas, selects, labels, ARIA buttons/tabs, editable content
    FormControl,

    /// Badge-like chips
    Badge,

    /// Embedded interactive widgets with their own drag handling
    NestedWidget,

    /// Links, buttons and anything with a click handler
    Clickable,

    /// Progress bars and step indicators
    ProgressIndicator,

    /// Text-entry controls; used by keyboard navigation only
    TextEntry,
}

impl SelectorClass {
    /// Classes checked before a drag may start, in evaluation order
    pub const GESTURE_SUPPRESSED: [SelectorClass; 5] = [
        SelectorClass::FormControl,
        SelectorClass::Badge,
        SelectorClass::NestedWidget,
        SelectorClass::Clickable,
        SelectorClass::ProgressIndicator,
    ];

    /// Equivalent CSS selector list, for hosts that can call `closest()`
    pub fn css(&self) -> &'static str {
        match self {
            SelectorClass::FormControl => {
                "input, textarea, button, select, label, [role='button'], [role='tab'], \
                 [contenteditable], .form-field, .form-input, .form-textarea"
            }
            SelectorClass::Badge => ".badge, [class*=\"badge\"], [data-slot=\"badge\"]",
            SelectorClass::NestedWidget => "[data-interactive-component]",
            SelectorClass::Clickable => "a, button, [onclick], [data-clickable]",
            SelectorClass::ProgressIndicator => "[class*=\"progress\"], [class*=\"step\"]",
            SelectorClass::TextEntry => "input, textarea, select, [contenteditable=true]",
        }
    }
}

/// Ancestry query capability of an event target
pub trait EventTarget {
    /// True if the target or any ancestor belongs to `class`
    fn matches_ancestor(&self, class: SelectorClass) -> bool;
}

/// One element in a target's ancestry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Substring match against the whole class attribute, like `[class*=..]`
    fn class_attr_contains(&self, needle: &str) -> bool {
        self.classes.join(" ").contains(needle)
    }

    /// HTML tag names compare case-insensitively (`tagName` is uppercase)
    fn tag_is(&self, tags: &[&str]) -> bool {
        tags.iter().any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    pub fn matches(&self, class: SelectorClass) -> bool {
        match class {
            SelectorClass::FormControl => {
                self.tag_is(&["input", "textarea", "button", "select", "label"])
                    || matches!(self.attr("role"), Some("button") | Some("tab"))
                    || self.attr("contenteditable").is_some()
                    || ["form-field", "form-input", "form-textarea"]
                        .iter()
                        .any(|c| self.has_class(c))
            }
            SelectorClass::Badge => {
                self.class_attr_contains("badge") || self.attr("data-slot") == Some("badge")
            }
            SelectorClass::NestedWidget => self.attr("data-interactive-component").is_some(),
            SelectorClass::Clickable => {
                self.tag_is(&["a", "button"])
                    || self.attr("onclick").is_some()
                    || self.attr("data-clickable").is_some()
            }
            SelectorClass::ProgressIndicator => {
                self.class_attr_contains("progress") || self.class_attr_contains("step")
            }
            SelectorClass::TextEntry => {
                self.tag_is(&["input", "textarea", "select"])
                    || self.attr("contenteditable") == Some("true")
            }
        }
    }
}

/// A target's ancestry, innermost element first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementPath(pub Vec<ElementNode>);

impl ElementPath {
    pub fn new(nodes: Vec<ElementNode>) -> Self {
        Self(nodes)
    }

    /// A bare card surface with nothing interactive around it
    pub fn card_surface() -> Self {
        Self(vec![ElementNode::new("div").with_class("draggable-card-container")])
    }
}

impl EventTarget for ElementPath {
    fn matches_ancestor(&self, class: SelectorClass) -> bool {
        self.0.iter().any(|node| node.matches(class))
    }
}

/// A pointer or touch event as seen by the recognizer.
///
/// `x`/`y` are the client coordinates of the first touch point for touch
/// events and of the cursor for mouse events.
pub struct PointerEvent<'a> {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    pub cancelable: bool,
    pub target: Option<&'a dyn EventTarget>,
    default_prevented: bool,
}

impl<'a> PointerEvent<'a> {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            cancelable: true,
            target: None,
            default_prevented: false,
        }
    }

    pub fn mouse(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Mouse, x, y)
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Touch, x, y)
    }

    pub fn with_target(mut self, target: &'a dyn EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn non_cancelable(mut self) -> Self {
        self.cancelable = false;
        self
    }

    /// Suppress the platform's default handling; no effect on non-cancelable events
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }

    pub fn targets(&self, class: SelectorClass) -> bool {
        self.target
            .map(|target| target.matches_ancestor(class))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for PointerEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerEvent")
            .field("kind", &self.kind)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("cancelable", &self.cancelable)
            .field("has_target", &self.target.is_some())
            .field("default_prevented", &self.default_prevented)
            .finish()
    }
}
