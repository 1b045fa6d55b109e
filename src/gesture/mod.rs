/// Pointer, touch and keyboard input for the card stack
///
/// ```text
/// PointerEvent ──> suppression check ──> GestureRecognizer ──> drag offset (every move)
///                                                        └──> Swipe (on release)
/// NavigationKey ──> key_navigation ──> NavigationTarget
/// ```

pub mod event;
pub mod keyboard;
pub mod recognizer;
pub mod suppression;

// Re-export commonly used types
pub use event::{ElementNode, ElementPath, EventTarget, PointerEvent, PointerKind, SelectorClass};
pub use keyboard::{key_navigation, NavigationKey};
pub use recognizer::{GestureRecognizer, GestureSession, StartRejection, Swipe};
pub use suppression::{is_suppressed, suppressing_class};
