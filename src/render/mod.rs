/// Card stack presentation
///
/// Pure functions from wizard state to per-card render descriptors, plus the
/// bookkeeping for which card carries the input listeners.

pub mod bindings;
pub mod card_stack;

pub use bindings::{
    handler_for, BindingChange, InputHandler, ListenerBinding, ListenerSpec, LISTENERS,
};
pub use card_stack::{
    CardRender, CardRole, CardStackRenderer, CardTransform, CardTransition, RenderInput, Translate,
};
