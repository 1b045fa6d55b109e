//! Swipe Wizard
//!
//! Engine for a multi-step wizard presented as a stack of cards. The active
//! card can be dragged; swiping left moves forward with a fly-out animation,
//! swiping right moves back with a slide-in. Every transition passes through
//! a caller-supplied guard, and only one transition can be in flight at a
//! time.
//!
//! The crate is UI-toolkit neutral. Hosts feed it pointer events, call
//! [`CardStackWizard::tick`] from their event loop and render the
//! [`CardRender`] descriptors it produces.
//!
//! ```rust,ignore
//! let mut wizard = CardStackWizard::new(&WizardConfig::with_steps(5), AllowAll);
//! let (events, _id) = wizard.event_bus().subscribe();
//!
//! wizard.navigate(NavigationTarget::Next);
//! // ... later, from the event loop
//! wizard.tick();
//! for card in wizard.frame() {
//!     // apply card.transform.css_transform() etc.
//! }
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod messaging;
pub mod render;
pub mod script;
pub mod wizard;

pub use clock::{Clock, SystemClock, VirtualClock};
pub use config::{GestureConfig, RenderConfig, WizardConfig};
pub use controller::{CardStackWizard, RequestOutcome, WizardSnapshot};
pub use error::{AppResult, ConfigError, ScriptError, TargetParseError};
pub use gesture::{GestureRecognizer, PointerEvent, Swipe};
pub use messaging::{Command, EventBus, WizardEvent};
pub use render::{CardRender, CardStackRenderer};
pub use wizard::{
    AllowAll, NavigationContext, NavigationGuard, NavigationOutcome, NavigationStateMachine,
    NavigationTarget,
};
