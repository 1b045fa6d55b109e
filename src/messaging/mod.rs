/// Host-facing messaging
///
/// Events flow out of the wizard, commands flow in:
///
/// ```text
/// ┌──────────────┐   Command    ┌────────────────┐   WizardEvent   ┌───────────┐
/// │ Host thread  │ ───────────> │ CardStackWizard│ ──────────────> │ Event Bus │
/// │ (any)        │   (queued)   │ (UI thread)    │                 │           │
/// └──────────────┘              └────────────────┘                 └───────────┘
///                                                                        │
///                                                                        ▼
///                                                                  Subscribers
/// ```
///
/// Commands are drained by `CardStackWizard::process_commands`; the state
/// machine itself never publishes.

pub mod bus;
pub mod commands;
pub mod events;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use commands::Command;
pub use events::{StepChangeCause, WizardEvent};
