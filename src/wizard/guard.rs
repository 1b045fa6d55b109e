/// Navigation guards
///
/// A guard approves or vetoes a proposed transition. It is consulted
/// synchronously, before any state changes, on every attempt; its verdict is
/// never cached. Guards may have side effects (showing a notification
/// before returning `false`, for instance): user feedback on a veto is the
/// guard's job, not the state machine's.

use super::steps::NavigationContext;

pub trait NavigationGuard {
    fn can_navigate(&mut self, ctx: &NavigationContext) -> bool;
}

impl<F> NavigationGuard for F
where
    F: FnMut(&NavigationContext) -> bool,
{
    fn can_navigate(&mut self, ctx: &NavigationContext) -> bool {
        self(ctx)
    }
}

/// Guard that approves every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl NavigationGuard for AllowAll {
    fn can_navigate(&mut self, _ctx: &NavigationContext) -> bool {
        true
    }
}

/// Guard that rejects every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl NavigationGuard for DenyAll {
    fn can_navigate(&mut self, _ctx: &NavigationContext) -> bool {
        false
    }
}
