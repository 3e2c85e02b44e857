//! Client-side page gate by token and role.
//!
//! TRADE-OFFS
//! ==========
//! This is a convenience redirect, not a security control. Anyone can bypass
//! it by disabling scripts or writing `token`/`role` into storage by hand.
//! Every protected endpoint must authorize the bearer token server-side.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::navigate::Navigator;
use crate::session::{Session, SessionRecord, SessionStore};

/// Why the guard turned a visitor away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NoToken,
    NotAdmin,
}

/// Outcome of checking a session against a page's requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny(DenyReason),
}

/// Decide whether `record` may view a page, optionally admin-only.
pub fn evaluate(record: &SessionRecord, need_admin: bool) -> GuardDecision {
    if !record.has_token() {
        GuardDecision::Deny(DenyReason::NoToken)
    } else if need_admin && !record.is_admin() {
        GuardDecision::Deny(DenyReason::NotAdmin)
    } else {
        GuardDecision::Allow
    }
}

/// Check the stored session; on failure navigate to `login_route`.
///
/// Returns `true` when the page may render. Both deny reasons redirect to the
/// same route.
pub fn require_auth<S, N>(session: &Session<S>, navigator: &N, login_route: &str, need_admin: bool) -> bool
where
    S: SessionStore,
    N: Navigator + ?Sized,
{
    match evaluate(&session.read(), need_admin) {
        GuardDecision::Allow => true,
        GuardDecision::Deny(reason) => {
            log::warn!("auth guard redirect: reason={reason:?} need_admin={need_admin} route={login_route}");
            navigator.navigate(login_route);
            false
        }
    }
}
