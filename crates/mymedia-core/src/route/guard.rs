//! Route guard.
//!
//! Synchronous and pure: the decision depends only on the session passed in.

use serde::Serialize;

use super::model::Route;
use crate::auth::Session;

/// What the view layer should do for a requested route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "to", rename_all = "snake_case")]
pub enum RouteDecision {
    Render,
    Redirect(Route),
}

/// Gates protected views on `Session::is_authenticated`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn check(session: &Session, route: &Route) -> RouteDecision {
        if route.is_protected() && !session.is_authenticated {
            RouteDecision::Redirect(Route::Login)
        } else {
            RouteDecision::Render
        }
    }
}
