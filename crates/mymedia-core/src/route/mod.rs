//! Console routes and the guard that protects them.

mod guard;
mod model;

pub use guard::{RouteDecision, RouteGuard};
pub use model::Route;
