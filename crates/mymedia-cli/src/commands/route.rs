use anyhow::{Result, anyhow};
use mymedia_core::route::{Route, RouteDecision};

use super::{AppContext, Output};

/// Runs the route guard for `path` against the restored session.
pub fn check(app: &AppContext, output: Output, path: &str) -> Result<()> {
    let route = Route::parse(path).ok_or_else(|| anyhow!("Unknown console path: {}", path))?;
    let decision = app.session.check_route(&route);

    output.emit(&decision, || match &decision {
        RouteDecision::Render => format!("{} renders", route),
        RouteDecision::Redirect(to) => format!("{} redirects to {}", route, to),
    })
}
