//! Per-navigation gating of protected views.
//!
//! The decision itself is a pure function over {path, admin requirement,
//! auth snapshot}; the middleware resolves the snapshot for the request and
//! maps the decision onto HTTP. Unauthenticated access renders a static
//! response with a manual link instead of auto-redirecting — redirecting
//! while hydration is still racing causes redirect loops, and that applies
//! to the anonymous case too.

pub mod decision;
pub mod memory;
pub mod middleware;

pub use decision::{RouteDecision, RouteRequest, decide};
use middleware::GuardMiddleware;

/// Guard for routes any authenticated user may see.
pub fn middleware(public_prefixes: Vec<String>) -> GuardMiddleware {
    GuardMiddleware::new(false, public_prefixes)
}

/// Guard for administrator-only routes.
pub fn admin_middleware() -> GuardMiddleware {
    GuardMiddleware::new(true, Vec::new())
}
