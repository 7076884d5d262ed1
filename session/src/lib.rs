//! Session-scoped flags shared by the route guard, the impersonation flow
//! and the UI headers. Everything here is a client-trust convenience layer,
//! not a security boundary: the keys only shape what the frontend renders
//! and which tenant's data gets fetched for an already-authorized caller.

pub mod context;
pub mod keys;
pub mod store;

pub use context::{ImpersonationRecord, SessionContext};
pub use keys::AuthContextKind;
pub use store::{CookieSession, MemorySession, SessionStore};
