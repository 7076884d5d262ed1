//! The authoritative auth snapshot and its hydration protocol.
//!
//! One controller instance owns the in-memory view of "who is signed in,
//! which profile and which tenant they map to". Identity events re-hydrate
//! it through bounded-time fetches; consumers observe the snapshot through
//! a watch channel and must never make routing decisions while it is
//! loading. Stale async completions are discarded by generation, not by
//! cancellation.

pub mod controller;
pub mod directory;
pub mod identity;
pub mod resolver;
pub mod snapshot;

pub use controller::AuthStateController;
pub use directory::{Directory, PgDirectory};
pub use identity::{AuthEvent, BearerIdentity, HttpIdentity, IdentityService};
pub use snapshot::AuthSnapshot;
