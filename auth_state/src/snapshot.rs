use common::identity::Identity;
use db::models::{business::Business, profile::Profile};
use serde::Serialize;

/// The current, atomically-replaced view of auth state. Replaced wholesale
/// on every hydration cycle; consumers must not route on the other fields
/// while `loading` is true.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSnapshot {
    pub identity: Option<Identity>,
    pub profile: Option<Profile>,
    pub business: Option<Business>,
    pub is_admin: bool,
    pub loading: bool,
}

impl AuthSnapshot {
    /// State before the first hydration completes.
    pub fn initial() -> Self {
        AuthSnapshot {
            identity: None,
            profile: None,
            business: None,
            is_admin: false,
            loading: true,
        }
    }

    /// Anonymous is a valid terminal state, not an error.
    pub fn anonymous() -> Self {
        AuthSnapshot {
            identity: None,
            profile: None,
            business: None,
            is_admin: false,
            loading: false,
        }
    }

    /// A completed hydration. `is_admin` is derived here and nowhere else:
    /// true iff a profile exists and carries the admin flag.
    pub fn ready(identity: Identity, profile: Option<Profile>, business: Option<Business>) -> Self {
        let is_admin = profile.as_ref().is_some_and(|p| p.is_admin);
        AuthSnapshot {
            identity: Some(identity),
            profile,
            business,
            is_admin,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
