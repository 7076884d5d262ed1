use std::sync::Arc;

use common::error::Res;
use db::models::{business::Business, profile::Profile};
use sqlx::PgPool;
use uuid::Uuid;

/// The data layer as the auth core consumes it. Every method's failure
/// degrades to an absent value at the call site, except token redemption,
/// whose outcome is the impersonation flow's primary signal.
pub trait Directory {
    fn fetch_profile(&self, profile_id: Uuid) -> impl Future<Output = Res<Option<Profile>>>;

    fn fetch_business(&self, business_id: Uuid) -> impl Future<Output = Res<Option<Business>>>;

    /// Atomic single-use exchange of an impersonation token for its business
    /// id. `None` covers invalid, expired and already-used tokens alike.
    fn redeem_impersonation_token(&self, token: Uuid) -> impl Future<Output = Res<Option<Uuid>>>;
}

/// Postgres-backed directory.
#[derive(Clone)]
pub struct PgDirectory {
    pool: Arc<PgPool>,
}

impl PgDirectory {
    pub fn new(pool: Arc<PgPool>) -> Self {
        PgDirectory { pool }
    }
}

impl Directory for PgDirectory {
    async fn fetch_profile(&self, profile_id: Uuid) -> Res<Option<Profile>> {
        db::profile::get_profile_by_id(&*self.pool, profile_id).await
    }

    async fn fetch_business(&self, business_id: Uuid) -> Res<Option<Business>> {
        db::business::get_business_by_id(&*self.pool, business_id).await
    }

    async fn redeem_impersonation_token(&self, token: Uuid) -> Res<Option<Uuid>> {
        db::impersonation::redeem_token(&*self.pool, token).await
    }
}
