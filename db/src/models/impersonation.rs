use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// Single-use, time-bounded token letting an administrator assume a tenant's
/// view. Consumed atomically; `used_at` is set exactly once.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ImpersonationToken {
    pub token: Uuid,
    pub business_id: Uuid,
    pub issued_by: Uuid,
    pub expires_at: NaiveDateTime,
    pub used_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
