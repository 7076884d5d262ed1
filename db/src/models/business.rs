use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant. Created on checkout completion by the external billing flow,
/// updated by tenant-admin settings edits, never deleted here.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub stripe_customer_id: Option<String>,
    pub trial_ends_at: Option<NaiveDateTime>,
    pub subscription_ends_at: Option<NaiveDateTime>,
    pub onboarding_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
