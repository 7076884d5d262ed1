use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct IssueTokenRequest {
    pub business_id: Uuid,
}

#[derive(Serialize)]
pub struct IssueTokenResponse {
    pub token: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub expires_at: NaiveDateTime,
    /// Path the admin frontend turns into a one-click support link.
    pub redeem_path: String,
}

#[derive(Serialize)]
pub struct RedeemResponse {
    pub business_id: Uuid,
    pub business_name: String,
    /// The impersonated tenant's slugged dashboard.
    pub redirect_to: String,
}

#[derive(Serialize)]
pub struct ExitResponse {
    pub redirect_to: String,
}
