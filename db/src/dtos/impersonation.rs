use chrono::NaiveDateTime;
use uuid::Uuid;

pub struct TokenCreateRequest {
    pub business_id: Uuid,
    pub issued_by: Uuid,
    pub expires_at: NaiveDateTime,
}
