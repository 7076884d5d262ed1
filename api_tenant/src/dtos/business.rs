use serde::Deserialize;

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub name: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub onboarding_completed: bool,
}
