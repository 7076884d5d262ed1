use uuid::Uuid;

/// Fields a tenant admin may edit from the settings screen. The slug is
/// recomputed by the service layer when the name changes, never supplied by
/// the client.
pub struct BusinessSettingsUpdate {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub onboarding_completed: bool,
}
