use auth_state::AuthSnapshot;
use serde::Serialize;
use session::ImpersonationRecord;

/// Everything the frontend needs to boot its shell: the auth snapshot, the
/// impersonation banner state, the coarse session kind and where the user
/// left off.
#[derive(Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub snapshot: AuthSnapshot,
    pub impersonation: Option<ImpersonationRecord>,
    pub auth_context: String,
    pub last_route: Option<String>,
}
