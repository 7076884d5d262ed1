use std::sync::Arc;

use auth_state::{AuthSnapshot, AuthStateController, IdentityService, PgDirectory};
use common::{env_config::Config, error::Res};
use session::{AuthContextKind, SessionContext, SessionStore};
use sqlx::PgPool;

use crate::dtos::session::SessionResponse;

/// Runs one hydration through the controller for this request's identity
/// service, refreshes the session-store hints the frontend shell reads, and
/// assembles the bootstrap payload.
pub async fn bootstrap<I, S>(
    identity: I,
    pool: Arc<PgPool>,
    session: SessionContext<S>,
    config: &Config,
) -> Res<SessionResponse>
where
    I: IdentityService,
    S: SessionStore,
{
    let controller = AuthStateController::with_fetch_timeout(
        identity,
        PgDirectory::new(pool.clone()),
        session,
        config.fetch_timeout,
    );
    let snapshot = controller.hydrate(None).await;
    let session = controller.session();

    let kind = derive_auth_context(&snapshot, session.demo_mode());
    session.set_auth_context(kind);
    if let Some(business) = snapshot.business.as_ref() {
        session.set_business_slug(&business.slug);
    }

    let last_route = match snapshot.profile.as_ref() {
        Some(profile) => db::route_memory::get_last_route(&*pool, profile.id)
            .await
            .unwrap_or_else(|err| {
                // restoration is a convenience; boot proceeds without it
                log::debug!("route memory read for {} failed: {}", profile.id, err);
                None
            }),
        None => None,
    };

    Ok(SessionResponse {
        impersonation: session.impersonation(),
        auth_context: kind.to_string(),
        last_route,
        snapshot,
    })
}

/// The coarse session kind shown in headers. Demo mode wins over everything:
/// a signed-in admin browsing the public demo tenant is still in the demo
/// shell.
pub fn derive_auth_context(snapshot: &AuthSnapshot, demo_mode: bool) -> AuthContextKind {
    if demo_mode {
        AuthContextKind::Demo
    } else if snapshot.is_admin {
        AuthContextKind::Admin
    } else if snapshot.is_authenticated() {
        AuthContextKind::Business
    } else {
        AuthContextKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::derive_auth_context;
    use auth_state::AuthSnapshot;
    use common::identity::Identity;
    use session::AuthContextKind;
    use uuid::Uuid;

    fn signed_in(is_admin: bool) -> AuthSnapshot {
        let mut snapshot = AuthSnapshot::anonymous();
        snapshot.identity = Some(Identity {
            id: Uuid::new_v4(),
            email: "user@acmegrooming.test".to_string(),
        });
        snapshot.is_admin = is_admin;
        snapshot
    }

    #[test]
    fn anonymous_maps_to_none() {
        assert_eq!(
            derive_auth_context(&AuthSnapshot::anonymous(), false),
            AuthContextKind::None
        );
    }

    #[test]
    fn admin_and_business_sessions_map_by_role() {
        assert_eq!(
            derive_auth_context(&signed_in(true), false),
            AuthContextKind::Admin
        );
        assert_eq!(
            derive_auth_context(&signed_in(false), false),
            AuthContextKind::Business
        );
    }

    #[test]
    fn demo_mode_wins_over_roles() {
        assert_eq!(
            derive_auth_context(&signed_in(true), true),
            AuthContextKind::Demo
        );
    }
}
