use auth_state::Directory;
use common::error::{AppError, Res};
use db::dtos::impersonation::TokenCreateRequest;
use session::{AuthContextKind, SessionContext, SessionStore};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::impersonation::{ExitResponse, IssueTokenResponse, RedeemResponse};

/// Issued tokens are short-lived; a support session starts within minutes of
/// generating the link or not at all.
pub const TOKEN_TTL_MINUTES: i64 = 10;

/// Creates a single-use impersonation token for a business.
///
/// # Arguments
///
/// * `pool` - A reference to the database connection pool.
/// * `issued_by` - The administrator profile generating the token.
/// * `business_id` - The tenant the token is scoped to.
///
/// # Returns
///
/// A `Result` containing an `IssueTokenResponse` or an `AppError` if the
/// business does not exist.
pub async fn issue_token(
    pool: &PgPool,
    issued_by: Uuid,
    business_id: Uuid,
) -> Res<IssueTokenResponse> {
    let business = db::business::get_business_by_id(pool, business_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("business {}", business_id)))?;

    let expires_at =
        (chrono::Utc::now() + chrono::Duration::minutes(TOKEN_TTL_MINUTES)).naive_utc();
    let token = db::impersonation::insert_token(
        pool,
        TokenCreateRequest {
            business_id,
            issued_by,
            expires_at,
        },
    )
    .await?;

    Ok(IssueTokenResponse {
        token: token.token,
        business_id,
        business_name: business.name,
        expires_at: token.expires_at,
        redeem_path: format!("/impersonate/{}", token.token),
    })
}

/// Redeems a token and enters impersonation.
///
/// The exchange is atomic and single-use on the database side; this layer
/// only observes success or failure. On success the impersonation record,
/// the cached slug and the coarse session kind are written, and the caller
/// is pointed at the tenant's slugged dashboard.
pub async fn redeem_token<D: Directory, S: SessionStore>(
    directory: &D,
    session: &SessionContext<S>,
    token: Uuid,
) -> Res<RedeemResponse> {
    let business_id = directory
        .redeem_impersonation_token(token)
        .await?
        .ok_or_else(|| {
            AppError::TokenRedemption(
                "Impersonation token is invalid, expired, or already used".to_string(),
            )
        })?;

    let business = directory
        .fetch_business(business_id)
        .await
        .map_err(|err| {
            log::warn!("business fetch after redemption failed: {}", err);
            AppError::TokenRedemption("Business behind this token could not be loaded".to_string())
        })?
        .ok_or_else(|| {
            AppError::TokenRedemption("Business behind this token no longer exists".to_string())
        })?;

    session.enter_impersonation(business.id, &business.name);
    session.set_business_slug(&business.slug);
    session.set_auth_context(AuthContextKind::Admin);

    Ok(RedeemResponse {
        business_id: business.id,
        business_name: business.name,
        redirect_to: format!("/{}/dashboard", business.slug),
    })
}

/// Ends impersonation and sends the administrator back to their dashboard.
/// Must stay reachable from any impersonated view.
pub fn exit_impersonation<S: SessionStore>(session: &SessionContext<S>) -> ExitResponse {
    session.exit_impersonation();
    session.clear_business_slug();
    ExitResponse {
        redirect_to: "/admin".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use auth_state::Directory;
    use common::error::{AppError, Res};
    use db::models::{business::Business, profile::Profile};
    use session::{MemorySession, SessionContext, SessionStore};
    use uuid::Uuid;

    use super::{exit_impersonation, redeem_token};

    struct MockDirectory {
        businesses: HashMap<Uuid, Business>,
        tokens: Mutex<HashMap<Uuid, TokenState>>,
    }

    struct TokenState {
        business_id: Uuid,
        used: bool,
    }

    impl MockDirectory {
        fn with_business(business: Business) -> Self {
            let mut businesses = HashMap::new();
            businesses.insert(business.id, business);
            MockDirectory {
                businesses,
                tokens: Mutex::new(HashMap::new()),
            }
        }

        fn issue(&self, business_id: Uuid) -> Uuid {
            let token = Uuid::new_v4();
            self.tokens.lock().unwrap().insert(
                token,
                TokenState {
                    business_id,
                    used: false,
                },
            );
            token
        }
    }

    impl Directory for MockDirectory {
        async fn fetch_profile(&self, _profile_id: Uuid) -> Res<Option<Profile>> {
            Ok(None)
        }

        async fn fetch_business(&self, business_id: Uuid) -> Res<Option<Business>> {
            Ok(self.businesses.get(&business_id).cloned())
        }

        async fn redeem_impersonation_token(&self, token: Uuid) -> Res<Option<Uuid>> {
            let mut tokens = self.tokens.lock().unwrap();
            match tokens.get_mut(&token) {
                Some(state) if !state.used => {
                    state.used = true;
                    Ok(Some(state.business_id))
                }
                _ => Ok(None),
            }
        }
    }

    fn business(name: &str) -> Business {
        let now = chrono::Utc::now().naive_utc();
        Business {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: common::misc::slugify(name),
            contact_email: None,
            contact_phone: None,
            subscription_tier: "pro".to_string(),
            subscription_status: "active".to_string(),
            stripe_customer_id: None,
            trial_ends_at: None,
            subscription_ends_at: None,
            onboarding_completed: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn ctx() -> SessionContext<MemorySession> {
        SessionContext::new(MemorySession::new())
    }

    #[tokio::test]
    async fn redemption_writes_the_record_and_targets_the_slugged_dashboard() {
        let acme = business("Acme Grooming");
        let acme_id = acme.id;
        let directory = MockDirectory::with_business(acme);
        let token = directory.issue(acme_id);
        let session = ctx();

        let outcome = redeem_token(&directory, &session, token).await.unwrap();

        assert!(outcome.redirect_to.ends_with("acme-grooming/dashboard"));
        assert_eq!(session.store().get("is_impersonating").as_deref(), Some("true"));
        assert_eq!(
            session.store().get("impersonating_business_id"),
            Some(acme_id.to_string())
        );
        assert_eq!(
            session.store().get("impersonating_business_name").as_deref(),
            Some("Acme Grooming")
        );
    }

    #[tokio::test]
    async fn a_token_redeems_exactly_once() {
        let acme = business("Acme Grooming");
        let acme_id = acme.id;
        let directory = MockDirectory::with_business(acme);
        let token = directory.issue(acme_id);

        redeem_token(&directory, &ctx(), token).await.unwrap();
        let second = redeem_token(&directory, &ctx(), token).await;

        assert!(matches!(second, Err(AppError::TokenRedemption(_))));
    }

    #[tokio::test]
    async fn an_unknown_token_fails_the_flow_only() {
        let directory = MockDirectory::with_business(business("Acme Grooming"));
        let outcome = redeem_token(&directory, &ctx(), Uuid::new_v4()).await;
        assert!(matches!(outcome, Err(AppError::TokenRedemption(_))));
    }

    #[tokio::test]
    async fn a_vanished_business_fails_the_flow() {
        let acme = business("Acme Grooming");
        let directory = MockDirectory::with_business(acme);
        // token points at a business the directory does not know
        let token = directory.issue(Uuid::new_v4());

        let outcome = redeem_token(&directory, &ctx(), token).await;
        assert!(matches!(outcome, Err(AppError::TokenRedemption(_))));
    }

    #[tokio::test]
    async fn exit_clears_the_record_and_resolution_falls_back() {
        let acme = business("Acme Grooming");
        let acme_id = acme.id;
        let directory = MockDirectory::with_business(acme);
        let token = directory.issue(acme_id);
        let session = ctx();
        let own_business = Uuid::new_v4();

        redeem_token(&directory, &session, token).await.unwrap();
        assert_eq!(session.resolve_business_id(Some(own_business)), Some(acme_id));

        let outcome = exit_impersonation(&session);

        assert_eq!(outcome.redirect_to, "/admin");
        assert_eq!(session.store().get("is_impersonating"), None);
        assert_eq!(session.resolve_business_id(Some(own_business)), Some(own_business));
    }
}
