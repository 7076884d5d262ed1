use std::sync::Arc;

use actix_session::Session;
use actix_web::{HttpRequest, Responder, get, post, web};
use auth_state::{BearerIdentity, HttpIdentity};
use common::env_config::Config;
use common::error::Res;
use common::http::Success;
use common::identity::IdentityClaims;
use session::{CookieSession, SessionContext};
use sqlx::PgPool;

use crate::services::bootstrap;

/// Bootstraps the frontend shell: hydrates auth state for the caller and
/// returns the snapshot together with impersonation state, the coarse
/// session kind and the last remembered route.
///
/// Anonymous callers get a 200 with an empty snapshot — not signed in is a
/// valid state, not an error.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/session', {
///   headers: { 'Authorization': `Bearer ${accessToken}` },
///   credentials: 'include' // session cookie carries impersonation state
/// });
/// const data = await response.json();
/// if (data.identity) {
///   console.log('Signed in as', data.identity.email);
///   if (data.last_route) router.navigate(data.last_route);
/// } else {
///   // show the landing page with a login link; do not redirect
/// }
/// ```
#[get("/session")]
async fn get_session(
    req: HttpRequest,
    session: Session,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let config: &Config = &config;
    let ctx = SessionContext::new(CookieSession::new(session));
    let pool = pool.get_ref().clone();

    let response = if config.identity.verify_remote {
        match bearer_token(&req) {
            Some(token) => {
                let identity = HttpIdentity::new(&config.identity.provider_url, &token);
                bootstrap::bootstrap(identity, pool, ctx, config).await?
            }
            None => bootstrap::bootstrap(BearerIdentity::new(None), pool, ctx, config).await?,
        }
    } else {
        bootstrap::bootstrap(BearerIdentity::from_claims(claims(&req)), pool, ctx, config).await?
    };

    Success::ok(response)
}

/// Ends the session: best-effort token revocation upstream, then the local
/// sign-out transition, which also wipes every session flag (impersonation
/// included).
#[post("/signout")]
async fn post_signout(
    req: HttpRequest,
    session: Session,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let config: &Config = &config;
    let ctx = SessionContext::new(CookieSession::new(session));
    let directory = auth_state::PgDirectory::new(pool.get_ref().clone());

    match bearer_token(&req) {
        Some(token) => {
            let identity = HttpIdentity::new(&config.identity.provider_url, &token);
            auth_state::AuthStateController::new(identity, directory, ctx)
                .sign_out()
                .await;
        }
        None => {
            auth_state::AuthStateController::new(BearerIdentity::new(None), directory, ctx)
                .sign_out()
                .await;
        }
    }

    Success::no_content()
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|token| token.to_owned()))
}

fn claims(req: &HttpRequest) -> Option<IdentityClaims> {
    common::identity::get_identity_claims(req).and_then(|res| res.ok())
}
