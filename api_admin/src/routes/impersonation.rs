use std::sync::Arc;

use actix_session::Session;
use actix_web::{HttpRequest, Responder, post, web};
use auth_state::PgDirectory;
use common::error::Res;
use common::http::Success;
use common::identity::require_identity_claims;
use session::{CookieSession, SessionContext};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::impersonation::IssueTokenRequest;
use crate::services;

/// Generates a single-use, time-bounded impersonation token for a business.
///
/// # Input
/// - `body`: JSON payload naming the target business
///
/// # Output
/// - Success: 201 with the token and a ready-made redeem path
/// - Error: 404 if the business does not exist
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/admin/impersonation/tokens', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ business_id: selectedBusiness.id })
/// });
/// const { redeem_path } = await response.json();
/// window.open(redeem_path); // support session in a fresh tab
/// ```
#[post("/tokens")]
async fn post_issue(
    req: HttpRequest,
    body: web::Json<IssueTokenRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    // role enforcement happened in the admin guard; the claims are only
    // needed for the audit trail of who issued the token
    let claims = require_identity_claims(&req)?;
    let response =
        services::impersonation::issue_token(&pool, claims.sub, body.business_id).await?;
    Success::created(response)
}

/// Exchanges a token for an active impersonation session. A failure response
/// carries `redirect_to` and `redirect_delay_secs` so the frontend can show
/// the message, then fall back to the admin dashboard.
#[post("/redeem/{token}")]
async fn post_redeem(
    path: web::Path<Uuid>,
    session: Session,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let ctx = SessionContext::new(CookieSession::new(session));
    let directory = PgDirectory::new(pool.get_ref().clone());
    let outcome =
        services::impersonation::redeem_token(&directory, &ctx, path.into_inner()).await?;
    Success::ok(outcome)
}

/// Leaves impersonation; wired to the persistent banner every impersonated
/// view shows.
#[post("/exit")]
async fn post_exit(session: Session) -> Res<impl Responder> {
    let ctx = SessionContext::new(CookieSession::new(session));
    Success::ok(services::impersonation::exit_impersonation(&ctx))
}
