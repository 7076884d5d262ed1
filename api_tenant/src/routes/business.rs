use std::sync::Arc;

use actix_session::Session;
use actix_web::{HttpRequest, Responder, get, put, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::identity::require_identity_claims;
use session::{CookieSession, SessionContext};
use sqlx::PgPool;

use crate::dtos::business::UpdateSettingsRequest;
use crate::services;

/// The business the caller currently operates against, resolved
/// impersonation-first: an administrator in a support session sees the
/// impersonated tenant here, never their own (absent) business link.
#[get("")]
async fn get_current(
    req: HttpRequest,
    session: Session,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let claims = require_identity_claims(&req)?;
    let ctx = SessionContext::new(CookieSession::new(session));

    let profile = db::profile::get_profile_by_id(pg_pool, claims.sub).await?;
    let business_id = ctx
        .resolve_business_id(profile.and_then(|p| p.business_id))
        .ok_or_else(|| {
            AppError::NotFound("No business is provisioned for this account".to_string())
        })?;

    let business = db::business::get_business_by_id(pg_pool, business_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("business {}", business_id)))?;

    Success::ok(business)
}

/// Public slug lookup; this is how the demo tenant and deep links resolve.
#[get("/business/{slug}")]
async fn get_by_slug(path: web::Path<String>, pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let slug = path.into_inner();
    let business = db::business::get_business_by_slug(pg_pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("business {}", slug)))?;
    Success::ok(business)
}

/// Tenant-admin settings edit. Uses the same impersonation-first resolution
/// as reads, so a support session edits the tenant it is viewing.
#[put("/settings")]
async fn put_settings(
    req: HttpRequest,
    session: Session,
    body: web::Json<UpdateSettingsRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let claims = require_identity_claims(&req)?;
    let ctx = SessionContext::new(CookieSession::new(session));

    let profile = db::profile::get_profile_by_id(pg_pool, claims.sub).await?;
    let business_id = ctx
        .resolve_business_id(profile.and_then(|p| p.business_id))
        .ok_or_else(|| {
            AppError::NotFound("No business is provisioned for this account".to_string())
        })?;

    let updated = services::business::update_settings(pg_pool, business_id, body.into_inner()).await?;
    // keep the routing hint in step with a possible rename
    ctx.set_business_slug(&updated.slug);

    Success::ok(updated)
}
