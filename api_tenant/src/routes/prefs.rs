use actix_session::Session;
use actix_web::{Responder, put, web};
use common::error::Res;
use common::http::Success;
use serde_json::json;
use session::{AuthContextKind, CookieSession, SessionContext};

use crate::dtos::prefs::{DemoModeRequest, LanguageRequest};

/// Stores the display language. A session flag, not a profile field: the
/// choice follows the browser session, including anonymous ones.
#[put("/language")]
async fn put_language(session: Session, body: web::Json<LanguageRequest>) -> Res<impl Responder> {
    let ctx = SessionContext::new(CookieSession::new(session));
    ctx.set_display_language(&body.language);
    Success::ok(json!({ "language": body.language }))
}

/// Toggles the public demo tenant. The coarse session kind follows the
/// toggle; the next session bootstrap recomputes it from the real snapshot.
#[put("/demo")]
async fn put_demo_mode(session: Session, body: web::Json<DemoModeRequest>) -> Res<impl Responder> {
    let ctx = SessionContext::new(CookieSession::new(session));
    ctx.set_demo_mode(body.enabled);
    if body.enabled {
        ctx.set_auth_context(AuthContextKind::Demo);
    } else {
        ctx.set_auth_context(AuthContextKind::None);
    }
    Success::ok(json!({ "demo_mode": body.enabled }))
}
