use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::web::{self};

pub mod routes {
    pub mod session;
}

mod services {
    pub(crate) mod bootstrap;
}

mod dtos {
    pub(crate) mod session;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::session::get_session)
        .service(routes::session::post_signout)
}

/// Cookie session carrying the session-store flags. No TTL: the cookie dies
/// with the browser session, which is exactly the lifetime impersonation
/// state is supposed to have.
///
/// # Panics
///
/// Panics if `secret` is shorter than 64 bytes.
pub fn session_middleware(cookie_secure: bool, secret: &[u8]) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(secret))
        .cookie_name("groomdesk_session".to_string())
        .cookie_secure(cookie_secure)
        .cookie_same_site(SameSite::Lax)
        .cookie_http_only(true)
        .build()
}
