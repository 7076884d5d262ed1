use actix_web::web;

pub mod routes {
    pub mod impersonation;
}

mod services {
    pub(crate) mod impersonation;
}

mod dtos {
    pub(crate) mod impersonation;
}

/// Admin-only surface; the caller's role is enforced by the route guard at
/// mount time.
pub fn mount_impersonation() -> actix_web::Scope {
    web::scope("/impersonation")
        .service(routes::impersonation::post_issue)
        .service(routes::impersonation::post_redeem)
        .service(routes::impersonation::post_exit)
}
