use actix_web::web;

pub mod routes {
    pub mod business;
    pub mod prefs;
}

mod services {
    pub(crate) mod business;
}

mod dtos {
    pub(crate) mod business;
    pub(crate) mod prefs;
}

/// Tenant-scoped surface; mounted behind the route guard.
pub fn mount_business() -> actix_web::Scope {
    web::scope("/business")
        .service(routes::business::get_current)
        .service(routes::business::put_settings)
}

/// Slug lookup stays public so the demo tenant resolves without a session.
pub fn mount_public() -> actix_web::Scope {
    web::scope("/public").service(routes::business::get_by_slug)
}

pub fn mount_prefs() -> actix_web::Scope {
    web::scope("/prefs")
        .service(routes::prefs::put_language)
        .service(routes::prefs::put_demo_mode)
}
