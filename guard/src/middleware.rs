use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures::future::{Ready, ok};
use sqlx::PgPool;

use auth_state::{AuthSnapshot, PgDirectory, resolver};
use common::{
    env_config::Config,
    identity::{Identity, get_identity_claims},
};

use crate::decision::{RouteDecision, RouteRequest, decide};
use crate::memory;

pub struct GuardMiddleware {
    require_admin: bool,
    public_prefixes: Arc<Vec<String>>,
}

impl GuardMiddleware {
    pub fn new(require_admin: bool, public_prefixes: Vec<String>) -> Self {
        GuardMiddleware {
            require_admin,
            public_prefixes: Arc::new(public_prefixes),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for GuardMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = GuardMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(GuardMiddlewareService {
            service: Arc::new(service),
            require_admin: self.require_admin,
            public_prefixes: Arc::clone(&self.public_prefixes),
        })
    }
}

pub struct GuardMiddlewareService<S> {
    service: Arc<S>,
    require_admin: bool,
    public_prefixes: Arc<Vec<String>>,
}

impl<S, B> Service<ServiceRequest> for GuardMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let require_admin = self.require_admin;
        let public_prefixes = Arc::clone(&self.public_prefixes);
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            let identity = get_identity_claims(&req)
                .and_then(|res| res.ok())
                .map(Identity::from);

            let pool = req
                .app_data::<web::Data<Arc<PgPool>>>()
                .unwrap()
                .get_ref()
                .clone();
            let config = req
                .app_data::<web::Data<Arc<Config>>>()
                .unwrap()
                .get_ref()
                .clone();

            // The decision only needs identity presence and the admin flag,
            // so the business fetch is skipped here.
            let snapshot = match identity {
                Some(identity) => {
                    let directory = PgDirectory::new(pool.clone());
                    let profile =
                        resolver::resolve_profile(&directory, identity.id, config.fetch_timeout)
                            .await;
                    AuthSnapshot::ready(identity, profile, None)
                }
                None => AuthSnapshot::anonymous(),
            };

            let path = req.path().to_string();
            let decision = decide(
                &RouteRequest {
                    path: &path,
                    require_admin,
                },
                &snapshot,
                &public_prefixes,
            );

            match decision {
                RouteDecision::Render => {
                    // The SPA reports the view it is rendering; API paths
                    // themselves are not views and are never remembered.
                    let app_route = req
                        .headers()
                        .get("X-App-Route")
                        .and_then(|value| value.to_str().ok())
                        .map(|route| route.to_string());
                    let profile_id = snapshot.profile.as_ref().map(|p| p.id);
                    let res = srv.call(req).await?;
                    if res.status().is_success() {
                        if let (Some(profile_id), Some(route)) = (profile_id, app_route) {
                            memory::remember(pool, profile_id, route);
                        }
                    }
                    Ok(res.map_into_boxed_body())
                }
                // the snapshot here is always resolved, but the mapping
                // exists for completeness
                RouteDecision::Waiting => {
                    let response = HttpResponse::ServiceUnavailable()
                        .insert_header(("Retry-After", "1"))
                        .json(serde_json::json!({ "status": "loading" }))
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
                RouteDecision::NotAuthenticated => {
                    let response = HttpResponse::Unauthorized()
                        .json(serde_json::json!({
                            "error": "Not authenticated",
                            "login": "/login",
                        }))
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
                RouteDecision::RedirectToRoot => {
                    let response = HttpResponse::SeeOther()
                        .insert_header((actix_web::http::header::LOCATION, "/"))
                        .finish()
                        .map_into_boxed_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}
