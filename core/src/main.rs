mod cors;

use actix_web::{
    App, HttpServer,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();
    let cookie_secure = !origin.contains("localhost");

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    HttpServer::new(move || {
        let secret = config_data.session_secret.as_bytes();
        let public_prefixes = vec![config_data.public_path_prefix.clone()];
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .wrap(logger::middleware()) // 4th
            .wrap(extractor::middleware()) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(api_auth::session_middleware(cookie_secure, secret)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_tenant::mount_prefs())
                    .service(
                        web::scope("/app")
                            .wrap(guard::middleware(public_prefixes))
                            .service(api_tenant::mount_public())
                            .service(api_tenant::mount_business()),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(guard::admin_middleware())
                            .service(api_admin::mount_impersonation()),
                    ),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
