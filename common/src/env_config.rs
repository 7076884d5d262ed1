use std::{env, sync::Arc, time::Duration};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// Holds everything needed to bootstrap the service: database connection,
/// identity-provider settings, session cookie secret, server binding, CORS
/// origin, logging preferences and the bounded-fetch policy used while
/// hydrating auth state.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Settings for the hosted identity provider this service trusts.
    pub identity: IdentityConfig,
    /// Secret used to sign the session cookie. Must be at least 64 bytes.
    pub session_secret: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Path prefix rendered without authentication; the public demo tenant
    /// lives under it.
    pub public_path_prefix: String,
    /// Bounded wait applied independently to the profile and business
    /// fetches during hydration. A timeout degrades the field, never the
    /// whole hydration.
    pub fetch_timeout: Duration,
}

#[derive(Clone, Debug)]
/// Settings for the external identity provider.
///
/// The provider issues bearer JWTs signed with a shared secret; this service
/// only observes identities, it never creates or mutates them.
pub struct IdentityConfig {
    /// Shared secret the provider signs access tokens with.
    pub jwt_secret: String,
    /// Base URL of the provider's REST surface (session introspection and
    /// sign-out revocation).
    pub provider_url: String,
    /// When true, `GET /session` re-verifies the bearer token against the
    /// provider instead of trusting the locally validated claims.
    pub verify_remote: bool,
}

impl IdentityConfig {
    /// Reads the identity-provider configuration from environment variables:
    /// - `IDENTITY_JWT_SECRET`: Required.
    /// - `IDENTITY_PROVIDER_URL`: Optional, defaults to a local provider.
    /// - `IDENTITY_VERIFY_REMOTE`: Optional, defaults to false.
    ///
    /// # Panics
    ///
    /// Panics if `IDENTITY_JWT_SECRET` is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        IdentityConfig {
            jwt_secret: env::var("IDENTITY_JWT_SECRET").expect("IDENTITY_JWT_SECRET must be set"),
            provider_url: env::var("IDENTITY_PROVIDER_URL")
                .unwrap_or_else(|_| "http://localhost:9999/auth/v1".to_string()),
            verify_remote: env::var("IDENTITY_VERIFY_REMOTE")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                == "true",
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `ENVIRONMENT`: "development" or "production"
    /// - `DATABASE_URL`: Connection string for the database
    /// - `IDENTITY_JWT_SECRET`: Shared secret of the identity provider
    /// - `SESSION_SECRET`: Session cookie signing key (>= 64 bytes)
    ///
    /// Optional (with defaults):
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `PUBLIC_PATH_PREFIX`: Unauthenticated prefix (default: "/api/app/public")
    /// - `FETCH_TIMEOUT_SECS`: Profile/business fetch bound (default: 5)
    ///
    /// # Panics
    ///
    /// Panics if required environment variables are missing.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            identity: IdentityConfig::from_env(),
            session_secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            public_path_prefix: env::var("PUBLIC_PATH_PREFIX")
                .unwrap_or_else(|_| "/api/app/public".to_string()),
            fetch_timeout: Duration::from_secs(
                env::var("FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),
        })
    }
}
