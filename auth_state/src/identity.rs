use common::{
    error::{AppError, Res},
    identity::{Identity, IdentityClaims},
};
use uuid::Uuid;

/// Change notification from the identity provider. Events are processed in
/// emission order for generation counting even though the network
/// completions they trigger may reorder.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    SignedIn(Identity),
    TokenRefreshed(Identity),
    SignedOut,
}

/// The external identity provider as this service consumes it. Identities
/// are observed, never created or mutated here.
pub trait IdentityService {
    /// The currently authenticated principal, if any. An `Err` from this
    /// query is the only propagated collaborator failure, and callers treat
    /// it identically to "no identity".
    fn current_session(&self) -> impl Future<Output = Res<Option<Identity>>>;

    /// Revokes the session upstream. Best-effort; callers log and continue.
    fn sign_out(&self) -> impl Future<Output = Res<()>>;
}

/// Identity already proven by the request's validated bearer claims. No
/// network round trip; this is the override path of `hydrate`.
pub struct BearerIdentity {
    identity: Option<Identity>,
}

impl BearerIdentity {
    pub fn new(identity: Option<Identity>) -> Self {
        BearerIdentity { identity }
    }

    pub fn from_claims(claims: Option<IdentityClaims>) -> Self {
        BearerIdentity {
            identity: claims.map(Identity::from),
        }
    }
}

impl IdentityService for BearerIdentity {
    async fn current_session(&self) -> Res<Option<Identity>> {
        Ok(self.identity.clone())
    }

    async fn sign_out(&self) -> Res<()> {
        Ok(())
    }
}

/// REST client for the hosted identity provider. Used when the deployment
/// wants tokens re-verified upstream instead of trusted from the local
/// signature check, and for sign-out revocation.
pub struct HttpIdentity {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpIdentity {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        HttpIdentity {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }
}

impl IdentityService for HttpIdentity {
    async fn current_session(&self) -> Res<Option<Identity>> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            // a rejected token is an anonymous session, not a failure
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "identity provider returned {}",
                status
            )));
        }

        let user: serde_json::Value = response.json().await?;
        let id = user["id"]
            .as_str()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| {
                AppError::Internal("identity provider response had no usable id".to_string())
            })?;
        let email = user["email"].as_str().unwrap_or("").to_string();

        Ok(Some(Identity { id, email }))
    }

    async fn sign_out(&self) -> Res<()> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Internal(format!(
                "identity provider sign-out returned {}",
                response.status()
            )))
        }
    }
}
