use actix_web::HttpMessage;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Res};

/// Claims carried by the identity provider's access token. The provider owns
/// these; this service only validates and reads them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentityClaims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

/// An authenticated principal as observed from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Identity {
            id: claims.sub,
            email: claims.email,
        }
    }
}

/// Extracts claims from an access token issued by the identity provider.
/// Requires the provider's shared JWT secret.
pub fn validate_identity_token(token: &str, secret: &str) -> Res<IdentityClaims> {
    let token_data = jsonwebtoken::decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Reads the claims the extraction middleware stashed on the request.
/// Absent claims mean the request carried no bearer token at all. Works for
/// both `ServiceRequest` (middleware) and `HttpRequest` (handlers).
pub fn get_identity_claims<M: HttpMessage>(msg: &M) -> Option<Res<IdentityClaims>> {
    msg.extensions().get::<Res<IdentityClaims>>().map(|res| {
        res.as_ref()
            .map(|claims| claims.clone())
            .map_err(|err| AppError::Unauthorized(err.to_string()))
    })
}

/// Claims for a handler that requires an authenticated caller.
pub fn require_identity_claims<M: HttpMessage>(msg: &M) -> Res<IdentityClaims> {
    get_identity_claims(msg)
        .unwrap_or_else(|| Err(AppError::Unauthorized("No authorization token provided".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    fn token_for(claims: &IdentityClaims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn validates_a_provider_signed_token() {
        let claims = IdentityClaims {
            sub: Uuid::new_v4(),
            email: "owner@acmegrooming.test".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = token_for(&claims, "secret");

        let validated = validate_identity_token(&token, "secret").unwrap();
        assert_eq!(validated.sub, claims.sub);
        assert_eq!(validated.email, claims.email);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let claims = IdentityClaims {
            sub: Uuid::new_v4(),
            email: "owner@acmegrooming.test".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        let token = token_for(&claims, "other-secret");

        assert!(validate_identity_token(&token, "secret").is_err());
    }

    #[test]
    fn identity_derives_from_claims() {
        let id = Uuid::new_v4();
        let identity: Identity = IdentityClaims {
            sub: id,
            email: "owner@acmegrooming.test".to_string(),
            exp: 0,
        }
        .into();
        assert_eq!(identity.id, id);
    }
}
