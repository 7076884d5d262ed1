use std::time::Duration;

use common::identity::Identity;
use db::models::{business::Business, profile::Profile};
use uuid::Uuid;

use crate::directory::Directory;

/// Bound applied independently to the profile fetch and the business fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches the profile for an identity within `bound`. Timeout and fetch
/// errors both degrade to `None`; the identity itself stays valid.
pub async fn resolve_profile<D: Directory>(
    directory: &D,
    identity_id: Uuid,
    bound: Duration,
) -> Option<Profile> {
    match tokio::time::timeout(bound, directory.fetch_profile(identity_id)).await {
        Ok(Ok(profile)) => profile,
        Ok(Err(err)) => {
            log::warn!("profile fetch for {} failed: {}", identity_id, err);
            None
        }
        Err(_) => {
            log::warn!("profile fetch for {} exceeded {:?}", identity_id, bound);
            None
        }
    }
}

/// Resolves profile and, when the profile carries a business link, business.
/// The business fetch is only attempted once a linked profile is in hand, so
/// a profile timeout means no business round trip at all.
pub async fn resolve<D: Directory>(
    directory: &D,
    identity: &Identity,
    bound: Duration,
) -> (Option<Profile>, Option<Business>) {
    let profile = resolve_profile(directory, identity.id, bound).await;

    let business = match profile.as_ref().and_then(|p| p.business_id) {
        Some(business_id) => {
            match tokio::time::timeout(bound, directory.fetch_business(business_id)).await {
                Ok(Ok(business)) => business,
                Ok(Err(err)) => {
                    log::warn!("business fetch for {} failed: {}", business_id, err);
                    None
                }
                Err(_) => {
                    log::warn!("business fetch for {} exceeded {:?}", business_id, bound);
                    None
                }
            }
        }
        None => {
            if let Some(profile) = profile.as_ref() {
                // provisioning gap, not an error: signup has not linked a
                // tenant to this account yet
                log::info!("profile {} has no business link", profile.id);
            }
            None
        }
    };

    (profile, business)
}
