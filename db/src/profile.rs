use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::profile::Profile;

/// Absence is a valid outcome: an identity whose signup has not finished
/// provisioning yet has no profile row.
pub async fn get_profile_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    profile_id: Uuid,
) -> Res<Option<Profile>> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(profile_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_profile_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<Profile>> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}
