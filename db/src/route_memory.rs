use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

/// Remembers the last non-landing path an authenticated user visited, for
/// restoration after a reload or in a new tab. One row per profile.
pub async fn upsert_last_route<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    profile_id: Uuid,
    path: &str,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO route_memory (profile_id, path, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (profile_id)
        DO UPDATE SET path = EXCLUDED.path, updated_at = now()
        "#,
    )
    .bind(profile_id)
    .bind(path)
    .execute(executor)
    .await
    .map_err(AppError::from)?;
    Ok(())
}

pub async fn get_last_route<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    profile_id: Uuid,
) -> Res<Option<String>> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT path FROM route_memory WHERE profile_id = $1")
            .bind(profile_id)
            .fetch_optional(executor)
            .await
            .map_err(AppError::from)?;
    Ok(row.map(|r| r.0))
}
