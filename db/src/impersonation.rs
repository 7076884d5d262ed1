use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::impersonation::TokenCreateRequest, models::impersonation::ImpersonationToken};

pub async fn insert_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: TokenCreateRequest,
) -> Res<ImpersonationToken> {
    sqlx::query_as::<_, ImpersonationToken>(
        r#"
        INSERT INTO impersonation_tokens (token, business_id, issued_by, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(data.business_id)
    .bind(data.issued_by)
    .bind(data.expires_at)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Atomic single-use exchange: marks the token used and returns its business
/// in one statement. A second redemption, an expired token, or an unknown
/// token all come back as `None` — the caller cannot tell which, and does
/// not need to.
pub async fn redeem_token<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    token: Uuid,
) -> Res<Option<Uuid>> {
    let business_id: Option<(Uuid,)> = sqlx::query_as(
        r#"
        UPDATE impersonation_tokens
        SET used_at = now()
        WHERE token = $1
          AND used_at IS NULL
          AND expires_at > now()
        RETURNING business_id
        "#,
    )
    .bind(token)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)?;

    Ok(business_id.map(|row| row.0))
}
