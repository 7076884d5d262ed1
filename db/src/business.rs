use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::business::BusinessSettingsUpdate, models::business::Business};

pub async fn get_business_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    business_id: Uuid,
) -> Res<Option<Business>> {
    sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = $1")
        .bind(business_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_business_by_slug<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    slug: &str,
) -> Res<Option<Business>> {
    sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE slug = $1")
        .bind(slug)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn update_business_settings<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: BusinessSettingsUpdate,
) -> Res<Business> {
    sqlx::query_as::<_, Business>(
        r#"
        UPDATE businesses
        SET name = $2,
            slug = $3,
            contact_email = $4,
            contact_phone = $5,
            onboarding_completed = $6,
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(data.id)
    .bind(data.name)
    .bind(data.slug)
    .bind(data.contact_email)
    .bind(data.contact_phone)
    .bind(data.onboarding_completed)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
