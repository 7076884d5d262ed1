use common::error::{AppError, Res};
use common::misc::slugify;
use db::{dtos::business::BusinessSettingsUpdate, models::business::Business};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::business::UpdateSettingsRequest;

/// Applies a tenant-admin settings edit. The slug follows the name: a rename
/// recomputes it, anything else leaves existing links working.
pub async fn update_settings(
    pool: &PgPool,
    business_id: Uuid,
    req: UpdateSettingsRequest,
) -> Res<Business> {
    let current = db::business::get_business_by_id(pool, business_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("business {}", business_id)))?;

    let slug = slug_after_rename(&current.name, &current.slug, &req.name);

    db::business::update_business_settings(
        pool,
        BusinessSettingsUpdate {
            id: business_id,
            name: req.name,
            slug,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            onboarding_completed: req.onboarding_completed,
        },
    )
    .await
}

pub(crate) fn slug_after_rename(current_name: &str, current_slug: &str, new_name: &str) -> String {
    if new_name == current_name {
        current_slug.to_string()
    } else {
        slugify(new_name)
    }
}

#[cfg(test)]
mod tests {
    use super::slug_after_rename;

    #[test]
    fn rename_recomputes_the_slug() {
        assert_eq!(
            slug_after_rename("Acme Grooming", "acme-grooming", "Acme Pet Spa"),
            "acme-pet-spa"
        );
    }

    #[test]
    fn unchanged_name_keeps_the_existing_slug() {
        // even a hand-assigned slug survives as long as the name stands
        assert_eq!(
            slug_after_rename("Acme Grooming", "acme", "Acme Grooming"),
            "acme"
        );
    }
}
