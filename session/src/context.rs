use serde::Serialize;
use uuid::Uuid;

use crate::keys;
use crate::store::SessionStore;

/// Ephemeral impersonation state. Present means active; destroyed on
/// explicit exit or on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpersonationRecord {
    pub business_id: Uuid,
    pub business_name: String,
}

/// Typed view over a [`SessionStore`]. All flows that touch session flags go
/// through these accessors so each concern stays on its own key.
pub struct SessionContext<S> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        SessionContext { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // === IMPERSONATION ===

    /// Reads the impersonation record. A flag without a parsable business id
    /// counts as inactive; a half-written record must not leak a tenant.
    pub fn impersonation(&self) -> Option<ImpersonationRecord> {
        if self.store.get(keys::IS_IMPERSONATING).as_deref() != Some("true") {
            return None;
        }
        let business_id = self
            .store
            .get(keys::IMPERSONATING_BUSINESS_ID)
            .and_then(|raw| Uuid::parse_str(&raw).ok())?;
        let business_name = self
            .store
            .get(keys::IMPERSONATING_BUSINESS_NAME)
            .unwrap_or_default();
        Some(ImpersonationRecord {
            business_id,
            business_name,
        })
    }

    pub fn enter_impersonation(&self, business_id: Uuid, business_name: &str) {
        self.store.set(keys::IS_IMPERSONATING, "true");
        self.store
            .set(keys::IMPERSONATING_BUSINESS_ID, &business_id.to_string());
        self.store
            .set(keys::IMPERSONATING_BUSINESS_NAME, business_name);
    }

    pub fn exit_impersonation(&self) {
        self.store.remove(keys::IS_IMPERSONATING);
        self.store.remove(keys::IMPERSONATING_BUSINESS_ID);
        self.store.remove(keys::IMPERSONATING_BUSINESS_NAME);
    }

    /// The business id tenant-scoped fetches must operate against: the
    /// impersonated tenant when a record is active, else the caller's own
    /// business link. Every data path uses this helper; bypassing it while
    /// impersonating is a data-leak-class bug.
    pub fn resolve_business_id(&self, profile_business_id: Option<Uuid>) -> Option<Uuid> {
        self.impersonation()
            .map(|record| record.business_id)
            .or(profile_business_id)
    }

    // === COARSE SESSION KIND ===

    pub fn auth_context(&self) -> crate::keys::AuthContextKind {
        crate::keys::AuthContextKind::parse(self.store.get(keys::AUTH_CONTEXT).as_deref())
    }

    pub fn set_auth_context(&self, kind: crate::keys::AuthContextKind) {
        self.store.set(keys::AUTH_CONTEXT, &kind.to_string());
    }

    // === DEMO MODE ===

    pub fn demo_mode(&self) -> bool {
        self.store.get(keys::DEMO_MODE).as_deref() == Some("true")
    }

    pub fn set_demo_mode(&self, enabled: bool) {
        if enabled {
            self.store.set(keys::DEMO_MODE, "true");
        } else {
            self.store.remove(keys::DEMO_MODE);
        }
    }

    // === ROUTING HINTS ===

    pub fn business_slug(&self) -> Option<String> {
        self.store.get(keys::BUSINESS_SLUG)
    }

    pub fn set_business_slug(&self, slug: &str) {
        self.store.set(keys::BUSINESS_SLUG, slug);
    }

    pub fn clear_business_slug(&self) {
        self.store.remove(keys::BUSINESS_SLUG);
    }

    // === DISPLAY LANGUAGE ===

    pub fn display_language(&self) -> Option<String> {
        self.store.get(keys::DISPLAY_LANGUAGE)
    }

    pub fn set_display_language(&self, language: &str) {
        self.store.set(keys::DISPLAY_LANGUAGE, language);
    }

    /// Sign-out wipes every session-scoped flag at once.
    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::AuthContextKind;
    use crate::store::{MemorySession, SessionStore};

    fn ctx() -> SessionContext<MemorySession> {
        SessionContext::new(MemorySession::new())
    }

    #[test]
    fn absent_keys_read_as_defaults() {
        let ctx = ctx();
        assert_eq!(ctx.impersonation(), None);
        assert_eq!(ctx.auth_context(), AuthContextKind::None);
        assert!(!ctx.demo_mode());
        assert_eq!(ctx.business_slug(), None);
        assert_eq!(ctx.display_language(), None);
    }

    #[test]
    fn impersonation_record_round_trips() {
        let ctx = ctx();
        let business_id = Uuid::new_v4();
        ctx.enter_impersonation(business_id, "Acme Grooming");

        let record = ctx.impersonation().unwrap();
        assert_eq!(record.business_id, business_id);
        assert_eq!(record.business_name, "Acme Grooming");
        assert_eq!(ctx.store().get("is_impersonating").as_deref(), Some("true"));
    }

    #[test]
    fn exit_clears_the_record_and_resolution_falls_back_to_the_profile() {
        let ctx = ctx();
        let impersonated = Uuid::new_v4();
        let own_business = Uuid::new_v4();

        ctx.enter_impersonation(impersonated, "Acme Grooming");
        assert_eq!(
            ctx.resolve_business_id(Some(own_business)),
            Some(impersonated)
        );

        ctx.exit_impersonation();
        assert_eq!(ctx.store().get("is_impersonating"), None);
        assert_eq!(
            ctx.resolve_business_id(Some(own_business)),
            Some(own_business)
        );
    }

    #[test]
    fn resolution_prefers_the_impersonated_tenant() {
        let ctx = ctx();
        let impersonated = Uuid::new_v4();
        ctx.enter_impersonation(impersonated, "Shaggy Dog");

        assert_eq!(
            ctx.resolve_business_id(Some(Uuid::new_v4())),
            Some(impersonated)
        );
        assert_eq!(ctx.resolve_business_id(None), Some(impersonated));
    }

    #[test]
    fn a_flag_without_a_parsable_business_id_is_inactive() {
        let ctx = ctx();
        ctx.store().set("is_impersonating", "true");
        ctx.store().set("impersonating_business_id", "not-a-uuid");
        assert_eq!(ctx.impersonation(), None);
    }

    #[test]
    fn unprovisioned_profile_resolves_to_no_business() {
        let ctx = ctx();
        assert_eq!(ctx.resolve_business_id(None), None);
    }
}
