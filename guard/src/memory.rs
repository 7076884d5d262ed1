use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

/// Whether a path belongs in route memory. The landing page and the login
/// flow are never remembered; restoring into either would be wrong.
pub fn is_memorable(path: &str) -> bool {
    if path == "/" {
        return false;
    }
    if path == "/login" || path.starts_with("/login/") {
        return false;
    }
    true
}

/// Persists the last visited route for reload/new-tab restoration.
/// Fire-and-forget: rendering never waits on this write, and a failure is
/// only worth a debug line.
pub fn remember(pool: Arc<PgPool>, profile_id: Uuid, full_path: String) {
    if !is_memorable(&full_path_path_part(&full_path)) {
        return;
    }
    tokio::spawn(async move {
        if let Err(err) = db::route_memory::upsert_last_route(&*pool, profile_id, &full_path).await
        {
            log::debug!("route memory write for {} failed: {}", profile_id, err);
        }
    });
}

/// Route memory stores path + query, but memorability is judged on the path
/// alone: "/?tab=pets" is still the landing page.
fn full_path_path_part(full_path: &str) -> String {
    match full_path.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => full_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{full_path_path_part, is_memorable};

    #[test]
    fn never_remembers_the_landing_page_or_login() {
        assert!(!is_memorable("/"));
        assert!(!is_memorable("/login"));
        assert!(!is_memorable("/login/callback"));
    }

    #[test]
    fn remembers_application_paths() {
        assert!(is_memorable("/acme-grooming/dashboard"));
        assert!(is_memorable("/acme-grooming/appointments"));
        assert!(is_memorable("/admin"));
        // a path that merely starts with the word login is fine
        assert!(is_memorable("/loginopolis"));
    }

    #[test]
    fn memorability_ignores_the_query_string() {
        assert!(!is_memorable(&full_path_path_part("/?tab=pets")));
        assert!(!is_memorable(&full_path_path_part("/login?next=billing")));
        assert!(is_memorable(&full_path_path_part(
            "/acme-grooming/appointments?week=2026-08-03"
        )));
    }
}
