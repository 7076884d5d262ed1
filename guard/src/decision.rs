use auth_state::AuthSnapshot;

/// What the guard knows about the navigation being attempted.
pub struct RouteRequest<'a> {
    pub path: &'a str,
    /// Carried by the route definition, not derived from the path.
    pub require_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the view render.
    Render,
    /// Hydration still in flight: show a neutral waiting state. Never a
    /// redirect — redirecting mid-hydration causes redirect loops.
    Waiting,
    /// No identity: a static message with a manual link. Deliberately not a
    /// redirect, and deliberately asymmetric with the wrong-role case below.
    NotAuthenticated,
    /// Authenticated but lacking the admin role: send to the application
    /// root.
    RedirectToRoot,
}

/// Decides whether the current navigation may render.
pub fn decide(
    route: &RouteRequest<'_>,
    snapshot: &AuthSnapshot,
    public_prefixes: &[String],
) -> RouteDecision {
    if !route.require_admin && is_public(route.path, public_prefixes) {
        return RouteDecision::Render;
    }
    if snapshot.loading {
        return RouteDecision::Waiting;
    }
    if !snapshot.is_authenticated() {
        return RouteDecision::NotAuthenticated;
    }
    if route.require_admin && !snapshot.is_admin {
        return RouteDecision::RedirectToRoot;
    }
    RouteDecision::Render
}

fn is_public(path: &str, public_prefixes: &[String]) -> bool {
    public_prefixes
        .iter()
        .any(|prefix| path == prefix || path.starts_with(&format!("{}/", prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::identity::Identity;
    use uuid::Uuid;

    fn anonymous() -> AuthSnapshot {
        AuthSnapshot::anonymous()
    }

    fn authenticated(is_admin: bool) -> AuthSnapshot {
        let mut snapshot = AuthSnapshot::anonymous();
        snapshot.identity = Some(Identity {
            id: Uuid::new_v4(),
            email: "user@acmegrooming.test".to_string(),
        });
        snapshot.is_admin = is_admin;
        snapshot
    }

    fn demo_prefixes() -> Vec<String> {
        vec!["/demo".to_string()]
    }

    #[test]
    fn never_redirects_while_loading() {
        // for all paths and all field combinations, loading wins
        let mut loading = authenticated(true);
        loading.loading = true;
        let mut loading_anonymous = anonymous();
        loading_anonymous.loading = true;

        for snapshot in [&loading, &loading_anonymous] {
            for path in ["/", "/admin", "/acme-grooming/dashboard", "/login"] {
                for require_admin in [false, true] {
                    let decision = decide(
                        &RouteRequest { path, require_admin },
                        snapshot,
                        &demo_prefixes(),
                    );
                    assert_eq!(decision, RouteDecision::Waiting, "path {}", path);
                }
            }
        }
    }

    #[test]
    fn public_demo_path_renders_unconditionally() {
        for snapshot in [
            anonymous(),
            authenticated(false),
            {
                let mut s = anonymous();
                s.loading = true;
                s
            },
        ] {
            let decision = decide(
                &RouteRequest {
                    path: "/demo/dashboard",
                    require_admin: false,
                },
                &snapshot,
                &demo_prefixes(),
            );
            assert_eq!(decision, RouteDecision::Render);
        }
    }

    #[test]
    fn public_prefix_does_not_leak_onto_lookalike_paths() {
        let decision = decide(
            &RouteRequest {
                path: "/demographics",
                require_admin: false,
            },
            &anonymous(),
            &demo_prefixes(),
        );
        assert_eq!(decision, RouteDecision::NotAuthenticated);
    }

    #[test]
    fn anonymous_on_an_admin_route_gets_a_static_state_not_a_redirect() {
        let decision = decide(
            &RouteRequest {
                path: "/admin",
                require_admin: true,
            },
            &anonymous(),
            &demo_prefixes(),
        );
        assert_eq!(decision, RouteDecision::NotAuthenticated);
    }

    #[test]
    fn authenticated_non_admin_on_an_admin_route_redirects_to_root() {
        let decision = decide(
            &RouteRequest {
                path: "/admin",
                require_admin: true,
            },
            &authenticated(false),
            &demo_prefixes(),
        );
        assert_eq!(decision, RouteDecision::RedirectToRoot);
    }

    #[test]
    fn admin_renders_admin_routes() {
        let decision = decide(
            &RouteRequest {
                path: "/admin",
                require_admin: true,
            },
            &authenticated(true),
            &demo_prefixes(),
        );
        assert_eq!(decision, RouteDecision::Render);
    }

    #[test]
    fn authenticated_user_renders_tenant_routes() {
        let decision = decide(
            &RouteRequest {
                path: "/acme-grooming/dashboard",
                require_admin: false,
            },
            &authenticated(false),
            &demo_prefixes(),
        );
        assert_eq!(decision, RouteDecision::Render);
    }
}
