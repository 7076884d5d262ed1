use std::fmt;

// Writers own disjoint keys; sharing one would let unrelated flows clobber
// each other's state.
pub const IS_IMPERSONATING: &str = "is_impersonating";
pub const IMPERSONATING_BUSINESS_ID: &str = "impersonating_business_id";
pub const IMPERSONATING_BUSINESS_NAME: &str = "impersonating_business_name";
pub const AUTH_CONTEXT: &str = "authContext";
pub const DEMO_MODE: &str = "demoMode";
pub const BUSINESS_SLUG: &str = "business_slug";
pub const DISPLAY_LANGUAGE: &str = "display_language";

/// Coarse kind of the current session, shown in headers and used by the
/// frontend to pick its shell layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthContextKind {
    Admin,
    Business,
    Demo,
    #[default]
    None,
}

impl AuthContextKind {
    /// Absent or unrecognized values read as `None`; a stale or corrupted
    /// key must never be an error.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("admin") => AuthContextKind::Admin,
            Some("business") => AuthContextKind::Business,
            Some("demo") => AuthContextKind::Demo,
            _ => AuthContextKind::None,
        }
    }
}

impl fmt::Display for AuthContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthContextKind::Admin => "admin",
            AuthContextKind::Business => "business",
            AuthContextKind::Demo => "demo",
            AuthContextKind::None => "none",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::AuthContextKind;

    #[test]
    fn parses_known_kinds_and_defaults_the_rest() {
        assert_eq!(AuthContextKind::parse(Some("admin")), AuthContextKind::Admin);
        assert_eq!(
            AuthContextKind::parse(Some("business")),
            AuthContextKind::Business
        );
        assert_eq!(AuthContextKind::parse(Some("demo")), AuthContextKind::Demo);
        assert_eq!(AuthContextKind::parse(Some("garbage")), AuthContextKind::None);
        assert_eq!(AuthContextKind::parse(None), AuthContextKind::None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in [
            AuthContextKind::Admin,
            AuthContextKind::Business,
            AuthContextKind::Demo,
        ] {
            assert_eq!(AuthContextKind::parse(Some(&kind.to_string())), kind);
        }
    }
}
