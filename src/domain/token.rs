use uuid::Uuid;

// Cookie carrying the manager session token.
pub const SESSION_COOKIE_NAME: &str = "manager_session";

// Pull the session token out of a raw `Cookie` header value.
//
// Pairs are split on the first `=` only, so values may contain `=`. An empty
// value counts as no token.
pub fn extract_token(cookie_header: Option<&str>) -> Option<String> {
    cookie_header?
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, value)| name.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
        .map(|(_, value)| value.trim().to_string())
}

// Issue a new opaque session token backed by the OS random source.
pub fn issue_token() -> String {
    Uuid::new_v4().simple().to_string()
}
