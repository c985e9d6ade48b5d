//! Route paths, API endpoints and URL helpers shared by client and API.

/// Landing page, reachable without a session.
pub const ROOT_PATH: &str = "/";
/// Sign-in page.
pub const AUTH_PATH: &str = "/auth";
/// Default page for a signed-in user.
pub const MAIN_PATH: &str = "/main";

pub const CONFIG_ENDPOINT: &str = "/api/config";
pub const PROFILE_ENDPOINT: &str = "/api/auth/profile";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

/// Storage key of the session token.
pub const TOKEN_STORAGE_KEY: &str = "portal_token";

/// Path part of a router URL, without query string or fragment.
///
/// `/auth?next=%2Fmain` and `/auth#top` both resolve to `/auth`.
pub fn route_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    if path.is_empty() {
        ROOT_PATH
    } else {
        path
    }
}

/// Check if a host is a local/development address.
pub fn is_local_address(host: &str) -> bool {
    let host_part = host.split(':').next().unwrap_or(host);
    host_part == "localhost"
        || host_part == "127.0.0.1"
        || host_part == "0.0.0.0"
        || host_part.starts_with("192.168.")
        || host_part.starts_with("10.")
}

/// Turn a bare host (`api.example.org`, `localhost:8080`) or a full origin
/// into an origin without a trailing slash. Local hosts get plain `http`.
pub fn normalize_origin(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() || host.contains("://") {
        return host.to_string();
    }
    if is_local_address(host) {
        format!("http://{host}")
    } else {
        format!("https://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_path_strips_query_and_fragment() {
        assert_eq!(route_path("/auth?next=%2Fmain"), "/auth");
        assert_eq!(route_path("/settings#display"), "/settings");
        assert_eq!(route_path("/main"), "/main");
        assert_eq!(route_path("?tab=1"), "/");
        assert_eq!(route_path(""), "/");
    }

    #[test]
    fn normalize_origin_picks_scheme_by_host() {
        assert_eq!(normalize_origin("localhost:8080/"), "http://localhost:8080");
        assert_eq!(normalize_origin("api.example.org"), "https://api.example.org");
        assert_eq!(normalize_origin("http://10.0.0.5:3000/"), "http://10.0.0.5:3000");
        assert_eq!(normalize_origin("  "), "");
    }
}
