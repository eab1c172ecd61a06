//! Acting-identity resolution
//!
//! The "current user" is a plain string inferred from ambient signals, not a
//! verified credential. Sources are consulted in a fixed order and the first
//! one that yields a non-empty name wins.

use actix_web::HttpRequest;

/// Header a caller (or a dev tool) may set to impersonate a user
pub const USER_HEADER: &str = "X-User-Name";
/// Header a fronting proxy may set after performing real authentication
pub const PRINCIPAL_HEADER: &str = "X-Authenticated-Principal";
/// Process-level identity override
pub const USER_ENV: &str = "CURRENT_USER";

const FALLBACK_IDENTITY: &str = "anonymous";

/// Resolves the acting identity for a request.
///
/// Precedence: request header, `CURRENT_USER` env, configured default user,
/// OS account name, proxy-authenticated principal, `"anonymous"`.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    default_user: Option<String>,
}

impl IdentityResolver {
    pub fn new(default_user: Option<String>) -> Self {
        Self { default_user }
    }

    /// Resolve the identity for an HTTP request. Total; never fails.
    pub fn resolve(&self, req: &HttpRequest) -> String {
        let header_user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok());
        let principal = req
            .headers()
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok());

        self.resolve_from_parts(header_user, principal)
    }

    /// Core precedence chain, separated from HTTP plumbing for testability
    pub fn resolve_from_parts(
        &self,
        header_user: Option<&str>,
        principal: Option<&str>,
    ) -> String {
        if let Some(name) = header_user.and_then(sanitize_username) {
            return name;
        }

        if let Some(name) = std::env::var(USER_ENV)
            .ok()
            .as_deref()
            .and_then(sanitize_username)
        {
            return name;
        }

        if let Some(name) = self.default_user.as_deref().and_then(sanitize_username) {
            return name;
        }

        if let Some(name) = system_username().as_deref().and_then(sanitize_username) {
            return name;
        }

        if let Some(name) = principal.and_then(sanitize_username) {
            return name;
        }

        FALLBACK_IDENTITY.to_string()
    }
}

/// Normalize a raw username: strip a `DOMAIN\` prefix and an `@domain`
/// suffix, lowercase, trim. Returns `None` when nothing usable remains so
/// the caller falls through to the next source.
fn sanitize_username(raw: &str) -> Option<String> {
    let mut name = raw;

    if let Some((_, rest)) = name.rsplit_once('\\') {
        name = rest;
    }
    if let Some((local, _)) = name.split_once('@') {
        name = local;
    }

    let name = name.trim().to_lowercase();
    if name.is_empty() { None } else { Some(name) }
}

/// Best-effort OS account name, cross-platform
fn system_username() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
}
