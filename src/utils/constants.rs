/// Backend origin.
/// Configured at compile time:
/// - Development: http://localhost:8000 (default)
/// - Production: via BACKEND_URL in .env (see build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8000",
};

/// localStorage key holding the raw bearer token, read by the HTTP client
/// on every request.
pub const STORAGE_KEY_TOKEN: &str = "blog_auth_token";

/// localStorage key holding the persisted session snapshot (user + token +
/// authenticated flag), restored by the auth store at boot.
pub const STORAGE_KEY_SESSION: &str = "blog_auth_storage";
