// ─── Backend REST API ─────────────────────────────────────────────────────────
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_VERSION: &str = "v1";

/// Env var que sobreescribe DEFAULT_API_BASE_URL (ver .env.example).
pub const API_URL_ENV: &str = "ANALYTICS_API_URL";

// ─── HTTP client ──────────────────────────────────────────────────────────────
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const CONNECT_TIMEOUT_SECS: u64 = 5;
/// Uploads carry a whole trade-history file; give them more room.
pub const UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Resolve the backend base URL: env override first, local fallback if unset.
/// A trailing `/` is trimmed so endpoint paths can be appended directly.
pub fn api_base_url() -> String {
    std::env::var(API_URL_ENV)
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ambos casos en un solo test: setear/quitar la env var es estado global
    // del proceso y los tests corren en paralelo.
    #[test]
    fn base_url_resolution() {
        std::env::remove_var(API_URL_ENV);
        assert_eq!(api_base_url(), DEFAULT_API_BASE_URL);

        std::env::set_var(API_URL_ENV, "https://bot.example.com/");
        assert_eq!(api_base_url(), "https://bot.example.com");
        std::env::remove_var(API_URL_ENV);
    }
}
