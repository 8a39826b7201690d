use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

use crate::formatting::Locale;

pub struct AppConfig {
    /// Base URL of the billing / SaaS-configuration API (e.g. "https://api.clinic.test").
    pub billing_api_url: Url,
    pub bind_addr: SocketAddr,
    /// Where unauthenticated browsers are sent. May be relative to this host.
    pub login_url: String,
    /// Public origin of the console, used for checkout and portal return URLs.
    pub public_url: Url,
    pub locale: Locale,
    pub default_page_size: u64,
    /// GET response cache lifetime. `None` disables the cache.
    pub response_cache_ttl: Option<Duration>,
    /// HMAC key for form CSRF tokens. A random key is generated when unset,
    /// which invalidates open forms on restart.
    pub csrf_secret: Option<SecretString>,
    pub session_cookie_name: String,
    /// JSON log file. File logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let billing_api_url: Url = get_env("BILLING_API_URL");
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3002)));
        let login_url: String = get_env_default("LOGIN_URL", "/login".to_string());
        let public_url: Url = get_env_default(
            "PUBLIC_URL",
            Url::parse(&format!("http://{}", bind_addr)).unwrap_or_else(|_| billing_api_url.clone()),
        );
        let locale: Locale = get_env_default("CONSOLE_LOCALE", Locale::PtBr);
        let default_page_size: u64 = get_env_default("DEFAULT_PAGE_SIZE", 20);
        let response_cache_ttl_secs: u64 = get_env_default("RESPONSE_CACHE_TTL_SECS", 0);
        let csrf_secret: Option<SecretString> = std::env::var("CSRF_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from);
        let session_cookie_name: String =
            get_env_default("SESSION_COOKIE_NAME", "session_token".to_string());
        let log_file: Option<PathBuf> = std::env::var("LOG_FILE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            billing_api_url,
            bind_addr,
            login_url,
            public_url,
            locale,
            default_page_size,
            response_cache_ttl: (response_cache_ttl_secs > 0)
                .then(|| Duration::from_secs(response_cache_ttl_secs)),
            csrf_secret,
            session_cookie_name,
            log_file,
        }
    }

    /// Absolute URL on this console for a path like `/admin/saas`.
    pub fn public_link(&self, path: &str) -> String {
        self.public_url
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| path.to_string())
    }
}
