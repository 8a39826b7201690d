//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` wires an `AppState` around an `InMemoryBillingApi`
//! so routes can be driven through `axum_test::TestServer`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum_extra::extract::cookie::Cookie;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    formatting::Locale,
    infra::{config::AppConfig, csrf::CsrfSigner},
    test_utils::{InMemoryBillingApi, TEST_CSRF_SECRET, TEST_SESSION_TOKEN},
    use_cases::console::ConsoleUseCases,
};

/// Builder for creating `AppState` with an in-memory billing API.
///
/// # Example
///
/// ```ignore
/// let api = InMemoryBillingApi::new()
///     .with_response(Method::Get, "/v1/customers", list_envelope(vec![], None));
/// let (app_state, api) = TestAppStateBuilder::new().with_api(api).build();
/// ```
pub struct TestAppStateBuilder {
    api: InMemoryBillingApi,
    locale: Locale,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            api: InMemoryBillingApi::new(),
            locale: Locale::PtBr,
        }
    }

    pub fn with_api(mut self, api: InMemoryBillingApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Returns the state plus a handle on the API for request assertions.
    pub fn build(self) -> (AppState, Arc<InMemoryBillingApi>) {
        let config = AppConfig {
            billing_api_url: Url::parse("http://billing.test").unwrap(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3002)),
            login_url: "/login".to_string(),
            public_url: Url::parse("http://console.test").unwrap(),
            locale: self.locale,
            default_page_size: 20,
            response_cache_ttl: None,
            csrf_secret: Some(SecretString::from(TEST_CSRF_SECRET.to_string())),
            session_cookie_name: "session_token".to_string(),
            log_file: None,
        };

        let api = Arc::new(self.api);
        let app_state = AppState {
            config: Arc::new(config),
            console: Arc::new(ConsoleUseCases::new(api.clone())),
            csrf: Arc::new(CsrfSigner::new(SecretString::from(
                TEST_CSRF_SECRET.to_string(),
            ))),
        };
        (app_state, api)
    }
}

/// Session cookie carrying `TEST_SESSION_TOKEN`.
pub fn session_cookie() -> Cookie<'static> {
    Cookie::new("session_token", TEST_SESSION_TOKEN)
}

/// The form token the test state expects for `TEST_SESSION_TOKEN`.
pub fn test_csrf_token() -> String {
    CsrfSigner::new(SecretString::from(TEST_CSRF_SECRET.to_string()))
        .token_for(TEST_SESSION_TOKEN)
        .unwrap()
}
