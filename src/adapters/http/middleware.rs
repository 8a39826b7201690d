use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::ports::billing_api::SessionToken,
};

/// Name of the hidden field carrying the form token.
pub const CSRF_FIELD: &str = "csrf_token";

/// The caller's session: the opaque token forwarded to the billing API and
/// the CSRF token that its forms must echo back.
pub struct Session {
    pub token: SessionToken,
    pub csrf_token: String,
}

impl Session {
    /// Rejects a mutating request whose form token does not match the session.
    pub fn verify_csrf(&self, app_state: &AppState, submitted: Option<&str>) -> AppResult<()> {
        let submitted = submitted.unwrap_or_default();
        if app_state.csrf.verify(self.token.expose(), submitted) {
            Ok(())
        } else {
            tracing::warn!("Rejected form with a missing or stale CSRF token");
            Err(AppError::Forbidden)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_string())
}

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        app_state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Authorization header first, then the session cookie.
        let raw = bearer_token(&parts.headers).or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(&app_state.config.session_cookie_name)
                .map(|c| c.value().to_string())
        });
        let raw = raw
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let csrf_token = app_state.csrf.token_for(&raw)?;
        Ok(Session {
            token: SessionToken::new(raw),
            csrf_token,
        })
    }
}
