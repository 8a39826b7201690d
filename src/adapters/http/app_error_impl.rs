use crate::adapters::views::layout::error_page;
use crate::app_error::{AppError, ErrorCode};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

/// Where browsers without a usable session are sent.
pub const SIGNIN_PATH: &str = "/admin/signin";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a page.
        match &self {
            AppError::Unauthorized => tracing::info!(error = ?self, "Session missing, redirecting"),
            _ => tracing::error!(error = ?self, code = self.code().as_str(), "Request failed"),
        }

        match self {
            AppError::Unauthorized => Redirect::to(SIGNIN_PATH).into_response(),
            other => error_resp(other.code(), &other.user_message()),
        }
    }
}

pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_resp(code: ErrorCode, message: &str) -> Response {
    let status = status_for(code);
    let title = status.canonical_reason().unwrap_or("Error");
    (status, Html(error_page(title, message))).into_response()
}
