use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    adapters::{
        http::{
            app_state::AppState,
            flash::Flash,
            middleware::Session,
            routes::{alerts_html, render},
        },
        views::{components::AlertKind, dashboard::dashboard_view},
    },
    app_error::{AppError, AppResult},
};

pub async fn dashboard(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, flash) = Flash::take(jar);
    let locale = app_state.config.locale;

    let (body, errors) = match app_state.console.stripe_metrics(&session.token).await {
        Ok(metrics) => (dashboard_view(&metrics, locale), Vec::new()),
        Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load billing metrics");
            (String::new(), vec![(AlertKind::Danger, err.user_message())])
        }
    };

    Ok((
        jar,
        render(&app_state, "Dashboard", "dashboard", &alerts_html(flash, &errors), &body),
    ))
}
