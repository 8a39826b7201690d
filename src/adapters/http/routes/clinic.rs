use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use billing_types::ClinicConfiguration;

use crate::{
    adapters::{
        http::{
            app_error_impl::status_for,
            app_state::AppState,
            flash::Flash,
            middleware::{CSRF_FIELD, Session},
            routes::{alerts_html, render},
        },
        views::{
            clinic::{
                LOGO_CONTENT_TYPES, MAX_LOGO_BYTES, clinic_view, configuration_values,
                parse_configuration,
            },
            components::AlertKind,
        },
    },
    app_error::{AppError, AppResult},
    application::ports::billing_api::LogoUpload,
};

const CLINIC_PATH: &str = "/admin/clinic";
const TITLE: &str = "Clinic settings";

/// Room for the CSRF field and multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(settings_page).post(save_settings))
        .route(
            "/logo",
            post(upload_logo).layer(DefaultBodyLimit::max(MAX_LOGO_BYTES + MULTIPART_OVERHEAD)),
        )
}

async fn settings_page(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    let (jar, flash) = Flash::take(jar);

    let (config, errors) = match app_state.console.clinic_configuration(&session.token).await {
        Ok(config) => (config, Vec::new()),
        Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load clinic configuration");
            (
                ClinicConfiguration::default(),
                vec![(AlertKind::Danger, err.user_message())],
            )
        }
    };

    let body = clinic_view(&config, &configuration_values(&config), &session.csrf_token);
    Ok((
        jar,
        render(&app_state, TITLE, "clinic", &alerts_html(flash, &errors), &body),
    ))
}

async fn save_settings(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    session.verify_csrf(&app_state, form.get(CSRF_FIELD).map(String::as_str))?;

    let (status, message) = match parse_configuration(&form) {
        Ok(config) => {
            match app_state
                .console
                .update_clinic_configuration(&session.token, &config)
                .await
            {
                Ok(()) => {
                    tracing::info!("Clinic configuration updated");
                    let jar = Flash::success("Clinic settings saved.").set(jar);
                    return Ok((jar, Redirect::to(CLINIC_PATH)).into_response());
                }
                Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
                Err(err) => {
                    tracing::warn!(error = ?err, "Clinic configuration update rejected");
                    (status_for(err.code()), err.user_message())
                }
            }
        }
        Err(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
    };

    // Keep what the user typed; the stored logo is still worth showing.
    let current = app_state
        .console
        .clinic_configuration(&session.token)
        .await
        .unwrap_or_default();
    let body = clinic_view(&current, &form, &session.csrf_token);
    let alerts = alerts_html(None, &[(AlertKind::Danger, message)]);
    Ok((status, render(&app_state, TITLE, "clinic", &alerts, &body)).into_response())
}

#[derive(Default)]
struct LogoForm {
    csrf_token: Option<String>,
    logo: Option<LogoUpload>,
}

fn multipart_message(err: &MultipartError) -> String {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        "Logo must be 2 MB or smaller.".to_string()
    } else {
        "The upload could not be read. Please try again.".to_string()
    }
}

async fn read_logo_form(mut multipart: Multipart) -> Result<LogoForm, MultipartError> {
    let mut form = LogoForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(CSRF_FIELD) => form.csrf_token = Some(field.text().await?),
            Some("logo") => {
                let file_name = field.file_name().unwrap_or("logo").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.logo = Some(LogoUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }
    Ok(form)
}

fn check_logo(logo: Option<LogoUpload>) -> Result<LogoUpload, String> {
    let logo = logo
        .filter(|logo| !logo.bytes.is_empty())
        .ok_or_else(|| "Choose an image to upload.".to_string())?;
    if !LOGO_CONTENT_TYPES.contains(&logo.content_type.as_str()) {
        return Err("Logo must be a PNG, JPEG, SVG or WebP image.".to_string());
    }
    if logo.bytes.len() > MAX_LOGO_BYTES {
        return Err("Logo must be 2 MB or smaller.".to_string());
    }
    Ok(logo)
}

async fn upload_logo(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = match read_logo_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!(error = %err, "Unreadable logo upload");
            let jar = Flash::danger(multipart_message(&err)).set(jar);
            return Ok((jar, Redirect::to(CLINIC_PATH)));
        }
    };
    session.verify_csrf(&app_state, form.csrf_token.as_deref())?;

    let flash = match check_logo(form.logo) {
        Err(message) => Flash::danger(message),
        Ok(logo) => {
            let size = logo.bytes.len();
            match app_state.console.upload_clinic_logo(&session.token, logo).await {
                Ok(_) => {
                    tracing::info!(size, "Clinic logo uploaded");
                    Flash::success("Logo updated.")
                }
                Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
                Err(err) => {
                    tracing::warn!(error = ?err, "Logo upload rejected");
                    Flash::danger(err.user_message())
                }
            }
        }
    };

    Ok((flash.set(jar), Redirect::to(CLINIC_PATH)))
}
