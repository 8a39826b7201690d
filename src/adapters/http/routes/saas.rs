use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use billing_types::SaasPlan;

use crate::{
    adapters::{
        http::{
            app_state::AppState,
            flash::Flash,
            middleware::{CSRF_FIELD, Session},
            routes::{alerts_html, render},
        },
        views::{components::AlertKind, resource::RenderContext, saas::plans_view},
    },
    app_error::{AppError, AppResult},
    domain::pagination::ListQuery,
};

const SAAS_PATH: &str = "/admin/saas";
const PLAN_LIMIT: u64 = 100;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plans_page))
        .route("/portal", post(open_portal))
        .route("/{id}/checkout", post(checkout))
}

/// Alert for the `?checkout=` marker the checkout provider sends users back with.
fn checkout_alert(params: &HashMap<String, String>) -> Option<(AlertKind, String)> {
    match params.get("checkout").map(String::as_str) {
        Some("success") => Some((
            AlertKind::Success,
            "Subscription started. It may take a moment to show up.".to_string(),
        )),
        Some("cancel") => Some((AlertKind::Info, "Checkout was canceled.".to_string())),
        _ => None,
    }
}

async fn plans_page(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let (jar, flash) = Flash::take(jar);
    let mut alerts: Vec<_> = checkout_alert(&params).into_iter().collect();

    let query = ListQuery::first_page(PLAN_LIMIT);
    let body = match app_state.console.list::<SaasPlan>(&session.token, &query).await {
        Ok(page) => {
            let ctx = RenderContext {
                locale: app_state.config.locale,
                csrf_token: session.csrf_token.clone(),
                ..Default::default()
            };
            plans_view(&page.items, &ctx)
        }
        Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::error!(error = ?err, "Failed to load SaaS plans");
            alerts.push((AlertKind::Danger, err.user_message()));
            String::new()
        }
    };

    Ok((
        jar,
        render(&app_state, "Plans", "saas", &alerts_html(flash, &alerts), &body),
    ))
}

async fn checkout(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(plan_id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    session.verify_csrf(&app_state, form.get(CSRF_FIELD).map(String::as_str))?;

    let config = &app_state.config;
    let success_url = config.public_link("/admin/saas?checkout=success");
    let cancel_url = config.public_link("/admin/saas?checkout=cancel");

    match app_state
        .console
        .start_checkout(&session.token, &plan_id, &success_url, &cancel_url)
        .await
    {
        Ok(url) => {
            tracing::info!(plan_id = %plan_id, "Redirecting to checkout");
            Ok((jar, Redirect::to(&url)))
        }
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(err) => {
            tracing::warn!(error = ?err, plan_id = %plan_id, "Checkout could not start");
            Ok((Flash::danger(err.user_message()).set(jar), Redirect::to(SAAS_PATH)))
        }
    }
}

async fn open_portal(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    session.verify_csrf(&app_state, form.get(CSRF_FIELD).map(String::as_str))?;

    let return_url = app_state.config.public_link(SAAS_PATH);
    match app_state.console.billing_portal(&session.token, &return_url).await {
        Ok(url) => Ok((jar, Redirect::to(&url))),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(err) => {
            tracing::warn!(error = ?err, "Billing portal could not open");
            Ok((Flash::danger(err.user_message()).set(jar), Redirect::to(SAAS_PATH)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    use crate::test_utils::{
        InMemoryBillingApi, Method, TestAppStateBuilder, list_envelope, object_envelope,
        session_cookie, test_csrf_token, test_saas_plan,
    };

    fn server(api: InMemoryBillingApi) -> (TestServer, Arc<InMemoryBillingApi>) {
        let (app_state, api) = TestAppStateBuilder::new().with_api(api).build();
        (TestServer::new(router().with_state(app_state)).unwrap(), api)
    }

    #[tokio::test]
    async fn plans_page_lists_active_plans() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/saas/plans",
            list_envelope(
                vec![
                    test_saas_plan(|_| {}),
                    test_saas_plan(|p| {
                        p["id"] = json!(2);
                        p["name"] = json!("Legado");
                        p["active"] = json!(false);
                    }),
                ],
                None,
            ),
        );
        let (server, _) = server(api);

        let html = server.get("/").add_cookie(session_cookie()).await.text();

        assert!(html.contains("Profissional"));
        assert!(!html.contains("Legado"));
        assert!(html.contains(r#"action="/admin/saas/1/checkout""#));
    }

    #[tokio::test]
    async fn plans_page_shows_checkout_result() {
        let (server, _) = server(InMemoryBillingApi::new());

        let html = server
            .get("/?checkout=cancel")
            .add_cookie(session_cookie())
            .await
            .text();

        assert!(html.contains("Checkout was canceled."));
    }

    #[tokio::test]
    async fn checkout_redirects_to_provider() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Post,
            "/v1/saas/checkout",
            object_envelope(json!({"id": "cs_1", "url": "https://checkout.stripe.com/c/pay/cs_1"})),
        );
        let (server, api) = server(api);

        let response = server
            .post("/1/checkout")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token())])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "https://checkout.stripe.com/c/pay/cs_1");
        assert_eq!(
            api.last_request().unwrap().body,
            Some(json!({
                "plan_id": "1",
                "success_url": "http://console.test/admin/saas?checkout=success",
                "cancel_url": "http://console.test/admin/saas?checkout=cancel",
            }))
        );
    }

    #[tokio::test]
    async fn checkout_without_url_flashes_error() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Post,
            "/v1/saas/checkout",
            object_envelope(json!({"id": "cs_1"})),
        );
        let (server, _) = server(api);

        let response = server
            .post("/1/checkout")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token())])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/admin/saas");
        assert!(!response.cookie("console_flash").value().is_empty());
    }

    #[tokio::test]
    async fn portal_sends_return_url() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Post,
            "/v1/billing-portal",
            object_envelope(json!({"url": "https://billing.stripe.com/p/session/ps_1"})),
        );
        let (server, api) = server(api);

        let response = server
            .post("/portal")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token())])
            .await;

        response.assert_header("location", "https://billing.stripe.com/p/session/ps_1");
        assert_eq!(
            api.last_request().unwrap().body,
            Some(json!({"return_url": "http://console.test/admin/saas"}))
        );
    }

    #[tokio::test]
    async fn checkout_requires_csrf_token() {
        let (server, api) = server(InMemoryBillingApi::new());

        let response = server
            .post("/1/checkout")
            .add_cookie(session_cookie())
            .form(&[("plan", "1")])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(api.requests().is_empty());
    }
}
