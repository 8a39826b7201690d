//! Generic list / detail / create / remove handlers shared by every
//! collection screen.

use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    adapters::{
        http::{
            app_state::AppState,
            flash::Flash,
            middleware::{CSRF_FIELD, Session},
            routes::{alerts_html, render},
        },
        views::{
            components::AlertKind,
            resource::{AdminResource, RenderContext, detail_view, list_view},
        },
    },
    app_error::{AppError, AppResult},
    domain::{pagination::ListQuery, resource::Removal},
};

pub fn router<R: AdminResource>() -> Router<AppState> {
    let list = if R::create_form().is_some() {
        get(list_page::<R>).post(create_item::<R>)
    } else {
        get(list_page::<R>)
    };
    let mut router = Router::new().route("/", list);
    if R::HAS_DETAIL {
        router = router.route("/{id}", get(detail_page::<R>));
    }
    if R::REMOVAL != Removal::None {
        router = router.route("/{id}/remove", post(remove_item::<R>));
    }
    router
}

fn render_context(app_state: &AppState, session: &Session) -> RenderContext {
    RenderContext {
        locale: app_state.config.locale,
        csrf_token: session.csrf_token.clone(),
        customer_names: HashMap::new(),
    }
}

async fn list_page<R: AdminResource>(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let query = ListQuery::from_params(
        &params,
        app_state.config.default_page_size,
        &R::allowed_filters(),
    );
    let console = &app_state.console;

    let (page, customer_names) = if R::NEEDS_CUSTOMER_NAMES {
        tokio::join!(
            console.list::<R>(&session.token, &query),
            console.customer_names(&session.token)
        )
    } else {
        (console.list::<R>(&session.token, &query).await, HashMap::new())
    };

    let ctx = RenderContext {
        customer_names,
        ..render_context(&app_state, &session)
    };
    let (jar, flash) = Flash::take(jar);

    let (body, errors) = match page {
        Ok(page) => (list_view(&page, &query, &ctx), Vec::new()),
        Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::error!(error = ?err, path = R::API_PATH, "Failed to load list");
            (String::new(), vec![(AlertKind::Danger, err.user_message())])
        }
    };

    let alerts = alerts_html(flash, &errors);
    Ok((jar, render(&app_state, R::TITLE, R::SLUG, &alerts, &body)))
}

async fn detail_page<R: AdminResource>(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let console = &app_state.console;

    let (item, customer_names) = if R::NEEDS_CUSTOMER_NAMES {
        tokio::join!(
            console.get::<R>(&session.token, &id),
            console.customer_names(&session.token)
        )
    } else {
        (console.get::<R>(&session.token, &id).await, HashMap::new())
    };
    let item = item?;

    let ctx = RenderContext {
        customer_names,
        ..render_context(&app_state, &session)
    };
    let (jar, flash) = Flash::take(jar);
    let title = format!("{} {}", R::NOUN, item.id());

    Ok((
        jar,
        render(
            &app_state,
            &title,
            R::SLUG,
            &alerts_html(flash, &[]),
            &detail_view(&item, &ctx),
        ),
    ))
}

async fn create_item<R: AdminResource>(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    session.verify_csrf(&app_state, form.get(CSRF_FIELD).map(String::as_str))?;

    let flash = match R::build_create_body(&form) {
        Err(errors) => Flash::danger(errors.to_string()),
        Ok(body) => match app_state.console.create::<R>(&session.token, body).await {
            Ok(Some(created)) => Flash::success(format!("{} {} created.", R::NOUN, created.id())),
            Ok(None) => Flash::success(format!("{} created.", R::NOUN)),
            Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
            Err(err) => {
                tracing::warn!(error = ?err, path = R::API_PATH, "Create rejected");
                Flash::danger(err.user_message())
            }
        },
    };

    Ok((flash.set(jar), Redirect::to(&R::base_path())))
}

/// "Delete" → "deleted", "Cancel" → "canceled", "Detach" → "detached".
fn past_tense(label: &str) -> String {
    let lower = label.to_lowercase();
    if lower.ends_with('e') {
        format!("{}d", lower)
    } else {
        format!("{}ed", lower)
    }
}

async fn remove_item<R: AdminResource>(
    State(app_state): State<AppState>,
    session: Session,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    session.verify_csrf(&app_state, form.get(CSRF_FIELD).map(String::as_str))?;

    let flash = match app_state.console.remove::<R>(&session.token, &id).await {
        Ok(()) => Flash::success(format!(
            "{} {} {}.",
            R::NOUN,
            id,
            past_tense(R::REMOVE_LABEL)
        )),
        Err(AppError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(err) => {
            tracing::warn!(error = ?err, path = R::API_PATH, id = %id, "Remove rejected");
            Flash::danger(err.user_message())
        }
    };

    Ok((flash.set(jar), Redirect::to(&R::base_path())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use billing_types::{Coupon, Customer, Dispute, PaymentMethod, Price, Subscription};
    use serde_json::json;

    use crate::formatting::Locale;
    use crate::test_utils::{
        InMemoryBillingApi, Method, TEST_SESSION_TOKEN, TestAppStateBuilder, list_envelope,
        object_envelope, session_cookie, test_coupon, test_csrf_token, test_customer,
        test_dispute, test_payment_method, test_subscription,
    };

    fn server_for<R: AdminResource>(
        api: InMemoryBillingApi,
    ) -> (TestServer, std::sync::Arc<InMemoryBillingApi>) {
        let (app_state, api) = TestAppStateBuilder::new().with_api(api).build();
        let server = TestServer::new(router::<R>().with_state(app_state)).unwrap();
        (server, api)
    }

    #[tokio::test]
    async fn list_without_session_redirects_to_signin() {
        let (server, api) = server_for::<Customer>(InMemoryBillingApi::new());

        let response = server.get("/").await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/admin/signin");
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn list_missing_data_renders_empty_state() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/customers",
            json!({"success": true}),
        );
        let (server, _) = server_for::<Customer>(api);

        let response = server.get("/").add_cookie(session_cookie()).await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("empty-state"));
        assert!(html.contains("No customers found."));
    }

    #[tokio::test]
    async fn list_accepts_bearer_header() {
        let (server, api) = server_for::<Customer>(InMemoryBillingApi::new());

        let response = server
            .get("/")
            .authorization_bearer(TEST_SESSION_TOKEN)
            .await;

        response.assert_status_ok();
        assert_eq!(api.last_request().unwrap().token, TEST_SESSION_TOKEN);
    }

    #[tokio::test]
    async fn list_escapes_user_controlled_fields() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/customers",
            list_envelope(
                vec![test_customer(|c| {
                    c["name"] = json!("<script>alert('x')</script>");
                    c["email"] = json!("\"onmouseover=\"x@y.z");
                })],
                Some(1),
            ),
        );
        let (server, _) = server_for::<Customer>(api);

        let html = server.get("/").add_cookie(session_cookie()).await.text();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("&quot;onmouseover=&quot;x@y.z"));
    }

    #[tokio::test]
    async fn list_pagination_and_filters_are_forwarded() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/subscriptions",
            list_envelope(vec![test_subscription(|_| {})], None),
        );
        let (server, api) = server_for::<Subscription>(api);

        let html = server
            .get("/?status=past_due&limit=1&offset=0&evil=1")
            .add_cookie(session_cookie())
            .await
            .text();

        let request = api.requests_to(Method::Get, "/v1/subscriptions").remove(0);
        assert!(request.query.contains(&("status".to_string(), "past_due".to_string())));
        assert!(request.query.contains(&("limit".to_string(), "1".to_string())));
        assert!(!request.query.iter().any(|(k, _)| k == "evil"));
        assert!(html.contains(r#"aria-disabled="true">Previous"#));
        assert!(html.contains("status=past_due&amp;offset=1&amp;limit=1"));
    }

    #[tokio::test]
    async fn subscription_list_resolves_customer_names() {
        let api = InMemoryBillingApi::new()
            .with_response(
                Method::Get,
                "/v1/subscriptions",
                list_envelope(
                    vec![
                        test_subscription(|_| {}),
                        test_subscription(|s| {
                            s["id"] = json!("sub_test_2");
                            s["customer"] = json!("cus_unknown");
                        }),
                    ],
                    Some(2),
                ),
            )
            .with_response(
                Method::Get,
                "/v1/customers",
                list_envelope(vec![test_customer(|_| {})], Some(1)),
            );
        let (server, _) = server_for::<Subscription>(api);

        let html = server.get("/").add_cookie(session_cookie()).await.text();

        assert!(html.contains("Clínica Sorriso"));
        assert!(html.contains("<code>cus_unknown</code>"));
    }

    #[tokio::test]
    async fn subscription_list_survives_customer_lookup_failure() {
        let api = InMemoryBillingApi::new()
            .with_response(
                Method::Get,
                "/v1/subscriptions",
                list_envelope(vec![test_subscription(|_| {})], Some(1)),
            )
            .with_error(Method::Get, "/v1/customers", 500, "boom");
        let (server, _) = server_for::<Subscription>(api);

        let response = server.get("/").add_cookie(session_cookie()).await;

        response.assert_status_ok();
        assert!(response.text().contains("<code>cus_test_1</code>"));
    }

    #[tokio::test]
    async fn coupon_discounts_render_percent_and_currency() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/coupons",
            list_envelope(
                vec![
                    test_coupon(|_| {}),
                    test_coupon(|c| {
                        c["id"] = json!("FIVEOFF");
                        c["percent_off"] = serde_json::Value::Null;
                        c["amount_off"] = json!(500);
                        c["currency"] = json!("brl");
                    }),
                ],
                Some(2),
            ),
        );
        let (server, _) = server_for::<Coupon>(api);

        let html = server.get("/").add_cookie(session_cookie()).await.text();

        assert!(html.contains("<td>10%</td>"));
        assert!(html.contains("<td>R$\u{a0}5,00</td>"));
    }

    #[tokio::test]
    async fn list_follows_configured_locale() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/coupons",
            list_envelope(
                vec![test_coupon(|c| {
                    c["percent_off"] = serde_json::Value::Null;
                    c["amount_off"] = json!(123456);
                    c["currency"] = json!("eur");
                })],
                Some(1),
            ),
        );
        let (app_state, _) = TestAppStateBuilder::new()
            .with_api(api)
            .with_locale(Locale::EnUs)
            .build();
        let server = TestServer::new(router::<Coupon>().with_state(app_state)).unwrap();

        let html = server.get("/").add_cookie(session_cookie()).await.text();

        assert!(html.contains(r#"<html lang="en-US">"#));
        assert!(html.contains("<td>€1,234.56</td>"));
    }

    #[tokio::test]
    async fn list_upstream_error_shows_alert() {
        let api = InMemoryBillingApi::new().with_error(
            Method::Get,
            "/v1/customers",
            502,
            "Billing backend unavailable",
        );
        let (server, _) = server_for::<Customer>(api);

        let response = server.get("/").add_cookie(session_cookie()).await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("alert-danger"));
        assert!(html.contains("Billing backend unavailable"));
    }

    #[tokio::test]
    async fn list_expired_session_redirects() {
        let api = InMemoryBillingApi::new().with_error(Method::Get, "/v1/customers", 401, "");
        let (server, _) = server_for::<Customer>(api);

        let response = server.get("/").add_cookie(session_cookie()).await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/admin/signin");
    }

    #[tokio::test]
    async fn detail_page_renders_item() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Get,
            "/v1/disputes/dp_test_1",
            object_envelope(test_dispute(|_| {})),
        );
        let (server, _) = server_for::<Dispute>(api);

        let response = server.get("/dp_test_1").add_cookie(session_cookie()).await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Dispute dp_test_1"));
        assert!(html.contains("Evidence due"));
    }

    #[tokio::test]
    async fn detail_page_not_found() {
        let api = InMemoryBillingApi::new().with_error(
            Method::Get,
            "/v1/payment-methods/pm_missing",
            404,
            "No such payment method",
        );
        let (server, _) = server_for::<PaymentMethod>(api);

        let response = server.get("/pm_missing").add_cookie(session_cookie()).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_route_absent_without_detail_screen() {
        let (server, _) = server_for::<Coupon>(InMemoryBillingApi::new());

        let response = server.get("/WELCOME10").add_cookie(session_cookie()).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_posts_body_and_flashes_success() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Post,
            "/v1/customers",
            object_envelope(test_customer(|c| c["id"] = json!("cus_new"))),
        );
        let (server, api) = server_for::<Customer>(api);

        let response = server
            .post("/")
            .add_cookie(session_cookie())
            .form(&[
                ("csrf_token", test_csrf_token().as_str()),
                ("name", "Ana Souza"),
                ("email", "ana@sorriso.com.br"),
            ])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/admin/customers");
        let request = api.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.body,
            Some(json!({"name": "Ana Souza", "email": "ana@sorriso.com.br"}))
        );
        assert!(!response.cookie("console_flash").value().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_missing_csrf_token() {
        let (server, api) = server_for::<Customer>(InMemoryBillingApi::new());

        let response = server
            .post("/")
            .add_cookie(session_cookie())
            .form(&[("name", "Ana"), ("email", "ana@sorriso.com.br")])
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn create_with_invalid_fields_does_not_call_api() {
        let (server, api) = server_for::<Customer>(InMemoryBillingApi::new());

        let response = server
            .post("/")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token().as_str()), ("email", "nope")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn flash_is_shown_once_after_redirect() {
        let api = InMemoryBillingApi::new().with_error(
            Method::Post,
            "/v1/customers",
            422,
            "Email already in use",
        );
        let (server, _) = server_for::<Customer>(api);

        let created = server
            .post("/")
            .add_cookie(session_cookie())
            .form(&[
                ("csrf_token", test_csrf_token().as_str()),
                ("name", "Ana"),
                ("email", "ana@sorriso.com.br"),
            ])
            .await;
        let flash = created.cookie("console_flash");

        let html = server
            .get("/")
            .add_cookie(session_cookie())
            .add_cookie(Cookie::new("console_flash", flash.value().to_string()))
            .await
            .text();

        assert!(html.contains("alert-danger"));
        assert!(html.contains("Email already in use"));
    }

    #[tokio::test]
    async fn remove_archives_prices() {
        let (server, api) = server_for::<Price>(InMemoryBillingApi::new());

        let response = server
            .post("/price_test_1/remove")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token().as_str())])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response.assert_header("location", "/admin/prices");
        let request = api.last_request().unwrap();
        assert_eq!(request.path, "/v1/prices/price_test_1");
        assert_eq!(request.body, Some(json!({"active": false})));
    }

    #[tokio::test]
    async fn remove_detaches_payment_methods() {
        let api = InMemoryBillingApi::new().with_response(
            Method::Post,
            "/v1/payment-methods/pm_test_1/detach",
            object_envelope(test_payment_method(|_| {})),
        );
        let (server, api) = server_for::<PaymentMethod>(api);

        server
            .post("/pm_test_1/remove")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token().as_str())])
            .await
            .assert_status(StatusCode::SEE_OTHER);

        assert_eq!(
            api.requests_to(Method::Post, "/v1/payment-methods/pm_test_1/detach")
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn read_only_resources_have_no_remove_route() {
        let (server, _) = server_for::<Dispute>(InMemoryBillingApi::new());

        let response = server
            .post("/dp_test_1/remove")
            .add_cookie(session_cookie())
            .form(&[("csrf_token", test_csrf_token().as_str())])
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_past_tense() {
        assert_eq!(past_tense("Delete"), "deleted");
        assert_eq!(past_tense("Cancel"), "canceled");
        assert_eq!(past_tense("Detach"), "detached");
        assert_eq!(past_tense("Archive"), "archived");
    }
}
