pub mod clinic;
pub mod dashboard;
pub mod resources;
pub mod saas;

use axum::{
    Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use billing_types::{
    AuditLogEntry, Coupon, Customer, Dispute, InvoiceItem, PaymentMethod, PerformanceMetric,
    Price, Product, PromotionCode, Refund, Subscription,
};

use crate::adapters::{
    http::{app_state::AppState, flash::Flash},
    views::{
        components::{AlertKind, alert},
        layout,
        resource::AdminResource,
    },
};

pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/signin", get(signin))
        .nest("/clinic", clinic::router())
        .nest("/saas", saas::router());

    let router = with_resource::<Customer>(router);
    let router = with_resource::<Subscription>(router);
    let router = with_resource::<Product>(router);
    let router = with_resource::<Price>(router);
    let router = with_resource::<Coupon>(router);
    let router = with_resource::<PromotionCode>(router);
    let router = with_resource::<Dispute>(router);
    let router = with_resource::<Refund>(router);
    let router = with_resource::<InvoiceItem>(router);
    let router = with_resource::<PaymentMethod>(router);
    let router = with_resource::<AuditLogEntry>(router);
    with_resource::<PerformanceMetric>(router)
}

fn with_resource<R: AdminResource>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&format!("/{}", R::SLUG), resources::router::<R>())
}

/// Hands the browser to the login page of the hosting application.
async fn signin(State(app_state): State<AppState>) -> Redirect {
    Redirect::to(&app_state.config.login_url)
}

/// Alerts block: the pending flash (if any) followed by `extra` alerts.
pub(crate) fn alerts_html(flash: Option<Flash>, extra: &[(AlertKind, String)]) -> String {
    let mut html = flash.map(|f| f.to_html()).unwrap_or_default();
    for (kind, message) in extra {
        html.push_str(&alert(*kind, message));
    }
    html
}

pub(crate) fn render(
    app_state: &AppState,
    title: &str,
    active: &str,
    alerts: &str,
    body: &str,
) -> Html<String> {
    Html(layout::page(app_state.config.locale, title, active, alerts, body))
}
