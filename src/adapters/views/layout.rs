use crate::formatting::{Locale, escape_html};

/// (nav key, label, href)
const NAV: &[(&str, &str, &str)] = &[
    ("dashboard", "Dashboard", "/admin"),
    ("customers", "Customers", "/admin/customers"),
    ("subscriptions", "Subscriptions", "/admin/subscriptions"),
    ("products", "Products", "/admin/products"),
    ("prices", "Prices", "/admin/prices"),
    ("coupons", "Coupons", "/admin/coupons"),
    ("promotion-codes", "Promotion codes", "/admin/promotion-codes"),
    ("disputes", "Disputes", "/admin/disputes"),
    ("refunds", "Refunds", "/admin/refunds"),
    ("invoice-items", "Invoice items", "/admin/invoice-items"),
    ("payment-methods", "Payment methods", "/admin/payment-methods"),
    ("audit-logs", "Audit logs", "/admin/audit-logs"),
    ("performance", "Performance", "/admin/performance"),
    ("clinic", "Clinic", "/admin/clinic"),
    ("saas", "Plans", "/admin/saas"),
];

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";

const AUTO_DISMISS_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-autodismiss]').forEach(function (el) {
  setTimeout(function () { bootstrap.Alert.getOrCreateInstance(el).close(); },
    parseInt(el.dataset.autodismiss, 10) || 5000);
});
</script>"#;

fn nav(active: &str) -> String {
    let mut html = String::from(r#"<ul class="nav nav-pills flex-column">"#);
    for (key, label, href) in NAV {
        let (class, current) = if *key == active {
            ("nav-link active", r#" aria-current="page""#)
        } else {
            ("nav-link", "")
        };
        html.push_str(&format!(
            r#"<li class="nav-item"><a class="{}" href="{}"{}>{}</a></li>"#,
            class, href, current, label
        ));
    }
    html.push_str("</ul>");
    html
}

/// Full HTML document. `alerts_html` and `body_html` must already be markup.
pub fn page(locale: Locale, title: &str, active: &str, alerts_html: &str, body_html: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Billing console</title>
<link rel="stylesheet" href="{css}">
</head>
<body class="bg-light">
<div class="container-fluid"><div class="row">
<aside class="col-md-3 col-lg-2 py-3 border-end bg-white min-vh-100"><a class="d-block fs-5 fw-semibold mb-3 text-decoration-none" href="/admin">Billing console</a>{nav}</aside>
<main class="col-md-9 col-lg-10 py-4 px-4">
<h1 class="h3 mb-4">{title}</h1>
<div id="alerts">{alerts}</div>
{body}
</main>
</div></div>
<script src="{js}"></script>
{auto_dismiss}
</body>
</html>"#,
        lang = locale.html_lang(),
        title = escape_html(title),
        css = BOOTSTRAP_CSS,
        nav = nav(active),
        alerts = alerts_html,
        body = body_html,
        js = BOOTSTRAP_JS,
        auto_dismiss = AUTO_DISMISS_SCRIPT,
    )
}

/// Page shown for failed requests that have nothing else to render.
pub fn error_page(title: &str, message: &str) -> String {
    page(
        Locale::default(),
        title,
        "",
        &super::components::alert(super::components::AlertKind::Danger, message),
        r#"<a class="btn btn-outline-secondary" href="/admin">Back to dashboard</a>"#,
    )
}
