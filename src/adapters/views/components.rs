//! Reusable HTML fragments. Every function returns markup that is safe to
//! concatenate: text arguments are escaped here, `*_html` arguments are
//! expected to be markup built by this module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use billing_types::Timestamp;

use crate::{
    domain::pagination::{ListQuery, Pagination},
    formatting::{Locale, escape_html, format_number, format_timestamp},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Danger,
}

/// Milliseconds before an alert closes itself.
const ALERT_DISMISS_MS: u32 = 5000;

/// Bootstrap alert that dismisses itself after five seconds.
pub fn alert(kind: AlertKind, message: &str) -> String {
    format!(
        r#"<div class="alert alert-{kind} alert-dismissible fade show" role="alert" data-autodismiss="{auto}">{message}<button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button></div>"#,
        kind = kind.as_ref(),
        auto = ALERT_DISMISS_MS,
        message = escape_html(message),
    )
}

pub fn empty_state(message: &str) -> String {
    format!(
        r#"<div class="text-center text-muted py-5 empty-state"><p class="mb-1">{}</p><p class="small">Nothing to show with the current filters.</p></div>"#,
        escape_html(message)
    )
}

/// Escaped text cell.
pub fn text(value: &str) -> String {
    if value.is_empty() {
        return muted("—");
    }
    escape_html(value)
}

pub fn opt_text(value: Option<&str>) -> String {
    text(value.unwrap_or_default())
}

pub fn muted(value: &str) -> String {
    format!(r#"<span class="text-muted">{}</span>"#, escape_html(value))
}

/// Monospace identifier.
pub fn code(id: &str) -> String {
    if id.is_empty() {
        return muted("—");
    }
    format!("<code>{}</code>", escape_html(id))
}

/// Escaped timestamp; unparseable API text is shown as sent.
pub fn timestamp(ts: Option<&Timestamp>, locale: Locale) -> String {
    match ts {
        None => muted("—"),
        Some(ts) => escape_html(&format_timestamp(Some(ts), locale)),
    }
}

pub fn link(href: &str, label_html: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, escape_html(href), label_html)
}

pub fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => r#"<span class="badge bg-success">Yes</span>"#.to_string(),
        Some(false) => r#"<span class="badge bg-secondary">No</span>"#.to_string(),
        None => muted("—"),
    }
}

fn badge_class(status: &str) -> &'static str {
    match status {
        "active" | "succeeded" | "paid" | "won" | "valid" | "available" => "bg-success",
        "trialing" | "pending" | "processing" | "under_review" | "warning_under_review" => {
            "bg-info text-dark"
        }
        "past_due" | "needs_response" | "warning_needs_response" | "requires_action"
        | "incomplete" | "unpaid" => "bg-warning text-dark",
        "canceled" | "failed" | "lost" | "incomplete_expired" | "invalid" | "delinquent" => {
            "bg-danger"
        }
        _ => "bg-secondary",
    }
}

pub fn status_badge(status: &str) -> String {
    if status.is_empty() {
        return muted("—");
    }
    format!(
        r#"<span class="badge {}">{}</span>"#,
        badge_class(status),
        escape_html(&status.replace('_', " "))
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    pub hint: Option<String>,
}

impl KpiCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            hint: None,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

pub fn kpi_cards(cards: &[KpiCard]) -> String {
    if cards.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<div class="row g-3 mb-4 kpi-cards">"#);
    for card in cards {
        let hint = card
            .hint
            .as_deref()
            .map(|h| format!(r#"<div class="small text-muted">{}</div>"#, escape_html(h)))
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="col-sm-6 col-lg-3"><div class="card h-100"><div class="card-body"><div class="text-muted small text-uppercase">{}</div><div class="fs-4 fw-semibold">{}</div>{}</div></div></div>"#,
            escape_html(&card.label),
            escape_html(&card.value),
            hint
        ));
    }
    html.push_str("</div>");
    html
}

/// Table with pre-rendered cells; an empty `rows` renders the empty state.
pub fn data_table(headers: &[&str], rows: &[Vec<String>], empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_state(empty_message);
    }
    let mut html = String::from(
        r#"<div class="table-responsive"><table class="table table-hover align-middle"><thead><tr>"#,
    );
    for header in headers {
        html.push_str(&format!("<th scope=\"col\">{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead><tbody>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(cell);
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

pub fn pagination_controls(
    pagination: &Pagination,
    query: &ListQuery,
    base: &str,
    locale: Locale,
) -> String {
    let range = match (pagination.range(), pagination.total) {
        (Some((from, to)), Some(total)) => format!(
            "{}–{} of {}",
            format_number(from as i64, locale),
            format_number(to as i64, locale),
            format_number(total as i64, locale)
        ),
        (Some((from, to)), None) => format!(
            "{}–{}",
            format_number(from as i64, locale),
            format_number(to as i64, locale)
        ),
        (None, _) => String::new(),
    };

    let item = |enabled: bool, href: String, label: &str, rel: &str| {
        if enabled {
            format!(
                r#"<li class="page-item"><a class="page-link" rel="{}" href="{}">{}</a></li>"#,
                rel,
                escape_html(&href),
                label
            )
        } else {
            format!(
                r#"<li class="page-item disabled"><span class="page-link" aria-disabled="true">{}</span></li>"#,
                label
            )
        }
    };

    format!(
        r#"<nav class="d-flex justify-content-between align-items-center" aria-label="Pagination"><span class="text-muted small">{}</span><ul class="pagination mb-0">{}{}</ul></nav>"#,
        escape_html(&range),
        item(
            pagination.has_previous(),
            query.href_at(base, pagination.previous_offset()),
            "Previous",
            "prev"
        ),
        item(
            pagination.has_next(),
            query.href_at(base, pagination.next_offset()),
            "Next",
            "next"
        ),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Date,
    /// (value, label); an "All" option is prepended.
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Text,
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Date,
        }
    }

    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name,
            label,
            kind: FilterKind::Select(options),
        }
    }
}

/// GET form that reloads the list from offset 0 with the chosen filters.
pub fn filter_form(base: &str, fields: &[FilterField], query: &ListQuery) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let mut html = format!(
        r#"<form class="row g-2 align-items-end mb-3 filters" method="get" action="{}">"#,
        escape_html(base)
    );
    for field in fields {
        let current = query.filter(field.name).unwrap_or_default();
        let input = match field.kind {
            FilterKind::Text => format!(
                r#"<input class="form-control form-control-sm" type="text" id="filter-{name}" name="{name}" value="{value}">"#,
                name = field.name,
                value = escape_html(current)
            ),
            FilterKind::Date => format!(
                r#"<input class="form-control form-control-sm" type="date" id="filter-{name}" name="{name}" value="{value}">"#,
                name = field.name,
                value = escape_html(current)
            ),
            FilterKind::Select(options) => {
                let mut select = format!(
                    r#"<select class="form-select form-select-sm" id="filter-{name}" name="{name}"><option value="">All</option>"#,
                    name = field.name
                );
                for (value, label) in options {
                    let selected = if *value == current { " selected" } else { "" };
                    select.push_str(&format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        escape_html(value),
                        selected,
                        escape_html(label)
                    ));
                }
                select.push_str("</select>");
                select
            }
        };
        html.push_str(&format!(
            r#"<div class="col-auto"><label class="form-label small mb-0" for="filter-{}">{}</label>{}</div>"#,
            field.name,
            escape_html(field.label),
            input
        ));
    }
    html.push_str(&format!(
        r#"<input type="hidden" name="limit" value="{}"><div class="col-auto"><button class="btn btn-sm btn-outline-primary" type="submit">Filter</button> <a class="btn btn-sm btn-link" href="{}">Clear</a></div></form>"#,
        query.limit,
        escape_html(base)
    ));
    html
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Url,
    Date,
    Color,
    TextArea,
    /// Decimal input in major units (e.g. `99.90`).
    Money,
    Integer,
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

impl FormField {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Form controls for `fields`, prefilled from `values`.
pub fn form_fields(fields: &[FormField], values: &HashMap<String, String>) -> String {
    let mut html = String::new();
    for field in fields {
        let value = values.get(field.name).map(String::as_str).unwrap_or_default();
        let required = if field.required { " required" } else { "" };
        let placeholder = if field.placeholder.is_empty() {
            String::new()
        } else {
            format!(r#" placeholder="{}""#, escape_html(field.placeholder))
        };
        let input_type = match field.kind {
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Url => "url",
            FieldKind::Date => "date",
            FieldKind::Color => "color",
            FieldKind::Money | FieldKind::Integer => "number",
            _ => "text",
        };
        let control = match field.kind {
            FieldKind::TextArea => format!(
                r#"<textarea class="form-control" id="field-{name}" name="{name}" rows="3"{required}{placeholder}>{value}</textarea>"#,
                name = field.name,
                value = escape_html(value),
            ),
            FieldKind::Select(options) => {
                let mut select = format!(
                    r#"<select class="form-select" id="field-{name}" name="{name}"{required}>"#,
                    name = field.name,
                );
                for (option, label) in options {
                    let selected = if *option == value { " selected" } else { "" };
                    select.push_str(&format!(
                        r#"<option value="{}"{}>{}</option>"#,
                        escape_html(option),
                        selected,
                        escape_html(label)
                    ));
                }
                select.push_str("</select>");
                select
            }
            FieldKind::Money => format!(
                r#"<input class="form-control" type="number" min="0" step="0.01" id="field-{name}" name="{name}" value="{value}"{required}{placeholder}>"#,
                name = field.name,
                value = escape_html(value),
            ),
            FieldKind::Integer => format!(
                r#"<input class="form-control" type="number" min="0" step="1" id="field-{name}" name="{name}" value="{value}"{required}{placeholder}>"#,
                name = field.name,
                value = escape_html(value),
            ),
            _ => format!(
                r#"<input class="form-control" type="{input_type}" id="field-{name}" name="{name}" value="{value}"{required}{placeholder}>"#,
                name = field.name,
                value = escape_html(value),
            ),
        };
        html.push_str(&format!(
            r#"<div class="mb-3"><label class="form-label" for="field-{}">{}</label>{}</div>"#,
            field.name,
            escape_html(field.label),
            control
        ));
    }
    html
}

pub fn csrf_input(csrf_token: &str) -> String {
    format!(
        r#"<input type="hidden" name="csrf_token" value="{}">"#,
        escape_html(csrf_token)
    )
}

/// "New …" button plus the Bootstrap modal holding the create form.
pub fn modal_form(
    id: &str,
    title: &str,
    action: &str,
    csrf_token: &str,
    fields: &[FormField],
) -> String {
    format!(
        r##"<button type="button" class="btn btn-primary mb-3" data-bs-toggle="modal" data-bs-target="#{id}">{title}</button>
<div class="modal fade" id="{id}" tabindex="-1" aria-labelledby="{id}-label" aria-hidden="true"><div class="modal-dialog"><form class="modal-content" method="post" action="{action}">
<div class="modal-header"><h5 class="modal-title" id="{id}-label">{title}</h5><button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button></div>
<div class="modal-body">{csrf}{fields}</div>
<div class="modal-footer"><button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Close</button><button type="submit" class="btn btn-primary">Save</button></div>
</form></div></div>"##,
        id = escape_html(id),
        title = escape_html(title),
        action = escape_html(action),
        csrf = csrf_input(csrf_token),
        fields = form_fields(fields, &HashMap::new()),
    )
}

/// Inline POST button guarded by a browser confirm dialog.
pub fn remove_button(action: &str, csrf_token: &str, label: &str, confirm: &str) -> String {
    format!(
        r#"<form class="d-inline" method="post" action="{action}" onsubmit="return confirm('{confirm}');">{csrf}<button type="submit" class="btn btn-sm btn-outline-danger">{label}</button></form>"#,
        action = escape_html(action),
        confirm = escape_html(&confirm.replace('\\', "\\\\").replace('\'', "\\'")),
        csrf = csrf_input(csrf_token),
        label = escape_html(label),
    )
}

/// `<dl>` of label / pre-rendered value pairs.
pub fn detail_list(pairs: &[(&str, String)]) -> String {
    let mut html = String::from(r#"<dl class="row detail-list">"#);
    for (label, value_html) in pairs {
        html.push_str(&format!(
            r#"<dt class="col-sm-3">{}</dt><dd class="col-sm-9">{}</dd>"#,
            escape_html(label),
            value_html
        ));
    }
    html.push_str("</dl>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_escapes_and_autodismisses() {
        let html = alert(AlertKind::Success, "<b>done</b>");
        assert!(html.contains("&lt;b&gt;done&lt;/b&gt;"));
        assert!(html.contains(r#"data-autodismiss="5000""#));
        for kind in [AlertKind::Info, AlertKind::Warning, AlertKind::Danger] {
            assert!(alert(kind, "x").contains(r#"data-autodismiss="5000""#));
        }
    }

    #[test]
    fn test_data_table_empty_renders_empty_state() {
        let html = data_table(&["ID"], &[], "No customers found.");
        assert!(html.contains("empty-state"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_data_table_escapes_headers() {
        let html = data_table(&["<ID>"], &[vec![code("cus_1")]], "none");
        assert!(html.contains("&lt;ID&gt;"));
        assert!(html.contains("<code>cus_1</code>"));
    }

    #[test]
    fn test_pagination_controls_disable_previous_at_start() {
        let query = ListQuery::first_page(2);
        let pagination = Pagination::new(&query, 2, None);
        let html = pagination_controls(&pagination, &query, "/admin/coupons", Locale::PtBr);

        assert!(html.contains(r#"<li class="page-item disabled"><span class="page-link" aria-disabled="true">Previous</span>"#));
        assert!(html.contains(r#"rel="next" href="/admin/coupons?offset=2&amp;limit=2""#));
    }

    #[test]
    fn test_filter_form_keeps_values_escaped() {
        let mut query = ListQuery::first_page(20);
        query
            .filters
            .insert("email".to_string(), "\"><script>".to_string());
        let html = filter_form(
            "/admin/customers",
            &[FilterField::text("email", "Email")],
            &query,
        );
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn test_status_badge() {
        assert!(status_badge("past_due").contains("bg-warning"));
        assert!(status_badge("past_due").contains("past due"));
        assert!(status_badge("<x>").contains("&lt;x&gt;"));
    }

    #[test]
    fn test_remove_button_escapes_confirm() {
        let html = remove_button("/admin/customers/cus_1/remove", "tok", "Delete", "Delete O'Brien?");
        assert!(html.contains(r#"name="csrf_token" value="tok""#));
        assert!(html.contains("O\\&#39;Brien"));
    }
}
