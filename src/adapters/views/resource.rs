//! Generic list / detail rendering driven by a per-resource description.

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    adapters::views::components::{
        self, FilterField, FormField, KpiCard, code, data_table, detail_list, filter_form,
        kpi_cards, modal_form, pagination_controls, remove_button,
    },
    domain::{
        pagination::{ListQuery, Pagination},
        resource::{ApiResource, Removal},
        stats::{PageStats, StatInput},
    },
    formatting::{Locale, escape_html, format_currency, format_number},
    use_cases::console::ListPage,
    validators::FieldErrors,
};

/// Per-request values every screen needs.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub locale: Locale,
    pub csrf_token: String,
    /// Customer id → display name, filled only for screens that ask for it.
    pub customer_names: HashMap<String, String>,
}

impl RenderContext {
    /// Customer name when known, otherwise the raw id.
    pub fn customer_label(&self, id: Option<&str>) -> String {
        match id {
            None | Some("") => components::muted("—"),
            Some(id) => match self.customer_names.get(id) {
                Some(name) => format!(
                    r#"{}<div class="small text-muted"><code>{}</code></div>"#,
                    escape_html(name),
                    escape_html(id)
                ),
                None => code(id),
            },
        }
    }

    pub fn money(&self, amount: Option<i64>, currency: Option<&str>) -> String {
        match (amount, currency) {
            (Some(amount), Some(currency)) if !currency.is_empty() => {
                escape_html(&format_currency(amount, currency, self.locale))
            }
            (Some(amount), _) => escape_html(&format_number(amount, self.locale)),
            (None, _) => components::muted("—"),
        }
    }
}

/// Everything a screen needs to know about one billing API collection.
pub trait AdminResource: ApiResource {
    /// URL segment under `/admin`, also the nav key.
    const SLUG: &'static str;
    const TITLE: &'static str;
    const EMPTY_MESSAGE: &'static str;
    const HAS_DETAIL: bool = false;
    /// Fetch the customer list alongside the page to label rows by name.
    const NEEDS_CUSTOMER_NAMES: bool = false;
    const REMOVE_LABEL: &'static str = "Delete";

    fn columns() -> &'static [&'static str];

    /// Pre-rendered cells, one per column.
    fn row(&self, ctx: &RenderContext) -> Vec<String>;

    fn detail(&self, _ctx: &RenderContext) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Value counted in the per-status KPI cards.
    fn status(&self) -> Option<&str> {
        None
    }

    /// (minor units, currency) summed per currency in the KPI cards.
    fn amount(&self) -> Option<(i64, &str)> {
        None
    }

    fn filters() -> Vec<FilterField> {
        Vec::new()
    }

    fn create_form() -> Option<Vec<FormField>> {
        None
    }

    /// Validates submitted fields and builds the JSON body for `POST`.
    fn build_create_body(_form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.push("form", "This item cannot be created here.");
        Err(errors)
    }

    fn kpis(stats: &PageStats, ctx: &RenderContext) -> Vec<KpiCard> {
        default_kpis(stats, ctx)
    }

    /// Extra section rendered under the table.
    fn summary(_items: &[Self], _ctx: &RenderContext) -> Option<String> {
        None
    }

    fn base_path() -> String {
        format!("/admin/{}", Self::SLUG)
    }

    fn allowed_filters() -> Vec<&'static str> {
        Self::filters().iter().map(|f| f.name).collect()
    }
}

/// "Total" (whole collection when the API reports it), up to three status
/// counts and the per-currency sums of the loaded page.
pub fn default_kpis(stats: &PageStats, ctx: &RenderContext) -> Vec<KpiCard> {
    let mut cards = Vec::new();
    let total = KpiCard::new("Total", format_number(stats.total as i64, ctx.locale));
    cards.push(if stats.total_is_exact {
        total.hint("all pages")
    } else {
        total.hint("on this page")
    });

    for (status, count) in stats.by_status.iter().take(3) {
        cards.push(
            KpiCard::new(status.replace('_', " "), format_number(*count as i64, ctx.locale))
                .hint("on this page"),
        );
    }

    for (currency, sum) in &stats.sums {
        cards.push(
            KpiCard::new(
                format!("Amount ({})", currency.to_uppercase()),
                format_currency(*sum, currency, ctx.locale),
            )
            .hint("on this page"),
        );
    }
    cards
}

pub fn page_stats<R: AdminResource>(page: &ListPage<R>) -> PageStats {
    PageStats::compute(
        page.items.iter().map(|item| StatInput {
            status: item.status(),
            amount: item.amount(),
        }),
        page.total(),
    )
}

fn item_href<R: AdminResource>(item: &R) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(item.id().as_bytes()).collect();
    format!("{}/{}", R::base_path(), encoded)
}

fn remove_form<R: AdminResource>(item: &R, ctx: &RenderContext) -> String {
    remove_button(
        &format!("{}/remove", item_href(item)),
        &ctx.csrf_token,
        R::REMOVE_LABEL,
        &format!("{} {} {}?", R::REMOVE_LABEL, R::NOUN.to_lowercase(), item.id()),
    )
}

fn action_cells<R: AdminResource>(item: &R, ctx: &RenderContext) -> String {
    let mut cells = Vec::new();
    if R::HAS_DETAIL {
        cells.push(format!(
            r#"<a class="btn btn-sm btn-outline-secondary" href="{}">View</a>"#,
            escape_html(&item_href(item))
        ));
    }
    if R::REMOVAL != Removal::None {
        cells.push(remove_form(item, ctx));
    }
    cells.join(" ")
}

/// Body of a list screen: KPI cards, create form, filters, table, pager.
pub fn list_view<R: AdminResource>(
    page: &ListPage<R>,
    query: &ListQuery,
    ctx: &RenderContext,
) -> String {
    let base = R::base_path();
    let has_actions = R::HAS_DETAIL || R::REMOVAL != Removal::None;

    let mut headers: Vec<&str> = R::columns().to_vec();
    if has_actions {
        headers.push("");
    }
    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|item| {
            let mut cells = item.row(ctx);
            if has_actions {
                cells.push(action_cells(item, ctx));
            }
            cells
        })
        .collect();

    let create = R::create_form()
        .map(|fields| {
            modal_form(
                &format!("create-{}", R::SLUG),
                &format!("New {}", R::NOUN.to_lowercase()),
                &base,
                &ctx.csrf_token,
                &fields,
            )
        })
        .unwrap_or_default();

    let skipped = if page.skipped > 0 {
        components::alert(
            components::AlertKind::Warning,
            &format!(
                "{} row(s) could not be displayed because the API returned an unexpected shape.",
                page.skipped
            ),
        )
    } else {
        String::new()
    };

    let pagination = Pagination::new(query, page.items.len(), page.meta.as_ref());
    let summary = R::summary(&page.items, ctx).unwrap_or_default();

    format!(
        "{kpis}{create}{filters}{skipped}{table}{pager}{summary}",
        kpis = kpi_cards(&R::kpis(&page_stats(page), ctx)),
        create = create,
        filters = filter_form(&base, &R::filters(), query),
        skipped = skipped,
        table = data_table(&headers, &rows, R::EMPTY_MESSAGE),
        pager = pagination_controls(&pagination, query, &base, ctx.locale),
        summary = summary,
    )
}

/// Body of a detail screen.
pub fn detail_view<R: AdminResource>(item: &R, ctx: &RenderContext) -> String {
    let base = R::base_path();
    let remove = if R::REMOVAL != Removal::None {
        remove_form(item, ctx)
    } else {
        String::new()
    };
    format!(
        r#"<div class="card mb-3"><div class="card-body">{}</div></div><div class="d-flex gap-2"><a class="btn btn-outline-secondary" href="{}">Back to list</a>{}</div>"#,
        detail_list(&item.detail(ctx)),
        escape_html(&base),
        remove
    )
}

/// Trimmed, non-empty form value.
pub fn form_value<'a>(form: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    form.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}
