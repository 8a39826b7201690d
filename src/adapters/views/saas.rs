//! SaaS plan catalogue with checkout and billing-portal buttons.

use billing_types::SaasPlan;

use crate::{
    adapters::views::{
        components::{csrf_input, empty_state},
        resource::RenderContext,
    },
    formatting::{escape_html, format_currency, format_interval},
};

fn plan_card(plan: &SaasPlan, ctx: &RenderContext) -> String {
    let price = match (plan.amount, plan.currency.as_deref()) {
        (Some(amount), Some(currency)) => format!(
            r#"<div class="fs-3 fw-semibold">{}</div><div class="text-muted small">{}</div>"#,
            escape_html(&format_currency(amount, currency, ctx.locale)),
            escape_html(&format_interval(plan.interval.as_deref(), None))
        ),
        _ => r#"<div class="text-muted">Price on request</div>"#.to_string(),
    };
    let features: String = plan
        .features
        .iter()
        .map(|f| format!("<li>{}</li>", escape_html(f)))
        .collect();
    let trial = match plan.trial_days {
        Some(days) if days > 0 => format!(
            r#"<span class="badge bg-info text-dark mb-2">{} day trial</span>"#,
            days
        ),
        _ => String::new(),
    };
    let encoded: String = url::form_urlencoded::byte_serialize(plan.id.as_bytes()).collect();

    format!(
        r#"<div class="col-md-6 col-xl-4"><div class="card h-100 plan-card"><div class="card-body d-flex flex-column">
<h2 class="h5">{name}</h2>{trial}<p class="text-muted">{description}</p>{price}<ul class="mt-3">{features}</ul>
<form class="mt-auto" method="post" action="/admin/saas/{id}/checkout">{csrf}<button type="submit" class="btn btn-primary w-100">Subscribe</button></form>
</div></div></div>"#,
        name = escape_html(plan.name.as_deref().unwrap_or(&plan.id)),
        trial = trial,
        description = escape_html(plan.description.as_deref().unwrap_or_default()),
        price = price,
        features = features,
        id = escape_html(&encoded),
        csrf = csrf_input(&ctx.csrf_token),
    )
}

/// Active plans as cards; inactive plans are not offered.
pub fn plans_view(plans: &[SaasPlan], ctx: &RenderContext) -> String {
    let portal = format!(
        r#"<form class="mb-4" method="post" action="/admin/saas/portal">{}<button type="submit" class="btn btn-outline-secondary">Manage billing</button></form>"#,
        csrf_input(&ctx.csrf_token)
    );
    let cards: Vec<String> = plans
        .iter()
        .filter(|plan| plan.active != Some(false))
        .map(|plan| plan_card(plan, ctx))
        .collect();
    if cards.is_empty() {
        return format!("{}{}", portal, empty_state("No plans are available."));
    }
    format!(r#"{}<div class="row g-4">{}</div>"#, portal, cards.concat())
}
