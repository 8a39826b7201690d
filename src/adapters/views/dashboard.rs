use billing_types::StripeMetrics;

use crate::{
    adapters::views::components::{KpiCard, empty_state, kpi_cards},
    formatting::{Locale, format_currency, format_number, format_percent},
};

fn money_card(label: &str, amount: Option<i64>, currency: &str, locale: Locale) -> Option<KpiCard> {
    amount.map(|amount| KpiCard::new(label, format_currency(amount, currency, locale)))
}

fn count_card(label: &str, count: Option<u64>, locale: Locale) -> Option<KpiCard> {
    count.map(|count| KpiCard::new(label, format_number(count as i64, locale)))
}

/// Cards for every figure the API reported; missing figures are left out.
pub fn metrics_cards(metrics: &StripeMetrics, locale: Locale) -> Vec<KpiCard> {
    let currency = metrics.currency.as_deref().unwrap_or("brl");
    [
        money_card("MRR", metrics.mrr, currency, locale),
        money_card("ARR", metrics.arr, currency, locale),
        money_card("Revenue", metrics.revenue, currency, locale),
        money_card("ARPU", metrics.arpu, currency, locale),
        money_card("LTV", metrics.ltv, currency, locale),
        count_card("Active subscriptions", metrics.active_subscriptions, locale),
        count_card("Trialing", metrics.trialing_subscriptions, locale),
        count_card("Canceled", metrics.canceled_subscriptions, locale),
        count_card("Customers", metrics.total_customers, locale),
        count_card("New customers", metrics.new_customers, locale),
        metrics
            .churn_rate
            .map(|rate| KpiCard::new("Churn rate", format_percent(rate, locale))),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn dashboard_view(metrics: &StripeMetrics, locale: Locale) -> String {
    if metrics.is_empty() {
        return empty_state("No billing metrics available yet.");
    }
    format!(
        r#"{}<p class="small text-muted">Figures are computed by the billing API.</p>"#,
        kpi_cards(&metrics_cards(metrics, locale))
    )
}
