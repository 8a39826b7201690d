use billing_types::Dispute;

use crate::{
    adapters::views::{
        components::{FilterField, KpiCard, code, status_badge, text, timestamp, yes_no},
        resource::{AdminResource, RenderContext, default_kpis},
    },
    domain::stats::PageStats,
    formatting::format_number,
};

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("needs_response", "Needs response"),
    ("under_review", "Under review"),
    ("won", "Won"),
    ("lost", "Lost"),
    ("warning_needs_response", "Inquiry: needs response"),
];

impl AdminResource for Dispute {
    const SLUG: &'static str = "disputes";
    const TITLE: &'static str = "Disputes";
    const EMPTY_MESSAGE: &'static str = "No disputes. Nice.";
    const HAS_DETAIL: bool = true;

    fn columns() -> &'static [&'static str] {
        &["ID", "Charge", "Amount", "Reason", "Status", "Evidence due", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            code(&self.id),
            code(self.charge.as_ref().map(|c| c.id()).unwrap_or_default()),
            ctx.money(self.amount, self.currency.as_deref()),
            text(&self.reason.as_deref().unwrap_or_default().replace('_', " ")),
            status_badge(self.status.as_deref().unwrap_or_default()),
            timestamp(self.evidence_due_by(), ctx.locale),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn detail(&self, ctx: &RenderContext) -> Vec<(&'static str, String)> {
        vec![
            ("ID", code(&self.id)),
            ("Status", status_badge(self.status.as_deref().unwrap_or_default())),
            ("Amount", ctx.money(self.amount, self.currency.as_deref())),
            ("Reason", text(&self.reason.as_deref().unwrap_or_default().replace('_', " "))),
            ("Charge", code(self.charge.as_ref().map(|c| c.id()).unwrap_or_default())),
            (
                "Payment intent",
                code(self.payment_intent.as_ref().map(|p| p.id()).unwrap_or_default()),
            ),
            ("Evidence due", timestamp(self.evidence_due_by(), ctx.locale)),
            ("Needs response", yes_no(Some(self.needs_response()))),
            ("Created", timestamp(self.created.as_ref(), ctx.locale)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn amount(&self) -> Option<(i64, &str)> {
        Some((self.amount?, self.currency.as_deref()?))
    }

    fn filters() -> Vec<FilterField> {
        vec![FilterField::select("status", "Status", STATUS_OPTIONS)]
    }

    fn kpis(stats: &PageStats, ctx: &RenderContext) -> Vec<KpiCard> {
        let mut cards = default_kpis(stats, ctx);
        let open = stats.count_of("needs_response") + stats.count_of("warning_needs_response");
        cards.insert(
            1,
            KpiCard::new("Needs response", format_number(open as i64, ctx.locale))
                .hint("on this page"),
        );
        cards
    }
}
