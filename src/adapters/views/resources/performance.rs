use billing_types::PerformanceMetric;

use crate::{
    adapters::views::{
        components::{FilterField, KpiCard, code, data_table, muted, opt_text, timestamp},
        resource::{AdminResource, RenderContext},
    },
    domain::stats::{PageStats, summarize_series},
    formatting::{Locale, escape_html, format_decimal, format_number},
};

fn with_unit(value: f64, unit: Option<&str>, locale: Locale) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("{} {}", format_decimal(value, 2, locale), unit),
        _ => format_decimal(value, 2, locale),
    }
}

impl AdminResource for PerformanceMetric {
    const SLUG: &'static str = "performance";
    const TITLE: &'static str = "Performance";
    const EMPTY_MESSAGE: &'static str = "No metrics recorded yet.";

    fn columns() -> &'static [&'static str] {
        &["Metric", "Value", "Endpoint", "Recorded at"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        let value = match self.value {
            Some(value) => escape_html(&with_unit(value, self.unit.as_deref(), ctx.locale)),
            None => muted("—"),
        };
        vec![
            opt_text(self.name.as_deref()),
            value,
            self.endpoint.as_deref().map(code).unwrap_or_else(|| muted("—")),
            timestamp(self.recorded_at.as_ref(), ctx.locale),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn filters() -> Vec<FilterField> {
        vec![FilterField::text("metric", "Metric")]
    }

    fn kpis(stats: &PageStats, ctx: &RenderContext) -> Vec<KpiCard> {
        vec![
            KpiCard::new("Samples", format_number(stats.page_count as i64, ctx.locale))
                .hint("on this page"),
            KpiCard::new("Series", format_number(stats.by_status.len() as i64, ctx.locale))
                .hint("on this page"),
        ]
    }

    /// count / average / max per metric name for the loaded samples.
    fn summary(items: &[Self], ctx: &RenderContext) -> Option<String> {
        let series = summarize_series(items.iter().filter_map(|m| {
            Some((m.name.as_deref()?, m.unit.as_deref(), m.value?))
        }));
        if series.is_empty() {
            return None;
        }
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|s| {
                vec![
                    escape_html(&s.name),
                    format_number(s.count as i64, ctx.locale),
                    escape_html(&with_unit(s.average, s.unit.as_deref(), ctx.locale)),
                    escape_html(&with_unit(s.max, s.unit.as_deref(), ctx.locale)),
                ]
            })
            .collect();
        Some(format!(
            r#"<h2 class="h5 mt-4">Summary</h2>{}"#,
            data_table(&["Metric", "Samples", "Average", "Max"], &rows, "")
        ))
    }
}
