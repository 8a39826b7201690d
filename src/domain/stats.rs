use std::collections::BTreeMap;

/// What one row contributes to the KPI cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatInput<'a> {
    pub status: Option<&'a str>,
    /// (minor units, currency)
    pub amount: Option<(i64, &'a str)>,
}

/// Aggregates over the rows currently loaded.
///
/// Only `total` can describe the whole collection (when the API reports it);
/// every breakdown covers the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStats {
    pub total: u64,
    pub total_is_exact: bool,
    pub page_count: usize,
    /// (status, count), most frequent first.
    pub by_status: Vec<(String, usize)>,
    /// (currency lowercase, sum of minor units), by currency code.
    pub sums: Vec<(String, i64)>,
}

impl PageStats {
    pub fn compute<'a>(
        inputs: impl IntoIterator<Item = StatInput<'a>>,
        reported_total: Option<u64>,
    ) -> Self {
        let mut page_count = 0usize;
        let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut sums: BTreeMap<String, i64> = BTreeMap::new();

        for input in inputs {
            page_count += 1;
            if let Some(status) = input.status.filter(|s| !s.is_empty()) {
                *by_status.entry(status.to_string()).or_default() += 1;
            }
            if let Some((amount, currency)) = input.amount {
                let entry = sums.entry(currency.to_ascii_lowercase()).or_default();
                *entry = entry.saturating_add(amount);
            }
        }

        let mut by_status: Vec<(String, usize)> = by_status.into_iter().collect();
        by_status.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total: reported_total.unwrap_or(page_count as u64),
            total_is_exact: reported_total.is_some(),
            page_count,
            by_status,
            sums: sums.into_iter().collect(),
        }
    }

    pub fn count_of(&self, status: &str) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// count / average / max for one named series (performance metrics).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub name: String,
    pub unit: Option<String>,
    pub count: usize,
    pub average: f64,
    pub max: f64,
}

pub fn summarize_series<'a>(
    samples: impl IntoIterator<Item = (&'a str, Option<&'a str>, f64)>,
) -> Vec<SeriesSummary> {
    let mut series: BTreeMap<&str, (Option<&str>, usize, f64, f64)> = BTreeMap::new();
    for (name, unit, value) in samples {
        if !value.is_finite() {
            continue;
        }
        let entry = series
            .entry(name)
            .or_insert((unit, 0, 0.0, f64::NEG_INFINITY));
        entry.1 += 1;
        entry.2 += value;
        entry.3 = entry.3.max(value);
    }
    series
        .into_iter()
        .map(|(name, (unit, count, sum, max))| SeriesSummary {
            name: name.to_string(),
            unit: unit.map(str::to_string),
            count,
            average: sum / count as f64,
            max,
        })
        .collect()
}
