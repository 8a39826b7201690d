use std::collections::{BTreeMap, HashMap};

use billing_types::PageMeta;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;
/// Largest offset accepted from a query string.
pub const MAX_OFFSET: u64 = 1_000_000_000;

/// Filters and window of one list request, parsed from the page's query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: u64,
    pub limit: u64,
    /// Non-empty filter values, restricted to the names the screen declares.
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Unparseable numbers fall back to defaults; unknown keys are dropped.
    pub fn from_params(
        params: &HashMap<String, String>,
        default_limit: u64,
        allowed_filters: &[&str],
    ) -> Self {
        let offset = params
            .get("offset")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0)
            .min(MAX_OFFSET);
        let limit = params
            .get("limit")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default_limit)
            .clamp(1, MAX_LIMIT);

        let filters = allowed_filters
            .iter()
            .filter_map(|name| {
                let value = params.get(*name)?.trim();
                (!value.is_empty()).then(|| (name.to_string(), value.to_string()))
            })
            .collect();

        Self {
            offset,
            limit,
            filters,
        }
    }

    pub fn first_page(limit: u64) -> Self {
        Self {
            offset: 0,
            limit: limit.clamp(1, MAX_LIMIT),
            filters: BTreeMap::new(),
        }
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Query parameters sent to the API: filters, `limit`, `offset`, and the
    /// 1-based `page` the platform endpoints expect.
    pub fn api_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        params.push(("limit".to_string(), self.limit.to_string()));
        params.push(("offset".to_string(), self.offset.to_string()));
        params.push(("page".to_string(), (self.offset / self.limit + 1).to_string()));
        params
    }

    /// Link to the same list at another offset, keeping filters.
    pub fn href_at(&self, base: &str, offset: u64) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.filters {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("offset", &offset.to_string());
        serializer.append_pair("limit", &self.limit.to_string());
        format!("{}?{}", base, serializer.finish())
    }
}

/// State of the previous/next controls for a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
    pub returned: u64,
    pub total: Option<u64>,
    pub has_more: Option<bool>,
}

impl Pagination {
    pub fn new(query: &ListQuery, returned: usize, meta: Option<&PageMeta>) -> Self {
        Self {
            offset: query.offset,
            limit: query.limit,
            returned: returned as u64,
            total: meta.and_then(|m| m.total),
            has_more: meta.and_then(|m| m.has_more),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// A short page is always the last one; otherwise trust `has_more` or
    /// `total` when the API sends them.
    pub fn has_next(&self) -> bool {
        if self.returned < self.limit {
            return false;
        }
        if let Some(has_more) = self.has_more {
            return has_more;
        }
        match self.total {
            Some(total) => self.offset.saturating_add(self.returned) < total,
            None => true,
        }
    }

    pub fn previous_offset(&self) -> u64 {
        self.offset.saturating_sub(self.limit)
    }

    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// 1-based range of rows on this page, `None` when empty.
    pub fn range(&self) -> Option<(u64, u64)> {
        (self.returned > 0).then(|| {
            (
                self.offset.saturating_add(1),
                self.offset.saturating_add(self.returned),
            )
        })
    }
}
