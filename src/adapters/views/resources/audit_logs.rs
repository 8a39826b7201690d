use billing_types::AuditLogEntry;

use crate::adapters::views::{
    components::{FilterField, code, muted, opt_text, status_badge, timestamp},
    resource::{AdminResource, RenderContext},
};

fn resource_cell(entry: &AuditLogEntry) -> String {
    match (entry.resource_type.as_deref(), entry.resource_id.as_deref()) {
        (Some(kind), Some(id)) => format!("{} {}", opt_text(Some(kind)), code(id)),
        (Some(kind), None) => opt_text(Some(kind)),
        (None, Some(id)) => code(id),
        (None, None) => muted("—"),
    }
}

impl AdminResource for AuditLogEntry {
    const SLUG: &'static str = "audit-logs";
    const TITLE: &'static str = "Audit logs";
    const EMPTY_MESSAGE: &'static str = "No audit log entries for this period.";

    fn columns() -> &'static [&'static str] {
        &["When", "Actor", "Action", "Resource", "IP address"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            timestamp(self.created_at.as_ref(), ctx.locale),
            opt_text(self.actor()),
            status_badge(self.action.as_deref().unwrap_or_default()),
            resource_cell(self),
            opt_text(self.ip_address.as_deref()),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.action.as_deref()
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::text("action", "Action"),
            FilterField::text("user_id", "User ID"),
            FilterField::date("date_from", "From"),
            FilterField::date("date_to", "To"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_audit_log;

    #[test]
    fn test_row_shows_actor_and_resource() {
        let entry: AuditLogEntry = serde_json::from_value(test_audit_log(|_| {})).unwrap();
        let row = entry.row(&RenderContext::default());
        assert_eq!(row[0], "01/05/2024 12:00");
        assert_eq!(row[1], "admin@sorriso.com.br");
        assert_eq!(row[3], "customer <code>cus_test_1</code>");
    }

    #[test]
    fn test_date_filters_declared() {
        assert_eq!(
            AuditLogEntry::allowed_filters(),
            vec!["action", "user_id", "date_from", "date_to"]
        );
    }
}
