use serde::{Deserialize, Serialize};

use crate::ids::{Expandable, string_or_number};
use crate::timestamp::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceDetails {
    pub due_by: Option<Timestamp>,
    pub submission_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dispute {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub charge: Option<Expandable>,
    pub payment_intent: Option<Expandable>,
    pub evidence_details: Option<EvidenceDetails>,
    pub created: Option<Timestamp>,
}

impl Dispute {
    pub fn evidence_due_by(&self) -> Option<&Timestamp> {
        self.evidence_details.as_ref()?.due_by.as_ref()
    }

    /// Statuses where the merchant still has to act.
    pub fn needs_response(&self) -> bool {
        matches!(
            self.status.as_deref(),
            Some("needs_response" | "warning_needs_response")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub charge: Option<Expandable>,
    pub payment_intent: Option<Expandable>,
    pub created: Option<Timestamp>,
}
