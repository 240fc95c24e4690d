//! History DTOs
//!
//! The timeline is flattened: every item carries `type` and `event_date`,
//! plus the fields of its kind. Fields of the other kind are omitted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_history::{TimelineEntry, VehicleHistory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub event_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_amount: Option<Decimal>,
}

impl From<TimelineEntry> for HistoryItem {
    fn from(entry: TimelineEntry) -> Self {
        let event_date = entry.event_date();
        match entry {
            TimelineEntry::Policy(policy) => Self {
                kind: "Policy".to_string(),
                event_date,
                policy_id: Some(policy.id.value()),
                policy_start_date: Some(policy.start_date),
                policy_end_date: Some(policy.end_date),
                policy_provider: policy.provider,
                claim_id: None,
                claim_description: None,
                claim_amount: None,
            },
            TimelineEntry::Claim(claim) => Self {
                kind: "Claim".to_string(),
                event_date,
                policy_id: None,
                policy_start_date: None,
                policy_end_date: None,
                policy_provider: None,
                claim_id: Some(claim.id.value()),
                claim_description: claim.description,
                claim_amount: Some(claim.amount.value()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarHistoryResponse {
    pub car_id: i64,
    pub vin: String,
    pub timeline: Vec<HistoryItem>,
}

impl From<VehicleHistory> for CarHistoryResponse {
    fn from(history: VehicleHistory) -> Self {
        Self {
            car_id: history.vehicle_id.value(),
            vin: history.vin,
            timeline: history.timeline.into_iter().map(HistoryItem::from).collect(),
        }
    }
}
