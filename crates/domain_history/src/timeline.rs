//! Timeline entries and the merge that orders them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::VehicleId;
use domain_claims::Claim;
use domain_policy::Policy;

/// Kind of a timeline entry
///
/// Declaration order is the tie-break order for entries on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Policy,
    Claim,
}

/// One event in a vehicle's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineEntry {
    /// A policy, placed on its start date
    Policy(Policy),
    /// A claim, placed on its claim date
    Claim(Claim),
}

impl TimelineEntry {
    /// Date the entry is ordered by
    pub fn event_date(&self) -> NaiveDate {
        match self {
            TimelineEntry::Policy(policy) => policy.start_date,
            TimelineEntry::Claim(claim) => claim.claim_date,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            TimelineEntry::Policy(_) => EntryKind::Policy,
            TimelineEntry::Claim(_) => EntryKind::Claim,
        }
    }

    /// Total order key: date, then kind, then id
    pub fn sort_key(&self) -> (NaiveDate, EntryKind, i64) {
        let id = match self {
            TimelineEntry::Policy(policy) => policy.id.value(),
            TimelineEntry::Claim(claim) => claim.id.value(),
        };
        (self.event_date(), self.kind(), id)
    }
}

impl From<Policy> for TimelineEntry {
    fn from(policy: Policy) -> Self {
        TimelineEntry::Policy(policy)
    }
}

impl From<Claim> for TimelineEntry {
    fn from(claim: Claim) -> Self {
        TimelineEntry::Claim(claim)
    }
}

/// Merges policies and claims into one chronologically ordered timeline
///
/// Nothing is filtered out; the result has exactly
/// `policies.len() + claims.len()` entries.
pub fn merge_timeline(policies: Vec<Policy>, claims: Vec<Claim>) -> Vec<TimelineEntry> {
    let mut timeline: Vec<TimelineEntry> = policies
        .into_iter()
        .map(TimelineEntry::from)
        .chain(claims.into_iter().map(TimelineEntry::from))
        .collect();

    timeline.sort_by_key(TimelineEntry::sort_key);
    timeline
}

/// A vehicle's full insurance history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleHistory {
    pub vehicle_id: VehicleId,
    pub vin: String,
    pub timeline: Vec<TimelineEntry>,
}

impl VehicleHistory {
    pub fn policies(&self) -> impl Iterator<Item = &Policy> {
        self.timeline.iter().filter_map(|entry| match entry {
            TimelineEntry::Policy(policy) => Some(policy),
            TimelineEntry::Claim(_) => None,
        })
    }

    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.timeline.iter().filter_map(|entry| match entry {
            TimelineEntry::Claim(claim) => Some(claim),
            TimelineEntry::Policy(_) => None,
        })
    }
}
