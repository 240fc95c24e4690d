//! Recent-expiration scanner
//!
//! A background task that polls the policy store and emits one notification
//! per policy whose end date just passed.
//!
//! # Window
//!
//! Policy dates carry no time of day. A pass at `now` looks for policies with
//!
//! ```text
//! date(now - lookback) < end_date <= date(now)
//! ```
//!
//! where `date()` truncates to the calendar day in the configured timezone.
//! With the default one-hour lookback the window is empty for most of the
//! day and covers only `end_date == today` during the first hour after
//! midnight, so with a 30 minute interval each policy is seen by one or two
//! passes on the day it ends.
//!
//! # Deduplication
//!
//! Notified policy ids are remembered in a [`ProcessedExpirations`] set owned
//! by the scanner. The set is cleared wholesale once it grows past its
//! capacity, which bounds memory at the cost of possibly notifying again for
//! a policy still inside a later window.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use core_kernel::{PolicyId, Timezone, VehicleId};

use crate::error::PolicyError;
use crate::policy::Policy;
use crate::ports::PolicyPort;

/// Scanner cadence and limits
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Sleep between successful passes
    pub interval: Duration,
    /// Sleep after a failed pass
    pub error_backoff: Duration,
    /// How far back a pass looks for expirations
    pub lookback: TimeDelta,
    /// Dedup set size above which it is cleared
    pub dedup_capacity: usize,
    /// Calendar used to turn instants into dates
    pub timezone: Timezone,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            error_backoff: Duration::from_secs(5 * 60),
            lookback: TimeDelta::hours(1),
            dedup_capacity: ProcessedExpirations::DEFAULT_CAPACITY,
            timezone: Timezone::default(),
        }
    }
}

/// End-date window searched by one pass: `after < end_date <= up_to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationWindow {
    pub after: NaiveDate,
    pub up_to: NaiveDate,
}

impl ExpirationWindow {
    /// Window ending at `now` and reaching `lookback` into the past
    pub fn trailing(now: DateTime<Utc>, lookback: TimeDelta, timezone: &Timezone) -> Self {
        let earlier = now.checked_sub_signed(lookback).unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            after: timezone.date_of(earlier),
            up_to: timezone.date_of(now),
        }
    }

    pub fn contains(&self, end_date: NaiveDate) -> bool {
        self.after < end_date && end_date <= self.up_to
    }

    /// True when no end date can fall inside the window
    pub fn is_empty(&self) -> bool {
        self.after >= self.up_to
    }
}

impl fmt::Display for ExpirationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}]", self.after, self.up_to)
    }
}

/// One expiration event handed to the notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationNotice {
    pub policy_id: PolicyId,
    pub vehicle_id: VehicleId,
    pub expiration_date: NaiveDate,
}

impl From<&Policy> for ExpirationNotice {
    fn from(policy: &Policy) -> Self {
        Self {
            policy_id: policy.id,
            vehicle_id: policy.vehicle_id,
            expiration_date: policy.end_date,
        }
    }
}

/// Receives expiration notices from the scanner
pub trait ExpirationNotifier: Send + Sync {
    fn notify(&self, notice: &ExpirationNotice);
}

/// Writes each notice as a structured warning event
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl ExpirationNotifier for TracingNotifier {
    fn notify(&self, notice: &ExpirationNotice) {
        warn!(
            policy_id = %notice.policy_id,
            vehicle_id = %notice.vehicle_id,
            expiration_date = %notice.expiration_date,
            "Policy {} for vehicle {} expired on {}",
            notice.policy_id,
            notice.vehicle_id,
            notice.expiration_date
        );
    }
}

/// Policy ids that have already been notified
#[derive(Debug, Clone)]
pub struct ProcessedExpirations {
    ids: HashSet<PolicyId>,
    capacity: usize,
}

impl ProcessedExpirations {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashSet::new(),
            capacity,
        }
    }

    /// Records `id`; returns false if it was already recorded
    pub fn mark(&mut self, id: PolicyId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: PolicyId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Clears the set if it holds more than `capacity` ids
    ///
    /// Returns true if the set was cleared.
    pub fn clear_if_over_capacity(&mut self) -> bool {
        if self.ids.len() > self.capacity {
            self.ids.clear();
            true
        } else {
            false
        }
    }
}

impl Default for ProcessedExpirations {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

/// Outcome of a single pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub window: ExpirationWindow,
    /// Policies returned by storage for the window
    pub matched: usize,
    /// Policies notified during this pass
    pub notified: Vec<PolicyId>,
    /// Whether the dedup set was cleared at the end of the pass
    pub dedup_cleared: bool,
}

/// Background scanner for recently expired policies
pub struct ExpirationScanner {
    policies: Arc<dyn PolicyPort>,
    notifier: Arc<dyn ExpirationNotifier>,
    config: ScannerConfig,
    processed: ProcessedExpirations,
}

impl ExpirationScanner {
    /// Creates a scanner that reports through [`TracingNotifier`]
    pub fn new(policies: Arc<dyn PolicyPort>, config: ScannerConfig) -> Self {
        Self::with_notifier(policies, Arc::new(TracingNotifier), config)
    }

    pub fn with_notifier(
        policies: Arc<dyn PolicyPort>,
        notifier: Arc<dyn ExpirationNotifier>,
        config: ScannerConfig,
    ) -> Self {
        let processed = ProcessedExpirations::with_capacity(config.dedup_capacity);
        Self {
            policies,
            notifier,
            config,
            processed,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn processed(&self) -> &ProcessedExpirations {
        &self.processed
    }

    /// Runs one pass against the current time
    pub async fn scan(&mut self) -> Result<ScanReport, PolicyError> {
        self.scan_at(Utc::now()).await
    }

    /// Runs one pass as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::Storage` if the policy store could not answer.
    /// The dedup set is left untouched in that case.
    pub async fn scan_at(&mut self, now: DateTime<Utc>) -> Result<ScanReport, PolicyError> {
        let window = ExpirationWindow::trailing(now, self.config.lookback, &self.config.timezone);
        let expired = self
            .policies
            .find_expired_between(window.after, window.up_to)
            .await?;

        let mut notified = Vec::new();
        for policy in &expired {
            if self.processed.contains(policy.id) {
                continue;
            }
            self.notifier.notify(&ExpirationNotice::from(policy));
            self.processed.mark(policy.id);
            notified.push(policy.id);
        }

        let dedup_cleared = self.processed.clear_if_over_capacity();
        if dedup_cleared {
            debug!(capacity = self.config.dedup_capacity, "Cleared processed expiration set");
        }

        Ok(ScanReport {
            window,
            matched: expired.len(),
            notified,
            dedup_cleared,
        })
    }

    /// Scans repeatedly until `cancel` fires
    ///
    /// Sleeps `interval` after a successful pass and `error_backoff` after a
    /// failed one. Cancellation is observed before each pass and during the
    /// sleep; a pass in progress runs to completion.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!(
            interval_secs = self.config.interval.as_secs(),
            backoff_secs = self.config.error_backoff.as_secs(),
            timezone = self.config.timezone.name(),
            "Policy expiration scanner started"
        );

        loop {
            if cancel.is_cancelled() {
                break;
            }

            let delay = match self.scan().await {
                Ok(report) => {
                    debug!(
                        window = %report.window,
                        matched = report.matched,
                        notified = report.notified.len(),
                        "Policy expiration scan complete"
                    );
                    self.config.interval
                }
                Err(e) => {
                    error!(error = %e, "Error in policy expiration scan");
                    self.config.error_backoff
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("Policy expiration scanner stopped");
    }

    /// Spawns [`run`](Self::run) on the tokio runtime
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
