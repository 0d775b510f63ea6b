//! Sync engine: the run orchestration over ordered source rows.
//!
//! The run moves through three states. Init fetches the target schema
//! (diagnostic only) and builds the dedup index; Iterate walks source rows
//! up to the cap, skipping known keys and writing new records; Done returns
//! the counters. Everything is strictly sequential: each remote call
//! completes before the next is issued, and retry backoff sleeps on the
//! same thread.
//!
//! There is no partial-run checkpoint. A crashed run leaves whatever it
//! wrote; the next invocation re-derives the index from the store and skips
//! those records.

use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use moodsync_model::{CanonicalRecord, RawRow, StoreError};

use crate::index::build_dedup_index;
use crate::payload::build_properties;
use crate::redact::redact_value;
use crate::traits::{TargetStore, TitleGenerator};
use crate::transform::transform_row;

/// Hard cap on rows iterated per run.
pub const DEFAULT_MAX_RECORDS: usize = 1000;

/// Page size for the index-building query.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Retry policy for per-record remote operations (title, create).
///
/// Index construction is deliberately not retried here: a failed page
/// fetch aborts the run instead, because continuing with a partial index
/// would create duplicates.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts per operation, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    fn delay_for(&self, retry_index: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry_index)
    }
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Rows iterated per run; rows beyond this are left untouched.
    pub max_records: usize,
    pub page_size: u32,
    /// Skip title generation and writes; count what would be created.
    pub dry_run: bool,
    pub retry: RetryPolicy,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
            retry: RetryPolicy::default(),
        }
    }
}

/// Counters for one completed run.
#[derive(Debug, Default, Clone)]
pub struct SyncReport {
    /// Properties in the target schema snapshot (diagnostic).
    pub schema_properties: usize,
    /// Dedup keys found in the store at Init.
    pub existing_keys: usize,
    /// Rows iterated (bounded by the cap).
    pub rows_seen: usize,
    pub created: usize,
    pub duplicate_skips: usize,
    /// Rows whose Date column did not parse.
    pub parse_failures: usize,
    /// Rows that failed title generation or entry creation after retries.
    pub record_failures: usize,
    /// True when the source had more rows than the cap allowed.
    pub capped: bool,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.record_failures > 0
    }
}

/// Failures that abort the whole run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("target store: {0}")]
    Store(#[from] StoreError),
}

/// Orchestrates one synchronization run over ordered source rows.
///
/// Store and title-generator handles are injected so tests run against
/// in-memory doubles.
pub struct SyncEngine<'a, S, T> {
    store: &'a S,
    titles: &'a T,
    options: SyncOptions,
}

impl<'a, S: TargetStore, T: TitleGenerator> SyncEngine<'a, S, T> {
    pub fn new(store: &'a S, titles: &'a T) -> Self {
        Self {
            store,
            titles,
            options: SyncOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the pipeline over `rows` in source order.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` only for failures that make the whole run
    /// unsound: schema fetch or dedup-index construction. Per-record
    /// failures are counted in the report instead.
    pub fn run(&self, rows: &[RawRow]) -> Result<SyncReport, SyncError> {
        let init_span = info_span!("init");
        let (schema, mut index) = init_span.in_scope(|| -> Result<_, SyncError> {
            let schema = self.store.fetch_schema()?;
            for (property, kind) in &schema {
                debug!(property = %property, kind = %kind, "target schema property");
            }
            let index = build_dedup_index(self.store, self.options.page_size)?;
            info!(
                property_count = schema.len(),
                existing_keys = index.len(),
                "target state loaded"
            );
            Ok((schema, index))
        })?;

        let mut report = SyncReport {
            schema_properties: schema.len(),
            existing_keys: index.len(),
            capped: rows.len() > self.options.max_records,
            dry_run: self.options.dry_run,
            ..SyncReport::default()
        };

        let iterate_span = info_span!("iterate", row_count = rows.len());
        let _iterate_guard = iterate_span.enter();
        for row in rows.iter().take(self.options.max_records) {
            report.rows_seen += 1;
            self.process_row(row, &mut index, &mut report);
        }
        drop(_iterate_guard);

        info!(
            rows_seen = report.rows_seen,
            created = report.created,
            duplicate_skips = report.duplicate_skips,
            parse_failures = report.parse_failures,
            record_failures = report.record_failures,
            capped = report.capped,
            dry_run = report.dry_run,
            "run complete"
        );
        Ok(report)
    }

    fn process_row(&self, row: &RawRow, index: &mut BTreeSet<String>, report: &mut SyncReport) {
        let record = match transform_row(row) {
            Ok(record) => record,
            Err(error) => {
                warn!(row_id = %row.id(), %error, "row skipped");
                report.parse_failures += 1;
                return;
            }
        };
        let key = match record.dedup_key() {
            Some(key) => key.to_string(),
            None => {
                report.parse_failures += 1;
                return;
            }
        };
        if index.contains(&key) {
            debug!(row_id = %row.id(), key = %key, "entry already in store");
            report.duplicate_skips += 1;
            return;
        }
        if self.options.dry_run {
            info!(row_id = %row.id(), key = %key, "dry run: would create entry");
            report.created += 1;
            index.insert(key);
            return;
        }

        let title = match retry_with_backoff(&self.options.retry, "generate title", || {
            self.titles.generate(row)
        }) {
            Ok(title) => {
                debug!(row_id = %row.id(), title = redact_value(&title), "title generated");
                title
            }
            Err(error) => {
                warn!(row_id = %row.id(), %error, "title generation failed, record skipped");
                report.record_failures += 1;
                return;
            }
        };

        let record = CanonicalRecord {
            name: Some(title),
            ..record
        };
        let properties = build_properties(&record);
        match retry_with_backoff(&self.options.retry, "create entry", || {
            self.store.create_entry(&properties)
        }) {
            Ok(()) => {
                debug!(row_id = %row.id(), key = %key, "entry created");
                report.created += 1;
                index.insert(key);
            }
            Err(error) => {
                warn!(row_id = %row.id(), %error, "entry creation failed, record skipped");
                report.record_failures += 1;
            }
        }
    }
}

fn retry_with_backoff<V, E, F>(policy: &RetryPolicy, operation: &str, mut call: F) -> Result<V, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Result<V, E>,
{
    let mut attempt = 0u32;
    loop {
        match call() {
            Ok(value) => return Ok(value),
            Err(error) => {
                attempt += 1;
                if attempt >= policy.max_attempts.max(1) {
                    return Err(error);
                }
                let delay = policy.delay_for(attempt - 1);
                debug!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "retrying"
                );
                thread::sleep(delay);
            }
        }
    }
}
