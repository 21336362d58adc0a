//! Joining inventory rows to remote metadata.

use std::time::Duration;

use cardshop_commerce::catalog::{CardMetadata, Catalog, CatalogEntry, InventoryRow};
use cardshop_commerce::{CommerceError, ExchangeRate};
use futures::future::join_all;
use serde::Serialize;
use tokio::time::Instant;

use crate::lookup::{CardLookup, LookupError};
use crate::pacer::RequestPacer;

/// Default upper bound on a single lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds a [`Catalog`] from inventory rows by resolving each name.
///
/// All lookups are issued together and paced by the [`RequestPacer`]; the
/// assembler waits for every one of them before building the catalog.
/// Rows that fail are dropped and recorded in the [`AssemblyReport`].
#[derive(Debug)]
pub struct CatalogAssembler {
    pacer: RequestPacer,
    lookup_timeout: Duration,
    rate: ExchangeRate,
}

impl CatalogAssembler {
    pub fn new() -> Self {
        Self {
            pacer: RequestPacer::default(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            rate: ExchangeRate::default(),
        }
    }

    pub fn with_pacer(mut self, pacer: RequestPacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn with_exchange_rate(mut self, rate: ExchangeRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        self.rate
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Resolve every row and merge the successes, in row order.
    pub async fn assemble(&self, rows: &[InventoryRow], lookup: &dyn CardLookup) -> Assembly {
        let started = Instant::now();
        tracing::info!(
            rows = rows.len(),
            interval_ms = self.pacer.interval().as_millis() as u64,
            "Assembling catalog"
        );

        let results = join_all(rows.iter().map(|row| self.resolve(row, lookup))).await;

        let mut catalog = Catalog::new();
        let mut failures = Vec::new();

        for (index, (row, result)) in rows.iter().zip(results).enumerate() {
            let outcome = result.and_then(|metadata| {
                let entry = CatalogEntry::merge(row, metadata, self.rate);
                catalog.insert(entry).map_err(|e| match e {
                    CommerceError::DuplicateItem(id) => LookupError::Duplicate(id),
                    other => LookupError::Malformed(other.to_string()),
                })
            });

            if let Err(error) = outcome {
                tracing::warn!(row = index, name = %row.name, error = %error, "Dropping inventory row");
                failures.push(RowFailure {
                    row: index,
                    name: row.name.clone(),
                    error,
                });
            }
        }

        let report = AssemblyReport {
            attempted: rows.len(),
            succeeded: catalog.len(),
            failures,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Catalog assembled"
        );

        Assembly { catalog, report }
    }

    async fn resolve(
        &self,
        row: &InventoryRow,
        lookup: &dyn CardLookup,
    ) -> Result<CardMetadata, LookupError> {
        self.pacer.acquire().await;
        tracing::debug!(name = %row.name, "Looking up card");

        match tokio::time::timeout(self.lookup_timeout, lookup.lookup(&row.name)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.lookup_timeout)),
        }
    }
}

impl Default for CatalogAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// The outcome of one assembly run.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub catalog: Catalog,
    pub report: AssemblyReport,
}

/// What happened to each row of an assembly run.
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    /// Rows read from the inventory source.
    pub attempted: usize,
    /// Rows that became catalog entries.
    pub succeeded: usize,
    pub failures: Vec<RowFailure>,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

impl AssemblyReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when there was at least one row and none resolved.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

/// A row that did not make it into the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    /// Zero-based position among the data rows.
    pub row: usize,
    pub name: String,
    #[serde(serialize_with = "error_string")]
    pub error: LookupError,
}

fn error_string<S: serde::Serializer>(error: &LookupError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

mod duration_ms {
    use std::time::Duration;

    pub fn serialize<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
