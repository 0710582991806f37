//! # Application State
//!
//! Shared state for the Axum application: configuration, the in-memory
//! policy store, and the optional Postgres pool used for write-through
//! persistence. The service itself is stateless — every request reads and
//! writes the store, so handlers replicate safely without coordination.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use sqlx::PgPool;
use thiserror::Error;

use polman_core::{PageRequest, PolicyRecord};

/// Application configuration, read from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Requested sort field does not exist on the record. Raised at query
/// time, not when the request is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No property '{0}' found for type 'PolicyRecord'")]
pub struct UnknownSortField(pub String);

/// In-memory policy store, keyed by id.
///
/// Ids are assigned from a monotonic counter and never reused, matching
/// the identity-column semantics of the relational schema. When a
/// database pool is configured the store is seeded from it at startup and
/// every mutation is written through.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    records: Arc<RwLock<BTreeMap<i64, PolicyRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Claim the next id. Ids advance even when the subsequent insert
    /// fails, so they are never reused.
    pub fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Insert or replace a record under its id.
    pub fn insert(&self, record: PolicyRecord) {
        self.records.write().insert(record.id, record);
    }

    pub fn get(&self, id: i64) -> Option<PolicyRecord> {
        self.records.read().get(&id).cloned()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.records.read().contains_key(&id)
    }

    /// Remove a record. Returns whether it existed.
    pub fn remove(&self, id: i64) -> bool {
        self.records.write().remove(&id).is_some()
    }

    /// Every stored record in storage (id) order.
    pub fn list(&self) -> Vec<PolicyRecord> {
        self.records.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// One ordered window of records plus the total count.
    ///
    /// The sort field was passed through the normalizer unvalidated; an
    /// unknown field fails here.
    pub fn page(
        &self,
        request: &PageRequest,
    ) -> Result<(Vec<PolicyRecord>, u64), UnknownSortField> {
        let mut records = self.list();
        let total = records.len() as u64;

        sort_records(&mut records, request.sort())?;
        if !request.direction().is_ascending() {
            records.reverse();
        }

        let offset = request.offset().max(0) as usize;
        let limit = request.limit().max(0) as usize;
        let content: Vec<PolicyRecord> = records.into_iter().skip(offset).take(limit).collect();
        Ok((content, total))
    }

    /// Seed the store from persisted rows and advance the id counter past
    /// the highest persisted id.
    pub fn seed(&self, records: Vec<PolicyRecord>) {
        let mut guard = self.records.write();
        let mut max_id = 0;
        for record in records {
            max_id = max_id.max(record.id);
            guard.insert(record.id, record);
        }
        self.next_id.fetch_max(max_id + 1, Ordering::SeqCst);
    }
}

fn sort_records(records: &mut [PolicyRecord], field: &str) -> Result<(), UnknownSortField> {
    match field {
        "id" => records.sort_by_key(|r| r.id),
        "policyName" => records.sort_by(|a, b| a.policy_name.cmp(&b.policy_name)),
        "status" => records.sort_by_key(|r| r.status.as_str()),
        "coverageStartDate" => records.sort_by_key(|r| r.coverage_start_date),
        "coverageEndDate" => records.sort_by_key(|r| r.coverage_end_date),
        "createdAt" => records.sort_by_key(|r| r.created_at),
        "updatedAt" => records.sort_by_key(|r| r.updated_at),
        other => return Err(UnknownSortField(other.to_string())),
    }
    Ok(())
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub policies: PolicyStore,
    /// Write-through persistence. `None` runs in-memory only.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// In-memory state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            config,
            policies: PolicyStore::new(),
            db_pool,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
