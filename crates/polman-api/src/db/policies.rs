//! Policy persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `insurance_policies`
//! table. Ids are assigned by the in-memory store, not the database, so
//! inserts always carry an explicit id.

use chrono::NaiveDate;
use sqlx::PgPool;

use polman_core::{PolicyRecord, PolicyStatus};

/// Insert a new policy record.
pub async fn insert(pool: &PgPool, record: &PolicyRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO insurance_policies (id, policy_name, status, coverage_start_date,
         coverage_end_date, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(record.id)
    .bind(&record.policy_name)
    .bind(record.status.as_str())
    .bind(record.coverage_start_date)
    .bind(record.coverage_end_date)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Overwrite the mutable fields of an existing policy record.
pub async fn update(pool: &PgPool, record: &PolicyRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE insurance_policies SET policy_name = $1, status = $2,
         coverage_start_date = $3, coverage_end_date = $4, updated_at = $5
         WHERE id = $6",
    )
    .bind(&record.policy_name)
    .bind(record.status.as_str())
    .bind(record.coverage_start_date)
    .bind(record.coverage_end_date)
    .bind(record.updated_at)
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a policy record. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM insurance_policies WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all policy records into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<PolicyRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PolicyRow>(
        "SELECT id, policy_name, status, coverage_start_date, coverage_end_date,
         created_at, updated_at
         FROM insurance_policies ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.into_record() {
            Some(record) => records.push(record),
            None => {
                tracing::error!("skipping policy row with invalid status during load_all");
            }
        }
    }
    Ok(records)
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct PolicyRow {
    id: i64,
    policy_name: String,
    status: String,
    coverage_start_date: NaiveDate,
    coverage_end_date: NaiveDate,
    created_at: NaiveDate,
    updated_at: NaiveDate,
}

impl PolicyRow {
    fn into_record(self) -> Option<PolicyRecord> {
        let status = match PolicyStatus::parse(&self.status) {
            Some(status) => status,
            None => {
                tracing::warn!(
                    id = self.id,
                    status = %self.status,
                    "skipping policy row with unknown status"
                );
                return None;
            }
        };
        Some(PolicyRecord {
            id: self.id,
            policy_name: self.policy_name,
            status,
            coverage_start_date: self.coverage_start_date,
            coverage_end_date: self.coverage_end_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
