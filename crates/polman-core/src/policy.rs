//! # Policy Records
//!
//! The persisted [`PolicyRecord`] entity and the [`PolicyInput`] transfer
//! shape exchanged over the API boundary. The two differ only in that the
//! transfer shape leaves the storage-managed fields (`id`, `created_at`,
//! `updated_at`) unset and carries the client fields as `Option` so that
//! presence validation can run over them — JSON `null` and an absent key
//! both count as missing.
//!
//! Wire names are camelCase (`policyName`, `coverageStartDate`, ...) to
//! match the API contract consumed by the frontend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a policy, stored and serialized as an upper-case
/// string (`"ACTIVE"` / `"INACTIVE"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyStatus {
    Active,
    Inactive,
}

impl PolicyStatus {
    /// Storage representation, identical to the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// Parse the storage representation. Returns `None` for anything that
    /// is not exactly `"ACTIVE"` or `"INACTIVE"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            _ => None,
        }
    }
}

/// A persisted insurance policy.
///
/// `id` is assigned by the store at first save and never reused.
/// `created_at` is stamped once at first save; `updated_at` is restamped
/// at every save. All dates are calendar dates without time-of-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    pub id: i64,
    pub policy_name: String,
    pub status: PolicyStatus,
    pub coverage_start_date: NaiveDate,
    pub coverage_end_date: NaiveDate,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

impl PolicyRecord {
    /// Coverage-date consistency check on the entity path. Runs immediately
    /// before every insert and update; see [`crate::validate::check_coverage_dates`].
    pub fn check_coverage_dates(&self, today: NaiveDate) -> Result<(), crate::CoverageDateError> {
        crate::validate::check_coverage_dates(
            Some(self.coverage_start_date),
            Some(self.coverage_end_date),
            today,
        )
    }
}

/// The transfer representation accepted by create and update.
///
/// The client fields are optional so the field-presence pass can report
/// every missing field at once instead of failing at deserialization.
/// `id`, `created_at` and `updated_at` are accepted but ignored — they are
/// storage-managed.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub policy_name: Option<String>,
    #[serde(default)]
    pub status: Option<PolicyStatus>,
    #[serde(default)]
    pub coverage_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub coverage_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

impl PolicyInput {
    /// Coverage-date consistency check on the transfer shape. Unlike the
    /// entity path this may see absent dates and must not assume presence.
    pub fn check_coverage_dates(&self, today: NaiveDate) -> Result<(), crate::CoverageDateError> {
        crate::validate::check_coverage_dates(
            self.coverage_start_date,
            self.coverage_end_date,
            today,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_repr() {
        assert_eq!(PolicyStatus::parse("ACTIVE"), Some(PolicyStatus::Active));
        assert_eq!(PolicyStatus::parse("INACTIVE"), Some(PolicyStatus::Inactive));
        assert_eq!(PolicyStatus::parse("active"), None);
        assert_eq!(PolicyStatus::parse("PENDING"), None);
        assert_eq!(PolicyStatus::Active.as_str(), "ACTIVE");
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&PolicyStatus::Inactive).unwrap();
        assert_eq!(json, "\"INACTIVE\"");
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = PolicyRecord {
            id: 7,
            policy_name: "Home".to_string(),
            status: PolicyStatus::Active,
            coverage_start_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            coverage_end_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            created_at: NaiveDate::from_ymd_opt(2029, 6, 1).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2029, 6, 1).unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["policyName"], "Home");
        assert_eq!(value["coverageStartDate"], "2030-01-01");
        assert_eq!(value["createdAt"], "2029-06-01");
    }

    #[test]
    fn input_tolerates_missing_and_null_fields() {
        let input: PolicyInput = serde_json::from_str(r#"{"policyName":null}"#).unwrap();
        assert!(input.policy_name.is_none());
        assert!(input.status.is_none());

        let input: PolicyInput = serde_json::from_str("{}").unwrap();
        assert!(input.coverage_start_date.is_none());
    }

    #[test]
    fn input_parses_full_body() {
        let input: PolicyInput = serde_json::from_str(
            r#"{"policyName":"Auto","status":"ACTIVE","coverageStartDate":"2031-01-01","coverageEndDate":"2031-06-30"}"#,
        )
        .unwrap();
        assert_eq!(input.policy_name.as_deref(), Some("Auto"));
        assert_eq!(input.status, Some(PolicyStatus::Active));
        assert!(input.id.is_none());
    }
}
