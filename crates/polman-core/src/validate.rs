//! # Validation Passes
//!
//! Two independent checks over the same logical fields, composed by the
//! service but never merged:
//!
//! 1. **Field presence** ([`PolicyInput::validate_fields`]): runs over the
//!    transfer shape before the service body. Collects every violation
//!    into a field → message map rather than failing on the first.
//!
//! 2. **Coverage-date consistency** ([`check_coverage_dates`]): runs on
//!    the entity path immediately before every insert and update. Fails
//!    fast with a single message — start-in-past is checked before
//!    end-before-start. Only checks dates that are actually present, so it
//!    is safe to invoke without the presence pass having run first.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::policy::PolicyInput;

/// Per-field validation messages collected by the presence pass.
///
/// Keyed by wire field name. Multiple violations for one field are merged
/// into a single message joined with `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation, merging with any message already present for
    /// the field.
    pub fn push(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .and_modify(|m| {
                m.push_str("; ");
                m.push_str(message);
            })
            .or_insert_with(|| message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The underlying field → message map, for serialization into the
    /// error body's `errors` object.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

/// Coverage-date consistency failure. Single message, never field-scoped —
/// distinct in shape from the presence pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoverageDateError {
    #[error("Coverage start date cannot be in the past")]
    StartInPast,
    #[error("Coverage end date must be after start date")]
    EndBeforeStart,
}

/// Check coverage-date consistency against `today`.
///
/// Conditions, in order (the first violation wins):
/// - a present start date strictly before `today`;
/// - both dates present with the end before the start.
///
/// Absent dates are skipped, not rejected — presence is the other pass's
/// job, and this function is reachable without it.
pub fn check_coverage_dates(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(), CoverageDateError> {
    if let Some(start) = start {
        if start < today {
            return Err(CoverageDateError::StartInPast);
        }
    }
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(CoverageDateError::EndBeforeStart);
        }
    }
    Ok(())
}

impl PolicyInput {
    /// Field-presence validation over the transfer shape.
    ///
    /// Collects all violations before reporting. A blank `policyName`
    /// (empty or whitespace-only) counts as missing.
    pub fn validate_fields(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        match &self.policy_name {
            Some(name) if !name.trim().is_empty() => {}
            _ => errors.push("policyName", "Policy name is required"),
        }
        if self.status.is_none() {
            errors.push("status", "Status is required");
        }
        if self.coverage_start_date.is_none() {
            errors.push("coverageStartDate", "Coverage start date is required");
        }
        if self.coverage_end_date.is_none() {
            errors.push("coverageEndDate", "Coverage end date is required");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
