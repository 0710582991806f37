//! # Policy Service
//!
//! Orchestrates lookup, validation, persistence, and entity ↔ transfer
//! mapping for the policy CRUD operations. Field-presence validation has
//! already run at the extraction boundary when a service method is
//! entered; the coverage-date pass runs here, immediately before every
//! insert and update, on the fully built record.
//!
//! Each operation makes exactly one store mutation. When a database pool
//! is configured the mutation is written through, and a write-through
//! failure surfaces as a 500 rather than leaving the store and the
//! database silently diverged.

use chrono::{Local, NaiveDate};

use polman_core::{PageRequest, PagedResult, PolicyInput, PolicyRecord};

use crate::db;
use crate::error::ApiError;
use crate::state::AppState;

/// Stateless service over the shared [`AppState`].
#[derive(Clone)]
pub struct PolicyService {
    state: AppState,
}

impl PolicyService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Every stored policy, in storage order.
    pub fn list_all(&self) -> Vec<PolicyRecord> {
        self.state.policies.list()
    }

    /// One normalized window of policies.
    pub fn list_paged(&self, request: PageRequest) -> Result<PagedResult<PolicyRecord>, ApiError> {
        let (content, total) = self
            .state
            .policies
            .page(&request)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok(PagedResult::new(
            content,
            request.page(),
            request.size(),
            total,
        ))
    }

    /// Fetch a single policy.
    pub fn get_by_id(&self, id: i64) -> Result<PolicyRecord, ApiError> {
        self.state
            .policies
            .get(id)
            .ok_or_else(|| ApiError::policy_not_found(id))
    }

    /// Create a policy from a field-validated input. Stamps
    /// `created_at = updated_at = today` and assigns the id.
    pub async fn create(&self, input: PolicyInput) -> Result<PolicyRecord, ApiError> {
        let (policy_name, status, start, end) = take_client_fields(input)?;
        let today = today();

        let record = PolicyRecord {
            id: self.state.policies.allocate_id(),
            policy_name,
            status,
            coverage_start_date: start,
            coverage_end_date: end,
            created_at: today,
            updated_at: today,
        };
        record.check_coverage_dates(today)?;

        self.state.policies.insert(record.clone());
        if let Some(pool) = &self.state.db_pool {
            if let Err(e) = db::policies::insert(pool, &record).await {
                tracing::error!(policy_id = record.id, error = %e, "failed to persist policy to database");
                return Err(ApiError::Internal(
                    "policy recorded in-memory but database persist failed".to_string(),
                ));
            }
        }
        Ok(record)
    }

    /// Overwrite the client fields of an existing policy. Restamps
    /// `updated_at`, preserves `created_at`.
    pub async fn update(&self, id: i64, input: PolicyInput) -> Result<PolicyRecord, ApiError> {
        let existing = self
            .state
            .policies
            .get(id)
            .ok_or_else(|| ApiError::policy_not_found(id))?;
        let (policy_name, status, start, end) = take_client_fields(input)?;
        let today = today();

        let record = PolicyRecord {
            id,
            policy_name,
            status,
            coverage_start_date: start,
            coverage_end_date: end,
            created_at: existing.created_at,
            updated_at: today,
        };
        record.check_coverage_dates(today)?;

        self.state.policies.insert(record.clone());
        if let Some(pool) = &self.state.db_pool {
            if let Err(e) = db::policies::update(pool, &record).await {
                tracing::error!(policy_id = record.id, error = %e, "failed to persist policy to database");
                return Err(ApiError::Internal(
                    "policy update recorded in-memory but database persist failed".to_string(),
                ));
            }
        }
        Ok(record)
    }

    /// Remove a policy. No partial state change on a missing id.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if !self.state.policies.contains(id) {
            return Err(ApiError::policy_not_found(id));
        }
        self.state.policies.remove(id);
        if let Some(pool) = &self.state.db_pool {
            if let Err(e) = db::policies::delete(pool, id).await {
                tracing::error!(policy_id = id, error = %e, "failed to delete policy from database");
                return Err(ApiError::Internal(
                    "policy removed in-memory but database delete failed".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The local calendar date, matching the original service's notion of
/// "today" for stamping and the start-in-past check.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Destructure a field-validated input into its client fields.
///
/// The extraction boundary has already run the presence pass, so absence
/// here means a caller skipped it; re-report it as the same validation
/// failure rather than panicking.
fn take_client_fields(
    input: PolicyInput,
) -> Result<
    (
        String,
        polman_core::PolicyStatus,
        NaiveDate,
        NaiveDate,
    ),
    ApiError,
> {
    input.validate_fields().map_err(ApiError::Validation)?;
    let PolicyInput {
        policy_name: Some(policy_name),
        status: Some(status),
        coverage_start_date: Some(start),
        coverage_end_date: Some(end),
        ..
    } = input
    else {
        return Err(ApiError::Validation(polman_core::FieldErrors::new()));
    };
    Ok((policy_name, status, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use polman_core::{CoverageDateError, PolicyStatus};

    fn service() -> PolicyService {
        PolicyService::new(AppState::new())
    }

    fn valid_input() -> PolicyInput {
        let start = today() + Days::new(7);
        PolicyInput {
            policy_name: Some("Fleet cover".to_string()),
            status: Some(PolicyStatus::Active),
            coverage_start_date: Some(start),
            coverage_end_date: Some(start + Days::new(365)),
            ..PolicyInput::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_stamps_both_dates_today() {
        let service = service();
        let record = service.create(valid_input()).await.unwrap();
        assert!(record.id > 0);
        assert_eq!(record.created_at, today());
        assert_eq!(record.updated_at, today());
    }

    #[tokio::test]
    async fn create_then_get_round_trips_all_fields() {
        let service = service();
        let input = valid_input();
        let created = service.create(input.clone()).await.unwrap();
        let fetched = service.get_by_id(created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.policy_name, "Fleet cover");
        assert_eq!(
            Some(fetched.coverage_start_date),
            input.coverage_start_date
        );
    }

    #[tokio::test]
    async fn create_start_in_past_is_a_date_violation_not_a_field_one() {
        let service = service();
        let input = PolicyInput {
            coverage_start_date: Some(today() - Days::new(1)),
            ..valid_input()
        };
        let err = service.create(input).await.unwrap_err();
        match err {
            ApiError::InvalidDates(CoverageDateError::StartInPast) => {}
            other => panic!("expected InvalidDates, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_end_before_start_is_rejected() {
        let service = service();
        let start = today() + Days::new(30);
        let input = PolicyInput {
            coverage_start_date: Some(start),
            coverage_end_date: Some(start - Days::new(10)),
            ..valid_input()
        };
        let err = service.create(input).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidDates(CoverageDateError::EndBeforeStart)
        ));
    }

    #[tokio::test]
    async fn rejected_create_leaves_no_record_behind() {
        let service = service();
        let input = PolicyInput {
            coverage_start_date: Some(today() - Days::new(1)),
            ..valid_input()
        };
        let _ = service.create(input).await;
        assert!(service.list_all().is_empty());
    }

    #[tokio::test]
    async fn update_preserves_created_at_and_restamps_updated_at() {
        let service = service();
        let created = service.create(valid_input()).await.unwrap();

        // Age the stored record so the restamp is observable.
        let mut aged = created.clone();
        aged.created_at = today() - Days::new(90);
        aged.updated_at = today() - Days::new(90);
        service.state.policies.insert(aged.clone());

        let updated = service
            .update(
                created.id,
                PolicyInput {
                    policy_name: Some("Fleet cover v2".to_string()),
                    ..valid_input()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.policy_name, "Fleet cover v2");
        assert_eq!(updated.created_at, aged.created_at);
        assert_eq!(updated.updated_at, today());
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let err = service().update(999, valid_input()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create(valid_input()).await.unwrap();
        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get_by_id(created.id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let err = service().delete(404).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_paged_twelve_records_default_request() {
        let service = service();
        for i in 0..12 {
            let input = PolicyInput {
                policy_name: Some(format!("policy-{i:02}")),
                ..valid_input()
            };
            service.create(input).await.unwrap();
        }

        let first = service.list_paged(PageRequest::default()).unwrap();
        assert_eq!(first.content.len(), 5);
        assert_eq!(first.total_elements, 12);
        assert_eq!(first.total_pages, 3);
        assert!(!first.last);
        let ids: Vec<i64> = first.content.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let last_page = service
            .list_paged(PageRequest::new(2, 5, "id", "asc").unwrap())
            .unwrap();
        assert_eq!(last_page.content.len(), 2);
        assert!(last_page.last);
    }

    #[tokio::test]
    async fn list_paged_unknown_sort_field_is_internal() {
        let service = service();
        service.create(valid_input()).await.unwrap();
        let err = service
            .list_paged(PageRequest::new(0, 5, "premium", "asc").unwrap())
            .unwrap_err();
        match err {
            ApiError::Internal(msg) => assert!(msg.contains("premium"), "got: {msg}"),
            other => panic!("expected Internal, got: {other:?}"),
        }
    }
}
