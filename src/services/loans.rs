//! Loan workflow: renewal validation and outstanding-loan queries

use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, RenewalError},
    models::{
        instance::{BookInstance, LoanListEntry},
        user::UserClaims,
    },
    repository::Repository,
};

/// A due date may be pushed at most this far past today (inclusive)
pub const RENEWAL_WINDOW_WEEKS: i64 = 4;

/// Proposal offset used when the caller supplies no date
pub const DEFAULT_RENEWAL_WEEKS: i64 = 3;

/// Validate a proposed renewal date against `today`.
///
/// Both bounds are inclusive: `today` itself and `today + 4 weeks` are
/// acceptable due dates.
pub fn validate_renewal(proposed: NaiveDate, today: NaiveDate) -> Result<NaiveDate, RenewalError> {
    if proposed < today {
        return Err(RenewalError::PastDate);
    }
    if proposed > today + Duration::weeks(RENEWAL_WINDOW_WEEKS) {
        return Err(RenewalError::TooFarAhead);
    }
    Ok(proposed)
}

/// Due date offered when the caller does not supply one
pub fn default_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::weeks(DEFAULT_RENEWAL_WEEKS)
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Renew a copy: move its due date to `proposed`, or to the default
    /// proposal when no date is given.
    ///
    /// The capability gate runs first, then the instance lookup, then date
    /// validation; a rejected date leaves the instance untouched. The loan
    /// status is never changed by a renewal.
    pub async fn renew(
        &self,
        claims: &UserClaims,
        instance_id: Uuid,
        proposed: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AppResult<BookInstance> {
        claims.require_mark_returned()?;

        self.repository.instances.get_by_id(instance_id).await?;

        let proposed = proposed.unwrap_or_else(|| default_renewal_date(today));
        let accepted = validate_renewal(proposed, today).map_err(AppError::Renewal)?;

        self.repository.instances.set_due_back(instance_id, accepted).await
    }

    /// Default renewal proposal for a copy, for form prefill.
    ///
    /// Gated like the renewal itself, and 404s on a missing copy so the
    /// caller learns about a stale id before submitting.
    pub async fn renewal_proposal(
        &self,
        claims: &UserClaims,
        instance_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<NaiveDate> {
        claims.require_mark_returned()?;
        self.repository.instances.get_by_id(instance_id).await?;
        Ok(default_renewal_date(today))
    }

    /// Copies the current user has on loan, due date ascending
    pub async fn my_loans(
        &self,
        claims: &UserClaims,
        page: i64,
        today: NaiveDate,
    ) -> AppResult<(Vec<LoanListEntry>, i64)> {
        self.repository
            .instances
            .list_by_borrower(claims.user_id, page, today)
            .await
    }

    /// All copies currently on loan, due date ascending.
    ///
    /// Lists every on-loan copy, not just the overdue ones.
    pub async fn all_on_loan(
        &self,
        claims: &UserClaims,
        page: i64,
        today: NaiveDate,
    ) -> AppResult<(Vec<LoanListEntry>, i64)> {
        claims.require_mark_returned()?;
        self.repository.instances.list_on_loan(page, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
    }

    #[test]
    fn accepts_today() {
        assert_eq!(validate_renewal(today(), today()), Ok(today()));
    }

    #[test]
    fn accepts_every_day_of_the_window() {
        for offset in 0..=28 {
            let proposed = today() + Duration::days(offset);
            assert_eq!(validate_renewal(proposed, today()), Ok(proposed));
        }
    }

    #[test]
    fn four_week_boundary_is_valid() {
        let boundary = today() + Duration::weeks(4);
        assert_eq!(validate_renewal(boundary, today()), Ok(boundary));
    }

    #[test]
    fn rejects_yesterday_as_past() {
        let yesterday = today() - Duration::days(1);
        assert_eq!(
            validate_renewal(yesterday, today()),
            Err(RenewalError::PastDate)
        );
    }

    #[test]
    fn rejects_any_past_date() {
        for offset in 1..60 {
            let proposed = today() - Duration::days(offset);
            assert_eq!(
                validate_renewal(proposed, today()),
                Err(RenewalError::PastDate)
            );
        }
    }

    #[test]
    fn rejects_day_after_window() {
        let too_far = today() + Duration::weeks(4) + Duration::days(1);
        assert_eq!(
            validate_renewal(too_far, today()),
            Err(RenewalError::TooFarAhead)
        );
    }

    #[test]
    fn rejects_far_future_dates() {
        for offset in 29..90 {
            let proposed = today() + Duration::days(offset);
            assert_eq!(
                validate_renewal(proposed, today()),
                Err(RenewalError::TooFarAhead)
            );
        }
    }

    #[test]
    fn default_proposal_is_three_weeks_out() {
        assert_eq!(default_renewal_date(today()) - today(), Duration::days(21));
        assert_eq!(
            default_renewal_date(today()),
            NaiveDate::from_ymd_opt(2024, 1, 29).unwrap()
        );
    }

    #[test]
    fn rejection_reasons_carry_exact_messages() {
        assert_eq!(RenewalError::PastDate.message(), "Invalid date - renewal in past");
        assert_eq!(
            RenewalError::TooFarAhead.message(),
            "Invalid date - renewal more than 4 weeks ahead"
        );
        assert_eq!(RenewalError::PastDate.code(), "PAST_DATE");
        assert_eq!(RenewalError::TooFarAhead.code(), "TOO_FAR_AHEAD");
    }
}
