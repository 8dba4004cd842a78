//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan status of a physical copy.
///
/// Stored as the single-character codes inherited from the catalog data:
/// d = maintenance, o = on loan, a = available, r = reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "d",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            other => Err(format!("Invalid loan status code: {}", other)),
        }
    }
}

// SQLx conversion: stored as the one-character code string
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// A physical copy of a book, individually trackable for loans
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique id for this particular copy across the whole library
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
}

impl BookInstance {
    /// A copy is overdue when a due date is set and strictly before `today`.
    /// A copy due back today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_back.map(|due| due < today).unwrap_or(false)
    }
}

/// Instance with book title and borrower for loan list views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanListEntry {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower_name: Option<String>,
    pub is_overdue: bool,
}

/// Create instance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[serde(default)]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Defaults to maintenance when omitted
    pub status: Option<LoanStatus>,
    pub borrower_id: Option<i32>,
}

/// Update instance request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookInstance {
    pub book_id: Option<i32>,
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub borrower_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn instance(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: None,
            imprint: "Test Imprint, 2016".to_string(),
            due_back,
            status: LoanStatus::OnLoan,
            borrower_id: None,
        }
    }

    #[test]
    fn not_overdue_without_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(!instance(None).is_overdue(today));
    }

    #[test]
    fn not_overdue_when_due_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(!instance(Some(today)).is_overdue(today));
    }

    #[test]
    fn overdue_when_due_yesterday() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(instance(Some(today - Duration::days(1))).is_overdue(today));
    }

    #[test]
    fn not_overdue_when_due_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert!(!instance(Some(today + Duration::days(1))).is_overdue(today));
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
    }

    #[test]
    fn status_parse_rejects_unknown_code() {
        assert!("x".parse::<LoanStatus>().is_err());
        assert_eq!("o".parse::<LoanStatus>(), Ok(LoanStatus::OnLoan));
    }
}
