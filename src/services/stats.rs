//! Catalog summary counts

use chrono::NaiveDate;

use crate::{
    api::stats::SummaryResponse,
    error::AppResult,
    models::instance::LoanStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Headline counts for the catalog landing page
    pub async fn get_summary(&self, today: NaiveDate) -> AppResult<SummaryResponse> {
        let pool = &self.repository.pool;

        let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await?;

        let authors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(pool)
            .await?;

        let genres: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(pool)
            .await?;

        let languages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(pool)
            .await?;

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        let instances = self.repository.instances.count_all().await?;
        let instances_available = self
            .repository
            .instances
            .count_by_status(LoanStatus::Available)
            .await?;
        let instances_on_loan = self
            .repository
            .instances
            .count_by_status(LoanStatus::OnLoan)
            .await?;
        let instances_overdue = self.repository.instances.count_overdue(today).await?;

        Ok(SummaryResponse {
            books,
            authors,
            genres,
            languages,
            users,
            instances,
            instances_available,
            instances_on_loan,
            instances_overdue,
        })
    }
}
