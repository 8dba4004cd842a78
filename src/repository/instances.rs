//! Book instances repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::instance::{
        BookInstance, CreateBookInstance, LoanListEntry, LoanStatus, UpdateBookInstance,
    },
    repository::{page_offset, PAGE_SIZE},
};

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get instance by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    fn entry_from_row(row: &sqlx::postgres::PgRow, today: NaiveDate) -> LoanListEntry {
        let due_back: Option<NaiveDate> = row.get("due_back");
        LoanListEntry {
            id: row.get("id"),
            book_id: row.get("book_id"),
            book_title: row.get("book_title"),
            imprint: row.get("imprint"),
            due_back,
            status: row.get("status"),
            borrower_id: row.get("borrower_id"),
            borrower_name: row.get("borrower_name"),
            is_overdue: due_back.map(|due| due < today).unwrap_or(false),
        }
    }

    /// List all instances, due date ascending (copies without a due date
    /// first), one page at a time
    pub async fn list(&self, page: i64, today: NaiveDate) -> AppResult<(Vec<LoanListEntry>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title,
                   u.username AS borrower_name
            FROM book_instances bi
            LEFT JOIN books b ON b.id = bi.book_id
            LEFT JOIN users u ON u.id = bi.borrower_id
            ORDER BY bi.due_back ASC NULLS FIRST, bi.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.pool)
        .await?;

        let entries = rows.iter().map(|row| Self::entry_from_row(row, today)).collect();
        Ok((entries, total))
    }

    /// Copies a user currently has on loan, due date ascending
    pub async fn list_by_borrower(
        &self,
        borrower_id: i32,
        page: i64,
        today: NaiveDate,
    ) -> AppResult<(Vec<LoanListEntry>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_instances WHERE borrower_id = $1 AND status = 'o'",
        )
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title,
                   u.username AS borrower_name
            FROM book_instances bi
            LEFT JOIN books b ON b.id = bi.book_id
            LEFT JOIN users u ON u.id = bi.borrower_id
            WHERE bi.borrower_id = $1 AND bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS FIRST, bi.id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(borrower_id)
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.pool)
        .await?;

        let entries = rows.iter().map(|row| Self::entry_from_row(row, today)).collect();
        Ok((entries, total))
    }

    /// All copies currently on loan, due date ascending.
    ///
    /// Deliberately not restricted to overdue copies.
    pub async fn list_on_loan(
        &self,
        page: i64,
        today: NaiveDate,
    ) -> AppResult<(Vec<LoanListEntry>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = 'o'")
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query(
            r#"
            SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, bi.borrower_id,
                   b.title AS book_title,
                   u.username AS borrower_name
            FROM book_instances bi
            LEFT JOIN books b ON b.id = bi.book_id
            LEFT JOIN users u ON u.id = bi.borrower_id
            WHERE bi.status = 'o'
            ORDER BY bi.due_back ASC NULLS FIRST, bi.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(page))
        .fetch_all(&self.pool)
        .await?;

        let entries = rows.iter().map(|row| Self::entry_from_row(row, today)).collect();
        Ok((entries, total))
    }

    /// Create a new instance with a random unique id
    pub async fn create(&self, instance: &CreateBookInstance) -> AppResult<BookInstance> {
        let created = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status, borrower_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.due_back)
        .bind(instance.status.unwrap_or_default())
        .bind(instance.borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing instance (fields absent from the request are kept)
    pub async fn update(&self, id: Uuid, update: &UpdateBookInstance) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = COALESCE($2, book_id),
                imprint = COALESCE($3, imprint),
                due_back = COALESCE($4, due_back),
                status = COALESCE($5, status),
                borrower_id = COALESCE($6, borrower_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.book_id)
        .bind(&update.imprint)
        .bind(update.due_back)
        .bind(update.status)
        .bind(update.borrower_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Move the due date of a copy; nothing else is touched
    pub async fn set_due_back(&self, id: Uuid, due_back: NaiveDate) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET due_back = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    /// Delete an instance (nothing references instances, so no nulling pass)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }

        Ok(())
    }

    /// Count all instances
    pub async fn count_all(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count instances with a given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count instances whose due date is strictly in the past
    pub async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE due_back < $1")
                .bind(today)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
