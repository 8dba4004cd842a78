//! Catalog management service (authors, genres, languages, books, copies)

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        book::{BookDetails, BookShort, CreateBook, UpdateBook},
        genre::{CreateGenre, Genre, UpdateGenre},
        instance::{BookInstance, CreateBookInstance, LoanListEntry, UpdateBookInstance},
        language::{CreateLanguage, Language, UpdateLanguage},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Authors

    pub async fn list_authors(&self, page: i64) -> AppResult<(Vec<Author>, i64)> {
        self.repository.authors.list(page).await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(&author).await
    }

    pub async fn update_author(&self, id: i32, author: UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, &author).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }

    // Genres

    pub async fn list_genres(&self, page: i64) -> AppResult<(Vec<Genre>, i64)> {
        self.repository.genres.list(page).await
    }

    pub async fn get_genre(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn create_genre(&self, genre: CreateGenre) -> AppResult<Genre> {
        self.repository.genres.create(&genre).await
    }

    pub async fn update_genre(&self, id: i32, genre: UpdateGenre) -> AppResult<Genre> {
        self.repository.genres.update(id, &genre).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    // Languages

    pub async fn list_languages(&self, page: i64) -> AppResult<(Vec<Language>, i64)> {
        self.repository.languages.list(page).await
    }

    pub async fn get_language(&self, id: i32) -> AppResult<Language> {
        self.repository.languages.get_by_id(id).await
    }

    pub async fn create_language(&self, language: CreateLanguage) -> AppResult<Language> {
        self.repository.languages.create(&language).await
    }

    pub async fn update_language(&self, id: i32, language: UpdateLanguage) -> AppResult<Language> {
        self.repository.languages.update(id, &language).await
    }

    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }

    // Books

    pub async fn list_books(&self, page: i64) -> AppResult<(Vec<BookShort>, i64)> {
        self.repository.books.list(page).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        self.repository.books.create(&book).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<BookDetails> {
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    // Book instances

    pub async fn list_instances(
        &self,
        page: i64,
        today: NaiveDate,
    ) -> AppResult<(Vec<LoanListEntry>, i64)> {
        self.repository.instances.list(page, today).await
    }

    pub async fn get_instance(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.instances.get_by_id(id).await
    }

    pub async fn create_instance(&self, instance: CreateBookInstance) -> AppResult<BookInstance> {
        self.repository.instances.create(&instance).await
    }

    pub async fn update_instance(
        &self,
        id: Uuid,
        instance: UpdateBookInstance,
    ) -> AppResult<BookInstance> {
        self.repository.instances.update(id, &instance).await
    }

    pub async fn delete_instance(&self, id: Uuid) -> AppResult<()> {
        self.repository.instances.delete(id).await
    }
}
