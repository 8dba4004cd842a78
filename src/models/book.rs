//! Book (catalog title) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{author::Author, genre::Genre, language::Language};

/// Book row from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    /// 13-character ISBN. Stored as given; the format is not validated.
    pub isbn: String,
    pub language_id: Option<i32>,
}

/// Book with linked author, language and genres for detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<Author>,
    pub language: Option<Language>,
    pub genres: Vec<Genre>,
}

impl BookDetails {
    /// Comma-separated genre names, capped at three entries for list display
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(3)
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookShort {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    /// Author display name ("Surname, Firstname"), when an author is linked
    pub author_name: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author_id: Option<i32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
    pub language_id: Option<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    /// Replaces the full genre set when present
    pub genre_ids: Option<Vec<i32>>,
    pub language_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    fn book_with_genres(genres: Vec<Genre>) -> BookDetails {
        BookDetails {
            id: 1,
            title: "Test Book".to_string(),
            summary: String::new(),
            isbn: String::new(),
            author: None,
            language: None,
            genres,
        }
    }

    #[test]
    fn display_genre_joins_names() {
        let book = book_with_genres(vec![genre(1, "Poetry"), genre(2, "Drama")]);
        assert_eq!(book.display_genre(), "Poetry, Drama");
    }

    #[test]
    fn display_genre_caps_at_three() {
        let book = book_with_genres(vec![
            genre(1, "Poetry"),
            genre(2, "Drama"),
            genre(3, "Essay"),
            genre(4, "Satire"),
        ]);
        assert_eq!(book.display_genre(), "Poetry, Drama, Essay");
    }

    #[test]
    fn display_genre_empty_without_genres() {
        let book = book_with_genres(vec![]);
        assert_eq!(book.display_genre(), "");
    }
}
