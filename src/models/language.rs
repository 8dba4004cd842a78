//! Language model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A book's language (e.g. "English"). Free text, no uniqueness enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Language {
    pub id: i32,
    pub name: String,
}

/// Create language request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLanguage {
    pub name: String,
}

/// Update language request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLanguage {
    pub name: Option<String>,
}
