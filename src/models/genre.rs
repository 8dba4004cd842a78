//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A book genre (e.g. "Science Fiction", "French Poetry").
///
/// Names are free text; no uniqueness is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Create genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenre {
    pub name: String,
}

/// Update genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateGenre {
    pub name: Option<String>,
}
