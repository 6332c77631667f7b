//! Catalog service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::categories::Category;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("catalog entry not found")]
    NotFound,

    #[error("{0} category is missing or inactive")]
    CategoryUnavailable(Category),

    #[error("invalid catalog data")]
    InvalidData(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::ColumnDecode { .. } | Error::Decode(_) => Self::InvalidData(error),
            _ => Self::Sql(error),
        }
    }
}
