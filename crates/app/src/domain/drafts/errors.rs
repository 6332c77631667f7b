//! Draft errors.

use thiserror::Error;

use crate::domain::{catalog::records::ProductUuid, categories::Category};

/// Rejections raised while mutating a draft. The draft is unchanged whenever
/// one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("product {product} is out of stock")]
    OutOfStock {
        product: ProductUuid,
        category: Category,
    },

    #[error("not enough points for product {product}: {required} required, {available} available")]
    InsufficientPoints {
        product: ProductUuid,
        category: Category,
        required: u32,
        available: i64,
    },

    #[error("child age {age} is outside the eligible range")]
    InvalidAge { age: i32 },
}

/// Failures while encoding or decoding a stored draft.
#[derive(Debug, Error)]
pub enum DraftCodecError {
    #[error("malformed draft payload")]
    Json(#[from] serde_json::Error),

    #[error("unsupported draft format version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Error)]
pub enum DraftStoreError {
    #[error("failed to decode stored draft")]
    Codec(#[from] DraftCodecError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
