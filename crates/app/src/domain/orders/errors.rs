//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{catalog::records::ProductUuid, orders::records::OrderStatus};

/// Why a draft could not be turned into an order. Nothing is persisted when
/// any of these is returned.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("a card, book and treat are required before checkout")]
    IncompleteSelection,

    #[error("product {product} no longer exists")]
    ProductNotFound { product: ProductUuid },

    #[error("product {product} has {available} left, {requested} requested")]
    InsufficientInventory {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },

    #[error("checkout transaction failed")]
    CheckoutFailed(#[source] Error),
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        Self::CheckoutFailed(error)
    }
}

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("order has already been refunded")]
    AlreadyRefunded,

    #[error("cannot move an order from {from} to {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("invalid order data")]
    InvalidData(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => Self::NotFound,
            Error::ColumnDecode { .. } | Error::Decode(_) => Self::InvalidData(error),
            _ => Self::Sql(error),
        }
    }
}
