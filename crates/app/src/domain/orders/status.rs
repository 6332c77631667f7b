//! Order status rules.

use crate::domain::orders::{errors::OrdersServiceError, records::OrderStatus};

/// Outcome of an accepted status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The order already has the requested status.
    Unchanged,
    Changed,
}

/// Validate an administrative status change.
///
/// Only pending orders move, and only to completed or cancelled. Cancelling
/// through here does not restock; use a refund for that.
///
/// # Errors
///
/// Returns [`OrdersServiceError::InvalidStatusTransition`] for any other move.
pub fn check_transition(
    from: OrderStatus,
    to: OrderStatus,
) -> Result<Transition, OrdersServiceError> {
    match (from, to) {
        (from, to) if from == to => Ok(Transition::Unchanged),
        (OrderStatus::Pending, OrderStatus::Completed | OrderStatus::Cancelled) => {
            Ok(Transition::Changed)
        }
        (from, to) => Err(OrdersServiceError::InvalidStatusTransition { from, to }),
    }
}

/// Validate a refund. A cancelled order has already given its stock back.
///
/// # Errors
///
/// Returns [`OrdersServiceError::AlreadyRefunded`] for cancelled orders.
pub fn check_refund(status: OrderStatus) -> Result<(), OrdersServiceError> {
    match status {
        OrderStatus::Cancelled => Err(OrdersServiceError::AlreadyRefunded),
        OrderStatus::Pending | OrderStatus::Completed => Ok(()),
    }
}
