//! Orders

pub mod checkout;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod status;

pub use errors::{CheckoutError, OrdersServiceError};
pub use service::*;
