//! Shop

pub mod errors;
pub mod models;
pub mod service;

pub use errors::ShopError;
pub use service::*;
