//! Drafts

pub mod codec;
pub mod errors;
pub mod models;
pub mod store;

pub use errors::{DraftCodecError, DraftError, DraftStoreError};
pub use store::*;
