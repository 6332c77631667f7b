//! Depot helper extensions.

use std::any::Any;

use birthday_box_app::domain::drafts::SessionKey;
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_session_key(&mut self, session: SessionKey);

    /// The session resolved by the session middleware.
    fn session_key_or_500(&self) -> Result<&SessionKey, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_session_key(&mut self, session: SessionKey) {
        self.inject(session);
    }

    fn session_key_or_500(&self) -> Result<&SessionKey, StatusError> {
        self.obtain_or_500::<SessionKey>()
    }
}
