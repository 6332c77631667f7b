//! Get Draft Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::DraftResponse},
    state::State,
};

/// Get Draft Handler
///
/// Returns the session's box so far; a new session gets an empty one.
#[endpoint(tags("shop"), summary = "Get Draft")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DraftResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let draft = state.shop.draft(session).await?;

    Ok(Json((&draft).into()))
}
