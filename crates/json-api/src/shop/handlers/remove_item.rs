//! Remove Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::DraftResponse},
    state::State,
};

/// Remove Item Handler
///
/// Removing a product that is not in the box leaves it unchanged.
#[endpoint(
    tags("shop"),
    summary = "Remove Item",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::CONFLICT, description = "Session has no draft"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DraftResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let draft = state
        .shop
        .remove_item(session, product.into_inner().into())
        .await?;

    Ok(Json((&draft).into()))
}
