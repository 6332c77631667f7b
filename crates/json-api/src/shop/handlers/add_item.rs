//! Add Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::StepResponse},
    state::State,
};

/// Add Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product: Uuid,
}

/// Add Item Handler
///
/// A card, book or treat replaces the one already chosen.
#[endpoint(
    tags("shop"),
    summary = "Add Item",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "No such product"),
        (status_code = StatusCode::CONFLICT, description = "Out of stock or over budget"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<StepResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let outcome = state
        .shop
        .add_item(session, json.into_inner().product.into())
        .await?;

    Ok(Json(outcome.into()))
}
