//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, orders::models::OrderResponse, shop::errors::ShopRejection, state::State};

/// Get Order Handler
///
/// Returns a placed order for the confirmation page.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "The order"),
        (status_code = StatusCode::NOT_FOUND, description = "No such order"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state.shop.order(order.into_inner().into()).await?;

    Ok(Json(order.into()))
}
