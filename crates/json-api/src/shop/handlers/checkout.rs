//! Checkout Handler

use std::sync::Arc;

use birthday_box_app::domain::shop::ShopError;
use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    shop::errors::ShopRejection,
    state::State,
};

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The placed order
    pub order: Uuid,
}

/// Checkout Handler
///
/// Places the order and clears the draft. A failed checkout keeps the draft
/// so the shopper can try again from review.
#[endpoint(
    tags("shop"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::CONFLICT, description = "Box incomplete or checkout failed"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let order = match state.shop.checkout(session).await {
        Ok(order) => order,
        Err(error) => {
            let failed = matches!(error, ShopError::Checkout(_)) || error.redirect().is_none();

            record_checkout(if failed {
                CheckoutOutcome::Failed
            } else {
                CheckoutOutcome::Rejected
            });

            return Err(error.into());
        }
    };

    record_checkout(CheckoutOutcome::Placed);

    res.add_header(LOCATION, format!("/orders/{order}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        order: order.into(),
    }))
}
