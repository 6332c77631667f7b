//! Select Agency Handler

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

/// Select Agency Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SelectAgencyRequest {
    pub agency: Uuid,

    /// The agency's three letter code, in any case
    pub code: String,
}

/// Select Agency Handler
#[endpoint(
    tags("shop"),
    summary = "Select Agency",
    responses(
        (status_code = StatusCode::OK, description = "Agency chosen"),
        (status_code = StatusCode::CONFLICT, description = "Unknown, inactive or code mismatch"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SelectAgencyRequest>,
    depot: &mut Depot,
) -> Result<Json<StepResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;
    let request = json.into_inner();

    let outcome = state
        .shop
        .select_agency(session, request.agency.into(), &request.code)
        .await?;

    Ok(Json(outcome.into()))
}
