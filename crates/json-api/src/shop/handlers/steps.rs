//! Visit Step Handler

use std::sync::Arc;

use birthday_box_app::domain::flow::FlowStep;
use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::DraftResponse},
    state::State,
};

/// Visit Step Handler
///
/// Checks the step may be shown for the session's draft.
#[endpoint(
    tags("shop"),
    summary = "Visit Step",
    responses(
        (status_code = StatusCode::OK, description = "Step is open"),
        (status_code = StatusCode::NOT_FOUND, description = "No such step"),
        (status_code = StatusCode::CONFLICT, description = "Step not yet reachable"),
    ),
)]
pub(crate) async fn handler(
    step: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<DraftResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let step = step
        .into_inner()
        .parse::<FlowStep>()
        .map_err(|_unknown| StatusError::not_found().brief("Unknown step"))?;

    let draft = state.shop.visit(session, step).await?;

    Ok(Json((&draft).into()))
}
