//! List Agencies Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::AgencyResponse},
    state::State,
};

/// List Agencies Handler
///
/// Active agencies, by name.
#[endpoint(tags("agencies"), summary = "List Agencies")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<AgencyResponse>>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let agencies = state.shop.agencies().await?;

    Ok(Json(agencies.into_iter().map(Into::into).collect()))
}
