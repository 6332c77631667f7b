//! Browse Products Handler

use std::sync::Arc;

use birthday_box_app::domain::{catalog::records::ProductFilters, categories::Category};
use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::BrowseResponse},
    state::State,
};

/// Browse Products Handler
///
/// Lists in-stock products for a category step, cheapest first. Filters
/// apply to gifts only.
#[endpoint(
    tags("shop"),
    summary = "Browse Products",
    responses(
        (status_code = StatusCode::OK, description = "Products on offer"),
        (status_code = StatusCode::NOT_FOUND, description = "No such category"),
        (status_code = StatusCode::CONFLICT, description = "Step not yet reachable or category unavailable"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<String>,
    subcategory: QueryParam<Uuid, false>,
    min_points: QueryParam<u32, false>,
    max_points: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BrowseResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let category = category
        .into_inner()
        .parse::<Category>()
        .map_err(|_unknown| StatusError::not_found().brief("Unknown category"))?;

    let filters = ProductFilters {
        subcategory: subcategory.into_inner().map(Into::into),
        min_points: min_points.into_inner(),
        max_points: max_points.into_inner(),
    };

    let result = state.shop.browse(session, category, filters).await?;

    Ok(Json(result.into()))
}
