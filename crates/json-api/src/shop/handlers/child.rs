//! Child Details Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    shop::{errors::ShopRejection, models::StepResponse},
    state::State,
};

/// Child Details Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChildRequest {
    /// Date of birth, `YYYY-MM-DD`
    pub birth_date: String,
}

/// Child Details Handler
///
/// Fixes the child's age, and with it the points budget.
#[endpoint(
    tags("shop"),
    summary = "Enter Child Details",
    responses(
        (status_code = StatusCode::OK, description = "Age recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unparseable birth date"),
        (status_code = StatusCode::CONFLICT, description = "Ineligible age or no agency yet"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ChildRequest>,
    depot: &mut Depot,
) -> Result<Json<StepResponse>, ShopRejection> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_key_or_500()?;

    let birth_date = json
        .into_inner()
        .birth_date
        .parse::<Date>()
        .or_400("could not parse birth_date")?;

    let outcome = state.shop.enter_birth_date(session, birth_date).await?;

    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use birthday_box_app::domain::{
        flow::FlowStep,
        shop::{MockShopService, ShopError, errors::INVALID_AGE_MESSAGE, models::StepOutcome},
    };
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        session::SESSION_KEY_HEADER,
        shop::errors::RejectionBody,
        test_helpers::{TEST_SESSION, make_draft, shop_service},
    };

    use super::*;

    fn make_service(shop: MockShopService) -> Service {
        shop_service(shop, Router::with_path("shop/child").post(handler))
    }

    #[tokio::test]
    async fn test_birth_date_moves_to_get_ready_to_shop() -> TestResult {
        let draft = make_draft()?;
        let mut shop = MockShopService::new();

        shop.expect_enter_birth_date()
            .once()
            .withf(|_, birth_date| *birth_date == date(2016, 1, 1))
            .return_once(move |_, _| {
                Ok(StepOutcome {
                    next: FlowStep::GetReadyToShop,
                    draft,
                })
            });

        let mut res = TestClient::post("http://example.com/shop/child")
            .add_header(SESSION_KEY_HEADER, TEST_SESSION, true)
            .json(&json!({ "birth_date": "2016-01-01" }))
            .send(&make_service(shop))
            .await;

        let body: StepResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.next, "get_ready_to_shop");
        assert_eq!(body.draft.points_assigned, 65);

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_birth_date_returns_400() {
        let mut shop = MockShopService::new();

        shop.expect_enter_birth_date().never();

        let res = TestClient::post("http://example.com/shop/child")
            .add_header(SESSION_KEY_HEADER, TEST_SESSION, true)
            .json(&json!({ "birth_date": "last tuesday" }))
            .send(&make_service(shop))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_ineligible_age_redirects_back() -> TestResult {
        let mut shop = MockShopService::new();

        shop.expect_enter_birth_date()
            .once()
            .return_once(|_, _| Err(ShopError::InvalidAge { age: 19 }));

        let mut res = TestClient::post("http://example.com/shop/child")
            .add_header(SESSION_KEY_HEADER, TEST_SESSION, true)
            .json(&json!({ "birth_date": "2007-01-01" }))
            .send(&make_service(shop))
            .await;

        let body: RejectionBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.redirect, "demographic_intake");
        assert_eq!(body.error.as_deref(), Some(INVALID_AGE_MESSAGE));

        Ok(())
    }
}
