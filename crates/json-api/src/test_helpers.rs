//! Test helpers.

use std::sync::Arc;

use birthday_box_app::domain::{
    catalog::records::{Agency, AgencyUuid, Product, ProductUuid},
    categories::Category,
    drafts::{DraftError, models::OrderDraft},
    shop::MockShopService,
};
use jiff::civil::date;
use salvo::{affix_state::inject, prelude::*};

use crate::{session, state::State};

pub(crate) const TEST_SESSION: &str = "test-session";

pub(crate) fn shop_service(shop: MockShopService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(Arc::new(State::new(Arc::new(shop)))))
            .hoop(session::handler)
            .push(route),
    )
}

pub(crate) fn make_agency() -> Agency {
    Agency {
        uuid: AgencyUuid::new(),
        name: "Helping Hands".to_string(),
        three_letter_code: "HHS".to_string(),
        is_active: true,
    }
}

pub(crate) fn make_product(category: Category, name: &str, points: u32) -> Product {
    Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: String::new(),
        points,
        inventory: 3,
        category,
        subcategory: None,
        min_age: 0,
        max_age: 18,
    }
}

/// Agency chosen and a ten year old's budget of 65 points.
pub(crate) fn make_draft() -> Result<OrderDraft, DraftError> {
    let mut draft = OrderDraft::new();

    draft.set_agency(&make_agency());
    draft.set_birth_date(date(2016, 1, 1), date(2026, 10, 19))?;

    Ok(draft)
}
