//! State

use std::sync::Arc;

use birthday_box_app::{context::AppContext, domain::shop::ShopService};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) shop: Arc<dyn ShopService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(shop: Arc<dyn ShopService>) -> Self {
        Self { shop }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.shop.clone()))
    }
}
