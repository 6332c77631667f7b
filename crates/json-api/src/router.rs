//! App Router

use salvo::Router;

use crate::{agencies, orders, session, shop};

/// Shopper-facing routes. Everything under `/shop` is keyed by session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("agencies").get(agencies::handler))
        .push(Router::with_path("orders/{order}").get(orders::get::handler))
        .push(
            Router::with_path("shop")
                .hoop(session::handler)
                .push(Router::with_path("draft").get(shop::draft::handler))
                .push(Router::with_path("agency").post(shop::agency::handler))
                .push(Router::with_path("child").post(shop::child::handler))
                .push(Router::with_path("steps/{step}").get(shop::steps::handler))
                .push(Router::with_path("products/{category}").get(shop::products::handler))
                .push(
                    Router::with_path("items")
                        .post(shop::add_item::handler)
                        .push(Router::with_path("{product}").delete(shop::remove_item::handler)),
                )
                .push(Router::with_path("checkout").post(shop::checkout::handler)),
        )
}
