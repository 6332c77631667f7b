//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    clock::Clock,
    database::Db,
    domain::{
        drafts::models::OrderDraft,
        orders::{
            checkout::ensure_available,
            errors::{CheckoutError, OrdersServiceError},
            records::{NewOrder, Order, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
            status::{Transition, check_refund, check_transition},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    clock: Arc<dyn Clock>,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, draft),
        fields(item_count = draft.items().len()),
        err
    )]
    async fn checkout(&self, draft: &OrderDraft) -> Result<OrderUuid, CheckoutError> {
        let order = NewOrder::from_draft(draft, OrderUuid::new(), self.clock.now())?;

        let mut tx = self.db.begin_transaction().await?;

        for (product, requested) in order.requested_quantities() {
            let Some(stock) = self.repository.lock_product(&mut tx, product).await? else {
                return Err(CheckoutError::ProductNotFound { product });
            };

            ensure_available(product, requested, stock.inventory)?;

            self.repository
                .decrement_inventory(&mut tx, product, requested)
                .await?;
        }

        self.repository.create_order(&mut tx, &order).await?;

        for (position, item) in order.items.iter().enumerate() {
            self.repository
                .create_order_item(&mut tx, order.uuid, position, item)
                .await?;
        }

        tx.commit().await?;

        info!(
            order_uuid = %order.uuid,
            agency_uuid = %order.agency_uuid,
            points_used = order.points_used,
            "created order"
        );

        Ok(order.uuid)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut record = self.repository.get_order(&mut tx, order).await?;
        let items = self.repository.get_order_items(&mut tx, order).await?;

        tx.commit().await?;

        record.items = items;

        Ok(record)
    }

    #[tracing::instrument(
        name = "orders.service.update_status",
        skip(self),
        fields(order_uuid = %order, status = %status),
        err
    )]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if check_transition(current.status, status)? == Transition::Unchanged {
            return Ok(());
        }

        self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        info!(order_uuid = %order, from = %current.status, to = %status, "updated order status");

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.refund",
        skip(self),
        fields(order_uuid = %order),
        err
    )]
    async fn refund(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        check_refund(current.status)?;

        let items = self.repository.get_order_items(&mut tx, order).await?;

        for item in &items {
            let restocked = self
                .repository
                .restock_product(&mut tx, item.product_uuid, item.quantity)
                .await?;

            if restocked == 0 {
                warn!(
                    product_uuid = %item.product_uuid,
                    quantity = item.quantity,
                    "product missing, skipped restock"
                );
            }
        }

        self.repository
            .update_status(&mut tx, order, OrderStatus::Cancelled)
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order, item_count = items.len(), "refunded order");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn a complete draft into a pending order, taking its items out of
    /// stock. Either everything is written or nothing is.
    async fn checkout(&self, draft: &OrderDraft) -> Result<OrderUuid, CheckoutError>;

    /// Retrieve an order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Move an order to a new status.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;

    /// Cancel an order and return its items to stock.
    async fn refund(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
