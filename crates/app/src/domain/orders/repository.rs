//! Orders Repository

use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_i32, try_get_parsed, try_get_u32},
    domain::{
        catalog::records::{AgencyUuid, ProductUuid},
        orders::records::{
            NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
        },
    },
};

const LOCK_PRODUCT_SQL: &str = include_str!("sql/lock_product.sql");
const DECREMENT_INVENTORY_SQL: &str = include_str!("sql/decrement_inventory.sql");
const RESTOCK_PRODUCT_SQL: &str = include_str!("sql/restock_product.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("sql/get_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// Live stock of a product row locked for the rest of the transaction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LockedStock {
    pub(crate) inventory: u32,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock a product row, returning `None` if it no longer exists.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<LockedStock>, sqlx::Error> {
        let row = query(LOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(LockedStock {
                inventory: try_get_u32(&row, "inventory")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn decrement_inventory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        query(DECREMENT_INVENTORY_SQL)
            .bind(product.into_uuid())
            .bind(to_i32(quantity, "inventory")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Put units back on the shelf. Returns the number of rows touched, which
    /// is zero when the product has since been deleted.
    pub(crate) async fn restock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTOCK_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(to_i32(quantity, "inventory")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.agency_uuid.into_uuid())
            .bind(order.child_birth_date.map(SqlxDate::from))
            .bind(order.child_age)
            .bind(to_i32(order.points_assigned, "points_assigned")?)
            .bind(to_i32(order.points_used, "points_used")?)
            .bind(to_i32(order.total_items, "total_items")?)
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        position: usize,
        item: &NewOrderItem,
    ) -> Result<(), sqlx::Error> {
        let position = i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(position)
            .bind(item.product_uuid.into_uuid())
            .bind(&item.product_name)
            .bind(to_i32(item.unit_points, "unit_points")?)
            .bind(to_i32(item.quantity, "quantity")?)
            .bind(to_i32(item.subtotal, "subtotal")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            agency_uuid: AgencyUuid::from_uuid(row.try_get("agency_uuid")?),
            child_birth_date: row
                .try_get::<Option<SqlxDate>, _>("child_birth_date")?
                .map(SqlxDate::to_jiff),
            child_age: row.try_get("child_age")?,
            points_assigned: try_get_u32(row, "points_assigned")?,
            points_used: try_get_u32(row, "points_used")?,
            total_items: try_get_u32(row, "total_items")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            items: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_points: try_get_u32(row, "unit_points")?,
            quantity: try_get_u32(row, "quantity")?,
            subtotal: try_get_u32(row, "subtotal")?,
        })
    }
}
