//! Order response bodies.

use birthday_box_app::domain::orders::records::{Order, OrderItem};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub unit_points: u32,
    pub quantity: u32,
    pub subtotal: u32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name,
            unit_points: item.unit_points,
            quantity: item.quantity,
            subtotal: item.subtotal,
        }
    }
}

/// A placed order, as shown on the confirmation page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub agency_uuid: Uuid,

    /// ISO 8601 date
    pub child_birth_date: Option<String>,
    pub child_age: i32,
    pub points_assigned: u32,
    pub points_used: u32,
    pub total_items: u32,

    /// `pending`, `completed` or `cancelled`
    pub status: String,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            agency_uuid: order.agency_uuid.into(),
            child_birth_date: order.child_birth_date.map(|date| date.to_string()),
            child_age: order.child_age,
            points_assigned: order.points_assigned,
            points_used: order.points_used,
            total_items: order.total_items,
            status: order.status.as_str().to_string(),
            created_at: order.created_at.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}
