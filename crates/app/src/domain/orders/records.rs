//! Order Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::catalog::records::{AgencyUuid, ProductUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// A committed birthday box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub agency_uuid: AgencyUuid,
    pub child_birth_date: Option<Date>,
    pub child_age: i32,
    pub points_assigned: u32,
    pub points_used: u32,
    pub total_items: u32,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub items: Vec<OrderItem>,
}

/// A line of an order, frozen at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_points: u32,
    pub quantity: u32,
    pub subtotal: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub agency_uuid: AgencyUuid,
    pub child_birth_date: Option<Date>,
    pub child_age: i32,
    pub points_assigned: u32,
    pub points_used: u32,
    pub total_items: u32,
    pub created_at: Timestamp,
    pub items: Vec<NewOrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_points: u32,
    pub quantity: u32,
    pub subtotal: u32,
}
