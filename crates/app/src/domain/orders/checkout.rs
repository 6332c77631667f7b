//! Checkout preparation.
//!
//! Everything here runs before a transaction is opened or on rows already
//! locked by one; the transactional body lives in the service.

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::domain::{
    catalog::records::{AgencyUuid, ProductUuid},
    drafts::models::OrderDraft,
    orders::{
        errors::CheckoutError,
        records::{NewOrder, NewOrderItem, OrderItemUuid, OrderUuid},
    },
};

/// Check that `draft` is complete enough to check out.
///
/// # Errors
///
/// Returns [`CheckoutError::IncompleteSelection`] when the draft has no
/// agency, no items, or is missing a card, book or treat.
pub fn validate(draft: &OrderDraft) -> Result<AgencyUuid, CheckoutError> {
    match draft.agency_uuid() {
        Some(agency) if !draft.items().is_empty() && draft.can_select_gifts() => Ok(agency),
        _ => Err(CheckoutError::IncompleteSelection),
    }
}

impl NewOrder {
    /// Snapshot `draft` as an order. Points are recomputed from the draft's
    /// items here rather than carried over from an earlier step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::IncompleteSelection`] if the draft is not
    /// ready for checkout.
    pub fn from_draft(
        draft: &OrderDraft,
        uuid: OrderUuid,
        created_at: Timestamp,
    ) -> Result<Self, CheckoutError> {
        let agency_uuid = validate(draft)?;

        let items = draft
            .items()
            .iter()
            .map(|item| NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: item.product_uuid,
                product_name: item.product_name.clone(),
                unit_points: item.unit_points,
                quantity: item.quantity,
                subtotal: item.subtotal(),
            })
            .collect();

        Ok(Self {
            uuid,
            agency_uuid,
            child_birth_date: draft.child_birth_date(),
            child_age: draft.child_age(),
            points_assigned: draft.points_assigned(),
            points_used: draft.points_used(),
            total_items: draft.total_items(),
            created_at,
            items,
        })
    }

    /// Units needed per product, in lock order.
    ///
    /// A gift added twice appears as two lines but is stock-checked as one
    /// request. Iterating the map in key order gives every checkout the same
    /// locking sequence.
    pub fn requested_quantities(&self) -> BTreeMap<ProductUuid, u32> {
        let mut requested = BTreeMap::new();

        for item in &self.items {
            let quantity = requested.entry(item.product_uuid).or_insert(0_u32);

            *quantity = quantity.saturating_add(item.quantity);
        }

        requested
    }
}

/// Compare a locked product's stock to the units requested.
///
/// # Errors
///
/// Returns [`CheckoutError::InsufficientInventory`] when there are not
/// enough units left.
pub fn ensure_available(
    product: ProductUuid,
    requested: u32,
    available: u32,
) -> Result<(), CheckoutError> {
    if available < requested {
        return Err(CheckoutError::InsufficientInventory {
            product,
            requested,
            available,
        });
    }

    Ok(())
}
