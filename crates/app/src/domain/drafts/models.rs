//! Draft Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::records::{Agency, AgencyUuid, Product, ProductUuid},
    categories::Category,
    drafts::errors::DraftError,
    points,
};

/// A product as it looked when it was put in the cart.
///
/// Later catalog edits to the product's name or points do not reach items
/// already in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub category: Category,
    pub unit_points: u32,
    pub quantity: u32,
}

impl CartItem {
    fn snapshot(product: &Product) -> Self {
        Self {
            product_uuid: product.uuid,
            product_name: product.name.clone(),
            category: product.category,
            unit_points: product.points,
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> u32 {
        self.unit_points.saturating_mul(self.quantity)
    }
}

/// In-progress box for one shopping session.
///
/// Only the raw selections are stored; points and step predicates are
/// recomputed from them on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    agency_uuid: Option<AgencyUuid>,
    agency_name: String,
    three_letter_code: String,
    child_birth_date: Option<Date>,
    child_age: i32,
    items: Vec<CartItem>,
}

impl OrderDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agency_uuid(&self) -> Option<AgencyUuid> {
        self.agency_uuid
    }

    pub fn agency_name(&self) -> &str {
        &self.agency_name
    }

    pub fn three_letter_code(&self) -> &str {
        &self.three_letter_code
    }

    pub fn child_birth_date(&self) -> Option<Date> {
        self.child_birth_date
    }

    pub fn child_age(&self) -> i32 {
        self.child_age
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn has_agency(&self) -> bool {
        self.agency_uuid.is_some()
    }

    /// Whether demographic intake has been completed.
    pub fn has_child_details(&self) -> bool {
        self.child_birth_date.is_some() || self.child_age != 0
    }

    pub fn points_assigned(&self) -> u32 {
        points::assign_points(self.child_age)
    }

    pub fn points_used(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.subtotal()))
    }

    /// Negative only if the budget shrank after items were chosen.
    pub fn points_remaining(&self) -> i64 {
        i64::from(self.points_assigned()) - i64::from(self.points_used())
    }

    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.quantity))
    }

    pub fn has(&self, category: Category) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    pub fn has_card(&self) -> bool {
        self.has(Category::Card)
    }

    pub fn has_book(&self) -> bool {
        self.has(Category::Book)
    }

    pub fn has_treat(&self) -> bool {
        self.has(Category::Treat)
    }

    pub fn can_select_gifts(&self) -> bool {
        self.has_card() && self.has_book() && self.has_treat()
    }

    /// Record the shopping agency. The stored code is the agency's own, not
    /// whatever casing the shopper typed.
    pub fn set_agency(&mut self, agency: &Agency) {
        self.agency_uuid = Some(agency.uuid);
        self.agency_name.clone_from(&agency.name);
        self.three_letter_code.clone_from(&agency.three_letter_code);
    }

    /// Record the child's birth date and the age it implies on `today`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::InvalidAge`] when the age falls outside 0..=18.
    pub fn set_birth_date(&mut self, birth_date: Date, today: Date) -> Result<i32, DraftError> {
        let age = points::age_on(birth_date, today);

        if !points::is_eligible_age(age) {
            return Err(DraftError::InvalidAge { age });
        }

        self.child_birth_date = Some(birth_date);
        self.child_age = age;

        Ok(age)
    }

    /// Put one unit of `product` in the cart.
    ///
    /// A card, book or treat replaces any existing item of the same category,
    /// and the budget check is made net of the replaced item.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::OutOfStock`] when the product has no inventory
    /// and [`DraftError::InsufficientPoints`] when it does not fit the budget.
    pub fn add_item(&mut self, product: &Product) -> Result<(), DraftError> {
        if !product.in_stock() {
            return Err(DraftError::OutOfStock {
                product: product.uuid,
                category: product.category,
            });
        }

        let category = product.category;

        let released = if category.is_mandatory() {
            self.items
                .iter()
                .filter(|item| item.category == category)
                .fold(0_u32, |total, item| total.saturating_add(item.subtotal()))
        } else {
            0
        };

        let used = self.points_used().saturating_sub(released);
        let assigned = self.points_assigned();

        if used.saturating_add(product.points) > assigned {
            return Err(DraftError::InsufficientPoints {
                product: product.uuid,
                category,
                required: product.points,
                available: i64::from(assigned) - i64::from(used),
            });
        }

        if category.is_mandatory() {
            self.items.retain(|item| item.category != category);
        }

        self.items.push(CartItem::snapshot(product));

        Ok(())
    }

    /// Drop the first item for `product`. Returns whether anything was removed.
    pub fn remove_item(&mut self, product: ProductUuid) -> bool {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.product_uuid == product)
        else {
            return false;
        };

        self.items.remove(index);

        true
    }
}
