//! Shop response and request bodies.

use birthday_box_app::domain::{
    catalog::records::{Agency, Product, Subcategory},
    drafts::models::{CartItem, OrderDraft},
    shop::models::{BrowseResult, StepOutcome},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AgencyResponse {
    pub uuid: Uuid,
    pub name: String,
    pub three_letter_code: String,
}

impl From<Agency> for AgencyResponse {
    fn from(agency: Agency) -> Self {
        Self {
            uuid: agency.uuid.into(),
            name: agency.name,
            three_letter_code: agency.three_letter_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DraftItemResponse {
    pub product_uuid: Uuid,
    pub product_name: String,
    pub category: String,
    pub unit_points: u32,
    pub quantity: u32,
    pub subtotal: u32,
}

impl From<&CartItem> for DraftItemResponse {
    fn from(item: &CartItem) -> Self {
        Self {
            product_uuid: item.product_uuid.into(),
            product_name: item.product_name.clone(),
            category: item.category.name().to_string(),
            unit_points: item.unit_points,
            quantity: item.quantity,
            subtotal: item.subtotal(),
        }
    }
}

/// The shopper's box so far, with its derived totals.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per step predicate the storefront renders"
)]
pub(crate) struct DraftResponse {
    pub agency_uuid: Option<Uuid>,
    pub agency_name: String,
    pub three_letter_code: String,

    /// ISO 8601 date
    pub child_birth_date: Option<String>,
    pub child_age: i32,
    pub points_assigned: u32,
    pub points_used: u32,
    pub points_remaining: i64,
    pub total_items: u32,
    pub has_card: bool,
    pub has_book: bool,
    pub has_treat: bool,
    pub can_select_gifts: bool,
    pub items: Vec<DraftItemResponse>,
}

impl From<&OrderDraft> for DraftResponse {
    fn from(draft: &OrderDraft) -> Self {
        Self {
            agency_uuid: draft.agency_uuid().map(Into::into),
            agency_name: draft.agency_name().to_string(),
            three_letter_code: draft.three_letter_code().to_string(),
            child_birth_date: draft.child_birth_date().map(|date| date.to_string()),
            child_age: draft.child_age(),
            points_assigned: draft.points_assigned(),
            points_used: draft.points_used(),
            points_remaining: draft.points_remaining(),
            total_items: draft.total_items(),
            has_card: draft.has_card(),
            has_book: draft.has_book(),
            has_treat: draft.has_treat(),
            can_select_gifts: draft.can_select_gifts(),
            items: draft.items().iter().map(Into::into).collect(),
        }
    }
}

/// A step was completed; go to `next`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StepResponse {
    pub next: String,
    pub draft: DraftResponse,
}

impl From<StepOutcome> for StepResponse {
    fn from(outcome: StepOutcome) -> Self {
        Self {
            next: outcome.next.as_str().to_string(),
            draft: (&outcome.draft).into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub inventory: u32,
    pub category: String,
    pub subcategory_uuid: Option<Uuid>,
    pub min_age: i32,
    pub max_age: i32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            points: product.points,
            inventory: product.inventory,
            category: product.category.name().to_string(),
            subcategory_uuid: product.subcategory.map(Into::into),
            min_age: product.min_age,
            max_age: product.max_age,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub display_order: i32,
}

impl From<Subcategory> for SubcategoryResponse {
    fn from(subcategory: Subcategory) -> Self {
        Self {
            uuid: subcategory.uuid.into(),
            name: subcategory.name,
            display_order: subcategory.display_order,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrowseResponse {
    pub draft: DraftResponse,
    pub products: Vec<ProductResponse>,

    /// Gift filter options; empty for other categories
    pub subcategories: Vec<SubcategoryResponse>,
}

impl From<BrowseResult> for BrowseResponse {
    fn from(result: BrowseResult) -> Self {
        Self {
            draft: (&result.draft).into(),
            products: result.products.into_iter().map(Into::into).collect(),
            subcategories: result.subcategories.into_iter().map(Into::into).collect(),
        }
    }
}
