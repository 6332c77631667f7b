//! Shop Models

use crate::domain::{
    catalog::records::{Product, Subcategory},
    drafts::models::OrderDraft,
    flow::FlowStep,
};

/// Result of a step that moves the shopper on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub next: FlowStep,
    pub draft: OrderDraft,
}

/// Everything a product step shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResult {
    pub draft: OrderDraft,
    pub products: Vec<Product>,

    /// Filter options; only gifts have any.
    pub subcategories: Vec<Subcategory>,
}
