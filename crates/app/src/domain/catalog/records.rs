//! Catalog Records

use crate::{domain::categories::Category, uuids::TypedUuid};

/// Agency UUID
pub type AgencyUuid = TypedUuid<Agency>;

/// Subcategory UUID
pub type SubcategoryUuid = TypedUuid<Subcategory>;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Agency Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agency {
    pub uuid: AgencyUuid,
    pub name: String,
    pub three_letter_code: String,
    pub is_active: bool,
}

impl Agency {
    /// Codes are compared without regard to case.
    pub fn code_matches(&self, code: &str) -> bool {
        self.three_letter_code.eq_ignore_ascii_case(code)
    }
}

/// Subcategory Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    pub uuid: SubcategoryUuid,
    pub name: String,
    pub category: Category,
    pub display_order: i32,
}

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub inventory: u32,
    pub category: Category,
    pub subcategory: Option<SubcategoryUuid>,
    pub min_age: i32,
    pub max_age: i32,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// Narrowing applied when listing a category's products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub subcategory: Option<SubcategoryUuid>,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
}
