//! Test Helpers

use jiff::civil::date;
use sqlx::query;
use uuid::Uuid;

use crate::domain::{
    catalog::{
        CatalogService,
        records::{Agency, AgencyUuid, Product, ProductUuid, SubcategoryUuid},
    },
    categories::Category,
    drafts::models::OrderDraft,
};

use super::TestContext;

pub(crate) async fn create_agency(
    ctx: &TestContext,
    name: &str,
    code: &str,
    is_active: bool,
) -> AgencyUuid {
    let uuid = AgencyUuid::new();

    query("INSERT INTO agencies (uuid, name, three_letter_code, is_active) VALUES ($1, $2, $3, $4)")
        .bind(uuid.into_uuid())
        .bind(name)
        .bind(code)
        .bind(is_active)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to create agency");

    uuid
}

/// Insert the catalog row for `category`, returning its row uuid.
pub(crate) async fn create_category(ctx: &TestContext, category: Category, is_active: bool) -> Uuid {
    let uuid = Uuid::now_v7();

    query("INSERT INTO categories (uuid, name, is_active) VALUES ($1, $2, $3)")
        .bind(uuid)
        .bind(category.name())
        .bind(is_active)
        .execute(ctx.db.pool())
        .await
        .expect("Failed to create category");

    uuid
}

pub(crate) async fn create_subcategory(
    ctx: &TestContext,
    category: Uuid,
    name: &str,
    display_order: i32,
) -> SubcategoryUuid {
    let uuid = SubcategoryUuid::new();

    query(
        "INSERT INTO subcategories (uuid, category_uuid, name, display_order) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(uuid.into_uuid())
    .bind(category)
    .bind(name)
    .bind(display_order)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to create subcategory");

    uuid
}

#[derive(Debug, Clone)]
pub(crate) struct NewTestProduct {
    category: Uuid,
    subcategory: Option<SubcategoryUuid>,
    name: String,
    points: i32,
    inventory: i32,
}

impl NewTestProduct {
    pub(crate) fn new(category: Uuid, name: &str, points: i32, inventory: i32) -> Self {
        Self {
            category,
            subcategory: None,
            name: name.to_string(),
            points,
            inventory,
        }
    }

    pub(crate) fn with_subcategory(mut self, subcategory: SubcategoryUuid) -> Self {
        self.subcategory = Some(subcategory);
        self
    }
}

pub(crate) async fn create_product(ctx: &TestContext, product: NewTestProduct) -> Product {
    let uuid = ProductUuid::new();

    query(
        "INSERT INTO products (uuid, category_uuid, subcategory_uuid, name, points, inventory) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(uuid.into_uuid())
    .bind(product.category)
    .bind(product.subcategory.map(SubcategoryUuid::into_uuid))
    .bind(&product.name)
    .bind(product.points)
    .bind(product.inventory)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to create product");

    ctx.catalog
        .product(uuid)
        .await
        .expect("Failed to read back product")
}

pub(crate) async fn delete_product(ctx: &TestContext, product: ProductUuid) {
    query("DELETE FROM products WHERE uuid = $1")
        .bind(product.into_uuid())
        .execute(ctx.db.pool())
        .await
        .expect("Failed to delete product");
}

/// An agency and one card, book and treat, with an empty gifts category.
#[derive(Debug, Clone)]
pub(crate) struct Shelf {
    pub agency: Agency,
    pub card: Product,
    pub book: Product,
    pub treat: Product,
    pub gifts: Uuid,
}

/// Stock every category, giving the mandatory products `inventory` units each.
pub(crate) async fn stock_shelf(ctx: &TestContext, inventory: i32) -> Shelf {
    let cards = create_category(ctx, Category::Card, true).await;
    let books = create_category(ctx, Category::Book, true).await;
    let treats = create_category(ctx, Category::Treat, true).await;
    let gifts = create_category(ctx, Category::Gift, true).await;

    let agency = create_agency(ctx, "Helping Hands", "HHS", true).await;
    let agency = ctx
        .catalog
        .agency(agency)
        .await
        .expect("Failed to read back agency");

    Shelf {
        agency,
        card: create_product(ctx, NewTestProduct::new(cards, "Birthday Card", 5, inventory)).await,
        book: create_product(ctx, NewTestProduct::new(books, "Picture Book", 10, inventory)).await,
        treat: create_product(ctx, NewTestProduct::new(treats, "Cupcake", 3, inventory)).await,
        gifts,
    }
}

/// A draft for a ten year old holding the shelf's card, book and treat.
pub(crate) fn box_draft(shelf: &Shelf) -> OrderDraft {
    let mut draft = OrderDraft::new();

    draft.set_agency(&shelf.agency);
    draft
        .set_birth_date(date(2016, 1, 1), date(2026, 10, 19))
        .expect("age 10 is eligible");

    for product in [&shelf.card, &shelf.book, &shelf.treat] {
        draft
            .add_item(product)
            .expect("mandatory items fit the budget");
    }

    draft
}
