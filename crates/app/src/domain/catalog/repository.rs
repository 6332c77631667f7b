//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{to_i32, try_get_parsed, try_get_u32},
    domain::{
        catalog::records::{
            Agency, AgencyUuid, Product, ProductFilters, ProductUuid, Subcategory, SubcategoryUuid,
        },
        categories::Category,
    },
};

const LIST_ACTIVE_AGENCIES_SQL: &str = include_str!("sql/list_active_agencies.sql");
const GET_AGENCY_SQL: &str = include_str!("sql/get_agency.sql");
const GET_ACTIVE_CATEGORY_SQL: &str = include_str!("sql/get_active_category.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_SUBCATEGORIES_SQL: &str = include_str!("sql/list_subcategories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_active_agencies(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Agency>, sqlx::Error> {
        query_as::<Postgres, Agency>(LIST_ACTIVE_AGENCIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_agency(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        agency: AgencyUuid,
    ) -> Result<Agency, sqlx::Error> {
        query_as::<Postgres, Agency>(GET_AGENCY_SQL)
            .bind(agency.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve a role to its active category row, if there is one.
    pub(crate) async fn find_active_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Category,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(GET_ACTIVE_CATEGORY_SQL)
            .bind(category.name())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Uuid,
        filters: ProductFilters,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let min_points = filters
            .min_points
            .map(|points| to_i32(points, "min_points"))
            .transpose()?;

        let max_points = filters
            .max_points
            .map(|points| to_i32(points, "max_points"))
            .transpose()?;

        query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(category)
            .bind(filters.subcategory.map(SubcategoryUuid::into_uuid))
            .bind(min_points)
            .bind(max_points)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_subcategories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Category,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        query_as::<Postgres, Subcategory>(LIST_SUBCATEGORIES_SQL)
            .bind(category.name())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Agency {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AgencyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            three_letter_code: row.try_get("three_letter_code")?,
            is_active: row.try_get("is_active")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Subcategory {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SubcategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            category: try_get_parsed(row, "category_name")?,
            display_order: row.try_get("display_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            points: try_get_u32(row, "points")?,
            inventory: try_get_u32(row, "inventory")?,
            category: try_get_parsed(row, "category_name")?,
            subcategory: row
                .try_get::<Option<Uuid>, _>("subcategory_uuid")?
                .map(SubcategoryUuid::from_uuid),
            min_age: row.try_get("min_age")?,
            max_age: row.try_get("max_age")?,
        })
    }
}
