//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        catalog::{
            errors::CatalogServiceError,
            records::{Agency, AgencyUuid, Product, ProductFilters, ProductUuid, Subcategory},
            repository::PgCatalogRepository,
        },
        categories::Category,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn active_agencies(&self) -> Result<Vec<Agency>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let agencies = self.repository.list_active_agencies(&mut tx).await?;

        tx.commit().await?;

        Ok(agencies)
    }

    async fn agency(&self, agency: AgencyUuid) -> Result<Agency, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let agency = self.repository.get_agency(&mut tx, agency).await?;

        tx.commit().await?;

        Ok(agency)
    }

    async fn products(
        &self,
        category: Category,
        filters: ProductFilters,
    ) -> Result<Vec<Product>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(category_uuid) = self
            .repository
            .find_active_category(&mut tx, category)
            .await?
        else {
            return Err(CatalogServiceError::CategoryUnavailable(category));
        };

        let products = self
            .repository
            .list_products(&mut tx, category_uuid, filters)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn subcategories(
        &self,
        category: Category,
    ) -> Result<Vec<Subcategory>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let subcategories = self
            .repository
            .list_subcategories(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(subcategories)
    }
}

/// Read-only view of agencies and products available to shoppers.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Active agencies, ordered by name.
    async fn active_agencies(&self) -> Result<Vec<Agency>, CatalogServiceError>;

    /// A single agency, active or not.
    async fn agency(&self, agency: AgencyUuid) -> Result<Agency, CatalogServiceError>;

    /// In-stock products of an active category, cheapest first.
    async fn products(
        &self,
        category: Category,
        filters: ProductFilters,
    ) -> Result<Vec<Product>, CatalogServiceError>;

    /// A single product with its live inventory.
    async fn product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// Active subcategories of a category, in display order.
    async fn subcategories(
        &self,
        category: Category,
    ) -> Result<Vec<Subcategory>, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{NewTestProduct, create_agency, create_category, create_product, create_subcategory},
    };

    use super::*;

    #[tokio::test]
    async fn active_agencies_are_sorted_and_exclude_inactive() -> TestResult {
        let ctx = TestContext::new().await;

        create_agency(&ctx, "Zeta House", "ZET", true).await;
        create_agency(&ctx, "Alpha Center", "ALP", true).await;
        create_agency(&ctx, "Closed Shelter", "CLS", false).await;

        let agencies = ctx.catalog.active_agencies().await?;
        let names: Vec<&str> = agencies.iter().map(|agency| agency.name.as_str()).collect();

        assert_eq!(names, vec!["Alpha Center", "Zeta House"]);

        Ok(())
    }

    #[tokio::test]
    async fn agency_returns_inactive_agencies_too() -> TestResult {
        let ctx = TestContext::new().await;

        let uuid = create_agency(&ctx, "Closed Shelter", "CLS", false).await;

        let agency = ctx.catalog.agency(uuid).await?;

        assert!(!agency.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_agency_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.agency(AgencyUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn products_exclude_out_of_stock_and_sort_by_points() -> TestResult {
        let ctx = TestContext::new().await;

        let gifts = create_category(&ctx, Category::Gift, true).await;

        create_product(&ctx, NewTestProduct::new(gifts, "Kite", 20, 3)).await;
        create_product(&ctx, NewTestProduct::new(gifts, "Yo-yo", 5, 1)).await;
        create_product(&ctx, NewTestProduct::new(gifts, "Drone", 40, 0)).await;

        let products = ctx
            .catalog
            .products(Category::Gift, ProductFilters::default())
            .await?;

        let names: Vec<&str> = products.iter().map(|product| product.name.as_str()).collect();

        assert_eq!(names, vec!["Yo-yo", "Kite"]);
        assert!(products.iter().all(|product| product.category == Category::Gift));

        Ok(())
    }

    #[tokio::test]
    async fn products_apply_subcategory_and_points_filters() -> TestResult {
        let ctx = TestContext::new().await;

        let gifts = create_category(&ctx, Category::Gift, true).await;
        let outdoor = create_subcategory(&ctx, gifts, "Outdoor", 1).await;

        create_product(
            &ctx,
            NewTestProduct::new(gifts, "Kite", 20, 3).with_subcategory(outdoor),
        )
        .await;
        create_product(
            &ctx,
            NewTestProduct::new(gifts, "Ball", 8, 3).with_subcategory(outdoor),
        )
        .await;
        create_product(&ctx, NewTestProduct::new(gifts, "Puzzle", 15, 3)).await;

        let products = ctx
            .catalog
            .products(
                Category::Gift,
                ProductFilters {
                    subcategory: Some(outdoor),
                    min_points: Some(10),
                    max_points: Some(30),
                },
            )
            .await?;

        assert_eq!(products.len(), 1, "expected only the kite");
        assert_eq!(products[0].name, "Kite");

        Ok(())
    }

    #[tokio::test]
    async fn inactive_category_is_unavailable() {
        let ctx = TestContext::new().await;

        create_category(&ctx, Category::Card, false).await;

        let result = ctx
            .catalog
            .products(Category::Card, ProductFilters::default())
            .await;

        assert!(
            matches!(
                result,
                Err(CatalogServiceError::CategoryUnavailable(Category::Card))
            ),
            "expected CategoryUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn subcategories_only_lists_active_rows_in_order() -> TestResult {
        let ctx = TestContext::new().await;

        let gifts = create_category(&ctx, Category::Gift, true).await;

        create_subcategory(&ctx, gifts, "Games", 2).await;
        create_subcategory(&ctx, gifts, "Art", 1).await;

        let subcategories = ctx.catalog.subcategories(Category::Gift).await?;
        let names: Vec<&str> = subcategories.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Art", "Games"]);

        Ok(())
    }
}
