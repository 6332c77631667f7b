//! Shop service.
//!
//! One method per flow step: load the session's draft, check the step is
//! open, apply the change, and store the draft again. A draft is only written
//! after every check has passed, so a rejected request leaves it as it was.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    clock::Clock,
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            records::{Agency, AgencyUuid, ProductFilters, ProductUuid},
        },
        categories::Category,
        drafts::{DraftStore, SessionKey, models::OrderDraft},
        flow::{FlowStep, guard},
        orders::{
            OrdersService,
            records::{Order, OrderUuid},
        },
        shop::{
            errors::{AgencyRejection, ShopError},
            models::{BrowseResult, StepOutcome},
        },
    },
};

#[derive(Clone)]
pub struct SessionShopService {
    catalog: Arc<dyn CatalogService>,
    drafts: Arc<dyn DraftStore>,
    orders: Arc<dyn OrdersService>,
    clock: Arc<dyn Clock>,
}

impl SessionShopService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        drafts: Arc<dyn DraftStore>,
        orders: Arc<dyn OrdersService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            drafts,
            orders,
            clock,
        }
    }

    async fn load(&self, session: &SessionKey) -> Result<OrderDraft, ShopError> {
        Ok(self.drafts.load(session).await?.unwrap_or_default())
    }

    /// Load the draft and check that `step` may be entered with it.
    async fn enter(&self, session: &SessionKey, step: FlowStep) -> Result<OrderDraft, ShopError> {
        let draft = self.load(session).await?;

        guard(step, &draft)?;

        Ok(draft)
    }
}

#[async_trait]
impl ShopService for SessionShopService {
    async fn agencies(&self) -> Result<Vec<Agency>, ShopError> {
        Ok(self.catalog.active_agencies().await?)
    }

    async fn draft(&self, session: &SessionKey) -> Result<OrderDraft, ShopError> {
        self.load(session).await
    }

    async fn select_agency(
        &self,
        session: &SessionKey,
        agency: AgencyUuid,
        code: &str,
    ) -> Result<StepOutcome, ShopError> {
        let agency = match self.catalog.agency(agency).await {
            Ok(agency) if agency.is_active => agency,
            Ok(_) | Err(CatalogServiceError::NotFound) => {
                return Err(ShopError::InvalidAgencySelection(
                    AgencyRejection::Unavailable,
                ));
            }
            Err(error) => return Err(error.into()),
        };

        if !agency.code_matches(code) {
            return Err(ShopError::InvalidAgencySelection(
                AgencyRejection::CodeMismatch,
            ));
        }

        let mut draft = self.load(session).await?;

        draft.set_agency(&agency);

        self.drafts.save(session, &draft).await?;

        Ok(StepOutcome {
            next: FlowStep::DemographicIntake,
            draft,
        })
    }

    async fn enter_birth_date(
        &self,
        session: &SessionKey,
        birth_date: Date,
    ) -> Result<StepOutcome, ShopError> {
        let mut draft = self.enter(session, FlowStep::DemographicIntake).await?;

        draft.set_birth_date(birth_date, self.clock.today())?;

        self.drafts.save(session, &draft).await?;

        Ok(StepOutcome {
            next: FlowStep::GetReadyToShop,
            draft,
        })
    }

    async fn visit(&self, session: &SessionKey, step: FlowStep) -> Result<OrderDraft, ShopError> {
        self.enter(session, step).await
    }

    async fn browse(
        &self,
        session: &SessionKey,
        category: Category,
        filters: ProductFilters,
    ) -> Result<BrowseResult, ShopError> {
        let draft = self
            .enter(session, FlowStep::for_category(category))
            .await?;

        let (filters, subcategories) = match category {
            Category::Gift => (filters, self.catalog.subcategories(category).await?),
            _ => (ProductFilters::default(), Vec::new()),
        };

        let products = self.catalog.products(category, filters).await?;

        Ok(BrowseResult {
            draft,
            products,
            subcategories,
        })
    }

    async fn add_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
    ) -> Result<StepOutcome, ShopError> {
        let product = match self.catalog.product(product).await {
            Ok(found) => found,
            Err(CatalogServiceError::NotFound) => {
                return Err(ShopError::ProductNotFound { product });
            }
            Err(error) => return Err(error.into()),
        };

        let mut draft = self.load(session).await?;

        draft.add_item(&product)?;

        self.drafts.save(session, &draft).await?;

        Ok(StepOutcome {
            next: FlowStep::after_adding(product.category),
            draft,
        })
    }

    async fn remove_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
    ) -> Result<OrderDraft, ShopError> {
        let Some(mut draft) = self.drafts.load(session).await? else {
            return Err(ShopError::NoDraft);
        };

        if draft.remove_item(product) {
            self.drafts.save(session, &draft).await?;
        }

        Ok(draft)
    }

    async fn checkout(&self, session: &SessionKey) -> Result<OrderUuid, ShopError> {
        let draft = self.enter(session, FlowStep::Checkout).await?;

        let order = match self.orders.checkout(&draft).await {
            Ok(order) => order,
            Err(error) => {
                warn!(error = ?error, "checkout failed, draft kept");

                return Err(error.into());
            }
        };

        // The order is committed; a stale draft must not turn it into an error.
        if let Err(error) = self.drafts.clear(session).await {
            warn!(order_uuid = %order, error = ?error, "failed to clear draft after checkout");
        }

        info!(order_uuid = %order, "checkout complete");

        Ok(order)
    }

    async fn order(&self, order: OrderUuid) -> Result<Order, ShopError> {
        Ok(self.orders.get_order(order).await?)
    }
}

#[automock]
#[async_trait]
pub trait ShopService: Send + Sync {
    /// Agencies a shopper can pick from, by name.
    async fn agencies(&self) -> Result<Vec<Agency>, ShopError>;

    /// The session's draft, or an empty one if it has none yet.
    async fn draft(&self, session: &SessionKey) -> Result<OrderDraft, ShopError>;

    /// Choose the shopping agency. The code is matched case-insensitively.
    async fn select_agency(
        &self,
        session: &SessionKey,
        agency: AgencyUuid,
        code: &str,
    ) -> Result<StepOutcome, ShopError>;

    /// Record the child's date of birth, fixing their age and budget.
    async fn enter_birth_date(
        &self,
        session: &SessionKey,
        birth_date: Date,
    ) -> Result<StepOutcome, ShopError>;

    /// Check a step may be shown.
    async fn visit(&self, session: &SessionKey, step: FlowStep) -> Result<OrderDraft, ShopError>;

    /// Products on offer for a category step.
    async fn browse(
        &self,
        session: &SessionKey,
        category: Category,
        filters: ProductFilters,
    ) -> Result<BrowseResult, ShopError>;

    /// Put a product in the box and say which step comes next.
    async fn add_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
    ) -> Result<StepOutcome, ShopError>;

    /// Take a product out of the box.
    async fn remove_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
    ) -> Result<OrderDraft, ShopError>;

    /// Place the order. The draft is cleared only once the order is stored.
    async fn checkout(&self, session: &SessionKey) -> Result<OrderUuid, ShopError>;

    /// A placed order, for the confirmation page.
    async fn order(&self, order: OrderUuid) -> Result<Order, ShopError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        clock::FixedClock,
        domain::{
            catalog::MockCatalogService,
            drafts::{
                DraftStoreError, MemoryDraftStore, MockDraftStore,
                models::tests::{agency, draft_aged, product, ready_for_gifts},
            },
            orders::{CheckoutError, MockOrdersService},
        },
    };

    use super::*;

    struct Harness {
        catalog: MockCatalogService,
        orders: MockOrdersService,
        drafts: Arc<MemoryDraftStore>,
        session: SessionKey,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                catalog: MockCatalogService::new(),
                orders: MockOrdersService::new(),
                drafts: Arc::new(MemoryDraftStore::new()),
                session: SessionKey::generate(),
            }
        }

        async fn with_draft(self, draft: &OrderDraft) -> Self {
            self.drafts
                .save(&self.session, draft)
                .await
                .expect("memory store should accept drafts");

            self
        }

        fn build(self) -> (SessionShopService, Arc<MemoryDraftStore>, SessionKey) {
            let service = SessionShopService::new(
                Arc::new(self.catalog),
                self.drafts.clone(),
                Arc::new(self.orders),
                Arc::new(FixedClock::on(date(2026, 10, 19))),
            );

            (service, self.drafts, self.session)
        }
    }

    fn expect_agency(catalog: &mut MockCatalogService, agency: Agency) {
        let uuid = agency.uuid;

        catalog
            .expect_agency()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(agency));
    }

    #[tokio::test]
    async fn agency_code_matches_case_insensitively() -> TestResult {
        let mut harness = Harness::new();
        let mut abc = agency();

        abc.three_letter_code = "ABC".to_string();
        expect_agency(&mut harness.catalog, abc.clone());

        let (service, drafts, session) = harness.build();

        let outcome = service.select_agency(&session, abc.uuid, "abc").await?;

        assert_eq!(outcome.next, FlowStep::DemographicIntake);
        assert_eq!(outcome.draft.agency_uuid(), Some(abc.uuid));
        assert_eq!(outcome.draft.three_letter_code(), "ABC");
        assert_eq!(drafts.load(&session).await?, Some(outcome.draft));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_agency_code_is_rejected() -> TestResult {
        let mut harness = Harness::new();
        let mut abc = agency();

        abc.three_letter_code = "ABC".to_string();
        expect_agency(&mut harness.catalog, abc.clone());

        let (service, drafts, session) = harness.build();

        let result = service.select_agency(&session, abc.uuid, "XYZ").await;

        let error = result.expect_err("request should be rejected");

        assert!(matches!(
            error,
            ShopError::InvalidAgencySelection(AgencyRejection::CodeMismatch)
        ));
        assert_eq!(
            error.user_message().as_deref(),
            Some("Invalid agency code. Please check your 3-letter code.")
        );
        assert_eq!(error.redirect(), Some(FlowStep::SelectAgency));
        assert_eq!(drafts.load(&session).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn inactive_agency_is_rejected_regardless_of_code() {
        let mut harness = Harness::new();
        let mut closed = agency();

        closed.three_letter_code = "ABC".to_string();
        closed.is_active = false;
        expect_agency(&mut harness.catalog, closed.clone());

        let (service, _, session) = harness.build();

        let result = service.select_agency(&session, closed.uuid, "ABC").await;

        assert!(
            matches!(
                result,
                Err(ShopError::InvalidAgencySelection(AgencyRejection::Unavailable))
            ),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_agency_is_rejected() {
        let mut harness = Harness::new();

        harness
            .catalog
            .expect_agency()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let (service, _, session) = harness.build();

        let result = service.select_agency(&session, AgencyUuid::new(), "ABC").await;

        assert!(
            matches!(
                result,
                Err(ShopError::InvalidAgencySelection(AgencyRejection::Unavailable))
            ),
            "expected Unavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn birth_date_sets_age_and_budget() -> TestResult {
        let mut draft = OrderDraft::new();

        draft.set_agency(&agency());

        let harness = Harness::new().with_draft(&draft).await;
        let (service, _, session) = harness.build();

        let outcome = service
            .enter_birth_date(&session, date(2012, 10, 19))
            .await?;

        assert_eq!(outcome.next, FlowStep::GetReadyToShop);
        assert_eq!(outcome.draft.child_age(), 14);
        assert_eq!(outcome.draft.points_assigned(), 100);

        Ok(())
    }

    #[tokio::test]
    async fn ineligible_birth_date_keeps_the_draft() -> TestResult {
        let mut draft = OrderDraft::new();

        draft.set_agency(&agency());

        let harness = Harness::new().with_draft(&draft).await;
        let (service, drafts, session) = harness.build();

        let result = service.enter_birth_date(&session, date(2001, 5, 5)).await;

        let error = result.expect_err("request should be rejected");

        assert!(matches!(error, ShopError::InvalidAge { age: 25 }));
        assert_eq!(error.redirect(), Some(FlowStep::DemographicIntake));
        assert_eq!(
            error.user_message().as_deref(),
            Some("Child age must be between 0 and 18 years.")
        );
        assert_eq!(drafts.load(&session).await?, Some(draft));

        Ok(())
    }

    #[tokio::test]
    async fn birth_date_without_agency_redirects() {
        let (service, _, session) = Harness::new().build();

        let result = service.enter_birth_date(&session, date(2016, 1, 1)).await;

        assert!(
            matches!(
                result,
                Err(ShopError::StepUnavailable(refused)) if refused.redirect == FlowStep::SelectAgency
            ),
            "expected a redirect to agency selection, got {result:?}"
        );
    }

    #[tokio::test]
    async fn adding_a_card_advances_to_books() -> TestResult {
        let mut harness = Harness::new().with_draft(&draft_aged(10)).await;
        let card = product(Category::Card, "Balloon Card", 5, 3);
        let uuid = card.uuid;

        harness
            .catalog
            .expect_product()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(card));

        let (service, drafts, session) = harness.build();

        let outcome = service.add_item(&session, uuid).await?;

        assert_eq!(outcome.next, FlowStep::SelectBook);
        assert!(outcome.draft.has_card());
        assert_eq!(drafts.load(&session).await?, Some(outcome.draft));

        Ok(())
    }

    #[tokio::test]
    async fn gift_over_budget_is_rejected_and_not_saved() -> TestResult {
        let draft = ready_for_gifts();
        let mut harness = Harness::new().with_draft(&draft).await;
        let bicycle = product(Category::Gift, "Bicycle", 50, 2);
        let uuid = bicycle.uuid;

        harness
            .catalog
            .expect_product()
            .once()
            .return_once(move |_| Ok(bicycle));

        let (service, drafts, session) = harness.build();

        let result = service.add_item(&session, uuid).await;

        let error = result.expect_err("request should be rejected");

        assert!(matches!(error, ShopError::InsufficientPoints { .. }));
        assert_eq!(error.redirect(), Some(FlowStep::SelectGifts));
        assert_eq!(
            error.user_message().as_deref(),
            Some("Not enough points to add this item.")
        );
        assert_eq!(drafts.load(&session).await?, Some(draft));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_stock_product_is_rejected() {
        let mut harness = Harness::new().with_draft(&draft_aged(10)).await;
        let treat = product(Category::Treat, "Cupcake", 3, 0);
        let uuid = treat.uuid;

        harness
            .catalog
            .expect_product()
            .once()
            .return_once(move |_| Ok(treat));

        let (service, _, session) = harness.build();

        let result = service.add_item(&session, uuid).await;

        assert!(
            matches!(
                result,
                Err(ShopError::OutOfStock {
                    category: Category::Treat,
                    ..
                })
            ),
            "expected OutOfStock, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let mut harness = Harness::new();

        harness
            .catalog
            .expect_product()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let (service, _, session) = harness.build();

        let result = service.add_item(&session, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ShopError::ProductNotFound { .. })),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn browse_gifts_passes_filters_and_lists_subcategories() -> TestResult {
        let mut harness = Harness::new().with_draft(&ready_for_gifts()).await;
        let kite = product(Category::Gift, "Kite", 12, 3);
        let filters = ProductFilters {
            subcategory: None,
            min_points: Some(10),
            max_points: Some(20),
        };

        harness
            .catalog
            .expect_subcategories()
            .once()
            .withf(|category| *category == Category::Gift)
            .return_once(|_| Ok(Vec::new()));

        let listed = kite.clone();

        harness
            .catalog
            .expect_products()
            .once()
            .withf(move |category, requested| *category == Category::Gift && *requested == filters)
            .return_once(move |_, _| Ok(vec![listed]));

        let (service, _, session) = harness.build();

        let result = service.browse(&session, Category::Gift, filters).await?;

        assert_eq!(result.products, vec![kite]);

        Ok(())
    }

    #[tokio::test]
    async fn browse_cards_ignores_gift_filters() -> TestResult {
        let mut harness = Harness::new().with_draft(&draft_aged(10)).await;

        harness.catalog.expect_subcategories().never();
        harness
            .catalog
            .expect_products()
            .once()
            .withf(|category, filters| {
                *category == Category::Card && *filters == ProductFilters::default()
            })
            .return_once(|_, _| Ok(Vec::new()));

        let (service, _, session) = harness.build();

        let filters = ProductFilters {
            min_points: Some(5),
            ..ProductFilters::default()
        };

        let result = service.browse(&session, Category::Card, filters).await?;

        assert!(result.products.is_empty());
        assert!(result.subcategories.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn browse_before_prerequisites_never_reaches_the_catalog() {
        let mut harness = Harness::new().with_draft(&draft_aged(10)).await;

        harness.catalog.expect_products().never();

        let (service, _, session) = harness.build();

        let result = service
            .browse(&session, Category::Book, ProductFilters::default())
            .await;

        assert!(
            matches!(
                result,
                Err(ShopError::StepUnavailable(refused)) if refused.redirect == FlowStep::SelectCard
            ),
            "expected a redirect to cards, got {result:?}"
        );
    }

    #[tokio::test]
    async fn missing_category_redirects_to_the_previous_step() {
        let mut harness = Harness::new().with_draft(&ready_for_gifts()).await;

        harness
            .catalog
            .expect_products()
            .once()
            .return_once(|category, _| Err(CatalogServiceError::CategoryUnavailable(category)));

        let (service, _, session) = harness.build();

        let result = service
            .browse(&session, Category::Treat, ProductFilters::default())
            .await;

        let error = result.expect_err("request should be rejected");

        assert_eq!(error.redirect(), Some(FlowStep::SelectBook));
        assert_eq!(
            error.user_message().as_deref(),
            Some("Treats category not found. Please contact administrator.")
        );
    }

    #[tokio::test]
    async fn remove_item_without_draft_redirects_to_agency() {
        let (service, _, session) = Harness::new().build();

        let result = service.remove_item(&session, ProductUuid::new()).await;

        assert!(matches!(result, Err(ShopError::NoDraft)));
    }

    #[tokio::test]
    async fn remove_item_saves_the_smaller_box() -> TestResult {
        let draft = ready_for_gifts();
        let treat = draft.items()[2].product_uuid;
        let harness = Harness::new().with_draft(&draft).await;
        let (service, drafts, session) = harness.build();

        let updated = service.remove_item(&session, treat).await?;

        assert!(!updated.has_treat());
        assert_eq!(drafts.load(&session).await?, Some(updated));

        Ok(())
    }

    #[tokio::test]
    async fn empty_checkout_never_calls_the_order_sink() {
        let mut harness = Harness::new();

        harness.orders.expect_checkout().never();

        let (service, _, session) = harness.build();

        let result = service.checkout(&session).await;

        let error = result.expect_err("request should be rejected");

        assert_eq!(error.redirect(), Some(FlowStep::Review));
        assert_eq!(
            error.user_message().as_deref(),
            Some("You must select a card, book, and treat before checkout.")
        );
    }

    #[tokio::test]
    async fn failed_checkout_keeps_the_draft() -> TestResult {
        let draft = ready_for_gifts();
        let mut harness = Harness::new().with_draft(&draft).await;

        harness.orders.expect_checkout().once().return_once(|_| {
            Err(CheckoutError::InsufficientInventory {
                product: ProductUuid::new(),
                requested: 1,
                available: 0,
            })
        });

        let (service, drafts, session) = harness.build();

        let result = service.checkout(&session).await;

        let error = result.expect_err("request should be rejected");

        assert_eq!(error.redirect(), Some(FlowStep::Review));
        assert_eq!(
            error.user_message().as_deref(),
            Some("Checkout failed. Please try again.")
        );
        assert_eq!(drafts.load(&session).await?, Some(draft));

        Ok(())
    }

    #[tokio::test]
    async fn successful_checkout_clears_the_draft() -> TestResult {
        let draft = ready_for_gifts();
        let expected = draft.clone();
        let mut harness = Harness::new().with_draft(&draft).await;
        let order = OrderUuid::new();

        harness
            .orders
            .expect_checkout()
            .once()
            .withf(move |submitted| *submitted == expected)
            .return_once(move |_| Ok(order));

        let (service, drafts, session) = harness.build();

        assert_eq!(service.checkout(&session).await?, order);
        assert_eq!(drafts.load(&session).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn committed_order_survives_a_failed_draft_clear() -> TestResult {
        let draft = ready_for_gifts();
        let order = OrderUuid::new();
        let mut drafts = MockDraftStore::new();
        let mut orders = MockOrdersService::new();

        drafts
            .expect_load()
            .once()
            .return_once(move |_| Ok(Some(draft)));
        drafts.expect_save().never();
        drafts
            .expect_clear()
            .once()
            .return_once(|_| Err(DraftStoreError::Sql(sqlx::Error::PoolTimedOut)));

        orders
            .expect_checkout()
            .once()
            .return_once(move |_| Ok(order));

        let service = SessionShopService::new(
            Arc::new(MockCatalogService::new()),
            Arc::new(drafts),
            Arc::new(orders),
            Arc::new(FixedClock::on(date(2026, 10, 19))),
        );

        assert_eq!(service.checkout(&SessionKey::generate()).await?, order);

        Ok(())
    }

    #[tokio::test]
    async fn box_without_agency_is_refused_before_the_order_sink() -> TestResult {
        let mut draft = OrderDraft::new();

        draft.set_birth_date(date(2016, 1, 1), date(2026, 10, 19))?;

        for (category, name, points) in [
            (Category::Card, "Card", 5),
            (Category::Book, "Book", 10),
            (Category::Treat, "Treat", 3),
        ] {
            draft.add_item(&product(category, name, points, 1))?;
        }

        let mut harness = Harness::new().with_draft(&draft).await;

        harness.orders.expect_checkout().never();

        let (service, drafts, session) = harness.build();

        let error = service
            .checkout(&session)
            .await
            .expect_err("request should be rejected");

        assert_eq!(error.redirect(), Some(FlowStep::Review));
        assert_eq!(
            error.user_message().as_deref(),
            Some("You must select a card, book, and treat before checkout.")
        );
        assert_eq!(drafts.load(&session).await?, Some(draft));

        Ok(())
    }
}
