//! Shop errors.

use thiserror::Error;

use crate::domain::{
    catalog::{CatalogServiceError, records::ProductUuid},
    categories::Category,
    drafts::{DraftError, DraftStoreError},
    flow::{FlowStep, StepRedirect},
    orders::{CheckoutError, OrdersServiceError},
};

pub const INVALID_AGENCY_MESSAGE: &str = "Invalid agency selection.";
pub const INVALID_AGENCY_CODE_MESSAGE: &str =
    "Invalid agency code. Please check your 3-letter code.";
pub const INVALID_AGE_MESSAGE: &str = "Child age must be between 0 and 18 years.";
pub const OUT_OF_STOCK_MESSAGE: &str = "This item is out of stock.";
pub const INSUFFICIENT_POINTS_MESSAGE: &str = "Not enough points to add this item.";
pub const CHECKOUT_FAILED_MESSAGE: &str = "Checkout failed. Please try again.";

/// Why an agency could not be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgencyRejection {
    /// No such agency, or it is no longer active.
    Unavailable,
    CodeMismatch,
}

/// Every way a shopping request can be refused.
///
/// Rejections carry a deterministic redirect and message so that the same
/// draft and error always send the shopper to the same place.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("invalid agency selection: {0:?}")]
    InvalidAgencySelection(AgencyRejection),

    #[error("child age {age} is outside the eligible range")]
    InvalidAge { age: i32 },

    #[error(transparent)]
    StepUnavailable(StepRedirect),

    #[error("{0} category is missing or inactive")]
    CategoryUnavailable(Category),

    #[error("product {product} not found")]
    ProductNotFound { product: ProductUuid },

    #[error("product {product} is out of stock")]
    OutOfStock {
        product: ProductUuid,
        category: Category,
    },

    #[error("not enough points for product {product}")]
    InsufficientPoints {
        product: ProductUuid,
        category: Category,
    },

    #[error("there is no draft for this session")]
    NoDraft,

    #[error("checkout failed")]
    Checkout(#[source] CheckoutError),

    #[error("order not found")]
    OrderNotFound,

    #[error("catalog error")]
    Catalog(#[source] CatalogServiceError),

    #[error("draft store error")]
    Drafts(#[from] DraftStoreError),

    #[error("orders error")]
    Orders(#[source] OrdersServiceError),
}

impl ShopError {
    /// The step to send the shopper back to, or `None` when the error is not
    /// a flow rejection (missing resources, storage failures).
    pub fn redirect(&self) -> Option<FlowStep> {
        match self {
            Self::InvalidAgencySelection(_) | Self::NoDraft => Some(FlowStep::SelectAgency),
            Self::InvalidAge { .. } => Some(FlowStep::DemographicIntake),
            Self::StepUnavailable(refused) => Some(refused.redirect),
            Self::CategoryUnavailable(category) => {
                Some(FlowStep::for_category(*category).previous())
            }
            Self::OutOfStock { category, .. } | Self::InsufficientPoints { category, .. } => {
                Some(FlowStep::for_category(*category))
            }
            Self::Checkout(_) => Some(FlowStep::Review),
            Self::ProductNotFound { .. }
            | Self::OrderNotFound
            | Self::Catalog(_)
            | Self::Drafts(_)
            | Self::Orders(_) => None,
        }
    }

    /// Message to show the shopper alongside the redirect.
    ///
    /// Checkout failures all read the same; the underlying cause stays in
    /// the error chain for logs.
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            Self::InvalidAgencySelection(AgencyRejection::Unavailable) => INVALID_AGENCY_MESSAGE,
            Self::InvalidAgencySelection(AgencyRejection::CodeMismatch) => {
                INVALID_AGENCY_CODE_MESSAGE
            }
            Self::InvalidAge { .. } => INVALID_AGE_MESSAGE,
            Self::StepUnavailable(refused) => return refused.message().map(str::to_string),
            Self::CategoryUnavailable(category) => {
                return Some(format!(
                    "{category} category not found. Please contact administrator."
                ));
            }
            Self::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
            Self::InsufficientPoints { .. } => INSUFFICIENT_POINTS_MESSAGE,
            Self::Checkout(_) => CHECKOUT_FAILED_MESSAGE,
            Self::NoDraft
            | Self::ProductNotFound { .. }
            | Self::OrderNotFound
            | Self::Catalog(_)
            | Self::Drafts(_)
            | Self::Orders(_) => return None,
        };

        Some(message.to_string())
    }
}

impl From<StepRedirect> for ShopError {
    fn from(refused: StepRedirect) -> Self {
        Self::StepUnavailable(refused)
    }
}

impl From<DraftError> for ShopError {
    fn from(error: DraftError) -> Self {
        match error {
            DraftError::OutOfStock { product, category } => Self::OutOfStock { product, category },
            DraftError::InsufficientPoints {
                product, category, ..
            } => Self::InsufficientPoints { product, category },
            DraftError::InvalidAge { age } => Self::InvalidAge { age },
        }
    }
}

impl From<CatalogServiceError> for ShopError {
    fn from(error: CatalogServiceError) -> Self {
        match error {
            CatalogServiceError::CategoryUnavailable(category) => {
                Self::CategoryUnavailable(category)
            }
            other => Self::Catalog(other),
        }
    }
}

impl From<CheckoutError> for ShopError {
    fn from(error: CheckoutError) -> Self {
        Self::Checkout(error)
    }
}

impl From<OrdersServiceError> for ShopError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::OrderNotFound,
            other => Self::Orders(other),
        }
    }
}
