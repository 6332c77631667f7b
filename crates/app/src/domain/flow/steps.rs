//! Flow Steps

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::categories::Category;

/// A page of the shopping flow, in the order a shopper walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    SelectAgency,
    DemographicIntake,
    GetReadyToShop,
    SelectCard,
    SelectBook,
    SelectTreat,
    SelectGifts,
    Review,
    Checkout,
    ThankYou,
}

impl FlowStep {
    pub const ALL: [Self; 10] = [
        Self::SelectAgency,
        Self::DemographicIntake,
        Self::GetReadyToShop,
        Self::SelectCard,
        Self::SelectBook,
        Self::SelectTreat,
        Self::SelectGifts,
        Self::Review,
        Self::Checkout,
        Self::ThankYou,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelectAgency => "select_agency",
            Self::DemographicIntake => "demographic_intake",
            Self::GetReadyToShop => "get_ready_to_shop",
            Self::SelectCard => "select_card",
            Self::SelectBook => "select_book",
            Self::SelectTreat => "select_treat",
            Self::SelectGifts => "select_gifts",
            Self::Review => "review",
            Self::Checkout => "checkout",
            Self::ThankYou => "thank_you",
        }
    }

    /// The step on which products of `category` are chosen.
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Card => Self::SelectCard,
            Category::Book => Self::SelectBook,
            Category::Treat => Self::SelectTreat,
            Category::Gift => Self::SelectGifts,
        }
    }

    /// The category browsed on this step, if it is a product step.
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::SelectCard => Some(Category::Card),
            Self::SelectBook => Some(Category::Book),
            Self::SelectTreat => Some(Category::Treat),
            Self::SelectGifts => Some(Category::Gift),
            _ => None,
        }
    }

    /// Where the shopper goes after putting an item of `category` in the box.
    /// Gifts stay put so several can be added.
    pub const fn after_adding(category: Category) -> Self {
        match category {
            Category::Card => Self::SelectBook,
            Category::Book => Self::SelectTreat,
            Category::Treat | Category::Gift => Self::SelectGifts,
        }
    }

    /// The step before this one; the first step is its own predecessor.
    pub const fn previous(self) -> Self {
        match self {
            Self::SelectAgency | Self::DemographicIntake => Self::SelectAgency,
            Self::GetReadyToShop => Self::DemographicIntake,
            Self::SelectCard => Self::GetReadyToShop,
            Self::SelectBook => Self::SelectCard,
            Self::SelectTreat => Self::SelectBook,
            Self::SelectGifts => Self::SelectTreat,
            Self::Review => Self::SelectGifts,
            Self::Checkout => Self::Review,
            Self::ThankYou => Self::Checkout,
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown flow step: {0}")]
pub struct UnknownStep(pub String);

impl FromStr for FlowStep {
    type Err = UnknownStep;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == value)
            .ok_or_else(|| UnknownStep(value.to_string()))
    }
}
