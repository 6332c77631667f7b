//! Categories

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four roles a catalog category can play in the shopping flow.
///
/// Catalog rows are matched to a role by name exactly once, when they are
/// read from storage; the flow itself never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cards")]
    Card,
    #[serde(rename = "Books")]
    Book,
    #[serde(rename = "Treats")]
    Treat,
    #[serde(rename = "Gifts")]
    Gift,
}

/// Categories a box must contain exactly one of.
pub const MANDATORY_CATEGORIES: [Category; 3] = [Category::Card, Category::Book, Category::Treat];

impl Category {
    /// Name of the category row in the catalog.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Card => "Cards",
            Self::Book => "Books",
            Self::Treat => "Treats",
            Self::Gift => "Gifts",
        }
    }

    /// Cards, books and treats are single-selection.
    pub const fn is_mandatory(self) -> bool {
        !matches!(self, Self::Gift)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Cards" => Ok(Self::Card),
            "Books" => Ok(Self::Book),
            "Treats" => Ok(Self::Treat),
            "Gifts" => Ok(Self::Gift),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for category in [Category::Card, Category::Book, Category::Treat, Category::Gift] {
            assert_eq!(category.name().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(
            "cards".parse::<Category>(),
            Err(UnknownCategory("cards".to_string()))
        );
    }

    #[test]
    fn only_gifts_are_multi_select() {
        assert!(MANDATORY_CATEGORIES.iter().all(|category| category.is_mandatory()));
        assert!(!Category::Gift.is_mandatory());
    }

    #[test]
    fn serializes_using_catalog_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Category::Treat)?, "\"Treats\"");

        Ok(())
    }
}
