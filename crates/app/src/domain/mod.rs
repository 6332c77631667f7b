//! Birthday Box Domain Concerns

pub mod catalog;
pub mod categories;
pub mod drafts;
pub mod flow;
pub mod orders;
pub mod points;
pub mod shop;
