//! Shop Handlers

pub(crate) mod add_item;
pub(crate) mod agency;
pub(crate) mod checkout;
pub(crate) mod child;
pub(crate) mod draft;
pub(crate) mod products;
pub(crate) mod remove_item;
pub(crate) mod steps;
