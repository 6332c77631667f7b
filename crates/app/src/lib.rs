//! Birthday box shopping flow: domain rules and persistence.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
