//! Aggregation, search and view-model assembly for the coupon site.
//!
//! The engines in [`aggregate`] and [`search`] are pure functions over
//! already-fetched entities. [`pages`] runs the concurrent content queries for
//! each page and feeds the results through them.

pub mod aggregate;
pub mod cards;
pub mod directory;
pub mod pages;
pub mod search;

pub use pages::{PageContext, PageError};

#[cfg(test)]
mod fixtures;
