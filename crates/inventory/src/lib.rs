//! Inventory domain module.
//!
//! This crate contains business rules for the sweet catalogue, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod search;
pub mod stock;
pub mod sweet;

pub use search::{SearchCriteria, SearchFilter};
pub use stock::{StockAmount, StockTransition};
pub use sweet::{Price, Sweet, SweetDraft};
