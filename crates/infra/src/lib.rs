//! Infrastructure layer: storage, query and transition execution, config.

pub mod config;
pub mod ids;
pub mod repository;
pub mod search;
pub mod service;
pub mod stock;


pub use config::{ConfigError, InventoryConfig};
pub use ids::IdAllocator;
pub use repository::{InMemorySweetRepository, SweetRepository};
pub use search::SearchEngine;
pub use service::SweetService;
pub use stock::StockTransitionEngine;
