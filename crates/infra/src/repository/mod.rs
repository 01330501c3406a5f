//! Sweet storage boundary.
//!
//! Defines the repository abstraction the engines operate on, plus the
//! in-memory implementation used by the service and tests.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemorySweetRepository;
pub use r#trait::SweetRepository;
