//! Identifier allocation for newly added sweets.

use std::sync::atomic::{AtomicU64, Ordering};

use sweetshop_core::{DomainError, DomainResult, SweetId};

use crate::repository::SweetRepository;

/// Hands out monotonically increasing ids, skipping any already stored.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn starting_at(first: SweetId) -> Self {
        Self {
            next: AtomicU64::new(first.get()),
        }
    }

    /// Next id not present in `repository` at the time of the call.
    pub fn allocate<R>(&self, repository: &R) -> DomainResult<SweetId>
    where
        R: SweetRepository + ?Sized,
    {
        loop {
            let raw = self.next.fetch_add(1, Ordering::Relaxed);
            if raw == u64::MAX {
                return Err(DomainError::invalid_argument("sweet id space exhausted"));
            }
            let id = SweetId::try_from(raw)?;
            if !repository.exists(id) {
                return Ok(id);
            }
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}
