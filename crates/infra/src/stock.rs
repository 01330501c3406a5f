//! Stock transition execution.
//!
//! Applies [`StockTransition`]s to stored sweets. The domain decides the next
//! snapshot; this module makes the guard and the write a single critical
//! section through [`SweetRepository::try_update`].

use tracing::{info, instrument, warn};

use sweetshop_core::{DomainResult, SweetId};
use sweetshop_inventory::{StockAmount, StockTransition, Sweet};

use crate::repository::SweetRepository;

/// Executes purchases and restocks against a repository.
#[derive(Debug, Clone)]
pub struct StockTransitionEngine<R> {
    repository: R,
}

impl<R> StockTransitionEngine<R>
where
    R: SweetRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Sell `amount` units of `id`; `InsufficientStock` if fewer remain.
    pub fn purchase(&self, id: SweetId, amount: StockAmount) -> DomainResult<Sweet> {
        self.apply(id, StockTransition::Purchase(amount))
    }

    /// Add `amount` units to `id`; allowed at any stock level.
    pub fn restock(&self, id: SweetId, amount: StockAmount) -> DomainResult<Sweet> {
        self.apply(id, StockTransition::Restock(amount))
    }

    /// Apply `transition` atomically; either the new snapshot is stored and
    /// returned, or nothing changes.
    #[instrument(skip(self))]
    pub fn apply(&self, id: SweetId, transition: StockTransition) -> DomainResult<Sweet> {
        match self.repository.try_update(id, &|current| transition.apply(current)) {
            Ok(updated) => {
                info!(
                    sweet_id = %id,
                    amount = transition.amount().get(),
                    quantity = updated.quantity(),
                    "stock transition applied"
                );
                Ok(updated)
            }
            Err(e) => {
                warn!(sweet_id = %id, error = %e, "stock transition rejected");
                Err(e)
            }
        }
    }
}
