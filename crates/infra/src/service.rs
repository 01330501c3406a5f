//! Inventory service: the boundary the transport layer calls into.
//!
//! Accepts raw identifiers and amounts, validates them, and delegates to the
//! repository, [`SearchEngine`] and [`StockTransitionEngine`]. Every rejected
//! call is logged once here and returned as a [`DomainError`] whose
//! [`kind`](DomainError::kind) tells the caller how to respond.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use sweetshop_core::{DomainError, DomainResult, Entity, SweetId};
use sweetshop_inventory::{SearchCriteria, StockAmount, Sweet, SweetDraft};

use crate::config::InventoryConfig;
use crate::ids::IdAllocator;
use crate::repository::{InMemorySweetRepository, SweetRepository};
use crate::search::SearchEngine;
use crate::stock::StockTransitionEngine;

/// Catalogue operations over one explicitly owned repository.
#[derive(Debug)]
pub struct SweetService<R> {
    repository: R,
    search: SearchEngine<R>,
    stock: StockTransitionEngine<R>,
    ids: IdAllocator,
}

impl SweetService<Arc<InMemorySweetRepository>> {
    /// Service over a fresh in-memory repository.
    pub fn in_memory(config: &InventoryConfig) -> DomainResult<Self> {
        let repository = Arc::new(InMemorySweetRepository::with_capacity(
            config.initial_capacity,
        ));
        Self::new(repository, config)
    }
}

impl<R> SweetService<R>
where
    R: SweetRepository + Clone,
{
    pub fn new(repository: R, config: &InventoryConfig) -> DomainResult<Self> {
        Ok(Self {
            search: SearchEngine::new(repository.clone()),
            stock: StockTransitionEngine::new(repository.clone()),
            ids: IdAllocator::starting_at(SweetId::try_from(config.first_id)?),
            repository,
        })
    }

    pub fn all_sweets(&self) -> Vec<Sweet> {
        self.repository.get_all()
    }

    /// `Ok(None)` when the id is well formed but unknown.
    #[instrument(skip(self))]
    pub fn sweet_by_id(&self, id: i64) -> DomainResult<Option<Sweet>> {
        let id = parse_id(id)?;
        let found = self.repository.get_by_id(id);
        debug!(sweet_id = %id, found = found.is_some(), "lookup");
        Ok(found)
    }

    #[instrument(skip(self, sweet), fields(sweet_id = %sweet.id()))]
    pub fn create_sweet(&self, sweet: Sweet) -> DomainResult<Sweet> {
        let created = self
            .repository
            .create(sweet)
            .inspect_err(|e| warn!(error = %e, "create rejected"))?;
        info!("sweet created");
        Ok(created)
    }

    /// Validate an untyped record (including its `id`) and create it.
    pub fn create_from_json(&self, record: &Value) -> DomainResult<Sweet> {
        let sweet = Sweet::from_json(record)
            .inspect_err(|e| warn!(error = %e, "invalid sweet record"))?;
        self.create_sweet(sweet)
    }

    /// Create `draft` under the next free id.
    #[instrument(skip(self, draft), fields(name = draft.name()))]
    pub fn add_sweet(&self, draft: SweetDraft) -> DomainResult<Sweet> {
        loop {
            let id = self.ids.allocate(&self.repository)?;
            match self.repository.create(draft.clone().into_sweet(id)) {
                Ok(created) => {
                    info!(sweet_id = %id, "sweet added");
                    return Ok(created);
                }
                // Taken between allocation and insert; draw again.
                Err(DomainError::DuplicateId(_)) => continue,
                Err(e) => {
                    warn!(error = %e, "add rejected");
                    return Err(e);
                }
            }
        }
    }

    /// `Ok(false)` when the id is well formed but unknown.
    #[instrument(skip(self))]
    pub fn delete_sweet(&self, id: i64) -> DomainResult<bool> {
        let id = parse_id(id)?;
        let deleted = self.repository.delete(id);
        if deleted {
            info!(sweet_id = %id, "sweet deleted");
        } else {
            debug!(sweet_id = %id, "nothing to delete");
        }
        Ok(deleted)
    }

    pub fn search_sweets(&self, criteria: &SearchCriteria) -> DomainResult<Vec<Sweet>> {
        self.search.search(criteria)
    }

    #[instrument(skip(self))]
    pub fn purchase_sweet(&self, id: i64, quantity: i64) -> DomainResult<Sweet> {
        let id = parse_id(id)?;
        let amount = parse_amount(quantity)?;
        self.stock.purchase(id, amount)
    }

    #[instrument(skip(self))]
    pub fn restock_sweet(&self, id: i64, quantity: i64) -> DomainResult<Sweet> {
        let id = parse_id(id)?;
        let amount = parse_amount(quantity)?;
        self.stock.restock(id, amount)
    }
}

fn parse_id(raw: i64) -> DomainResult<SweetId> {
    SweetId::new(raw).inspect_err(|e| warn!(error = %e, "invalid sweet id"))
}

fn parse_amount(raw: i64) -> DomainResult<StockAmount> {
    StockAmount::new(raw).inspect_err(|e| warn!(error = %e, "invalid quantity"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sweetshop_core::ErrorKind;

    fn service() -> SweetService<Arc<InMemorySweetRepository>> {
        SweetService::in_memory(&InventoryConfig::default()).unwrap()
    }

    fn seeded() -> SweetService<Arc<InMemorySweetRepository>> {
        let service = service();
        service
            .create_sweet(Sweet::new(1, "Dark Chocolate", "chocolate", 4.99, 20).unwrap())
            .unwrap();
        service
            .create_sweet(Sweet::new(2, "Gummy Bears", "candy", 2.50, 0).unwrap())
            .unwrap();
        service
    }

    #[test]
    fn non_positive_ids_are_invalid_arguments() {
        let service = seeded();
        for id in [0, -1] {
            assert!(matches!(service.sweet_by_id(id), Err(DomainError::InvalidArgument(_))));
            assert!(matches!(service.delete_sweet(id), Err(DomainError::InvalidArgument(_))));
            assert!(matches!(
                service.purchase_sweet(id, 1),
                Err(DomainError::InvalidArgument(_))
            ));
            assert!(matches!(
                service.restock_sweet(id, 1),
                Err(DomainError::InvalidArgument(_))
            ));
        }
        assert_eq!(service.all_sweets().len(), 2);
    }

    #[test]
    fn unknown_id_is_absence_not_error() {
        let service = seeded();
        assert_eq!(service.sweet_by_id(42).unwrap(), None);
        assert!(!service.delete_sweet(42).unwrap());
    }

    #[test]
    fn non_positive_amounts_are_invalid_quantities() {
        let service = seeded();
        for amount in [0, -5] {
            assert!(matches!(
                service.purchase_sweet(1, amount),
                Err(DomainError::InvalidQuantity(_))
            ));
            assert!(matches!(
                service.restock_sweet(1, amount),
                Err(DomainError::InvalidQuantity(_))
            ));
        }
        assert_eq!(service.sweet_by_id(1).unwrap().unwrap().quantity(), 20);
    }

    #[test]
    fn error_kinds_stay_distinct_at_the_boundary() {
        let service = seeded();
        assert_eq!(
            service.purchase_sweet(1, 0).unwrap_err().kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            service.purchase_sweet(77, 1).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            service.purchase_sweet(2, 1).unwrap_err().kind(),
            ErrorKind::RuleViolation
        );
    }

    #[test]
    fn add_sweet_allocates_free_ids() {
        let service = seeded();
        let draft = SweetDraft::new("Toffee", "candy", 1.10, 30).unwrap();

        let first = service.add_sweet(draft.clone()).unwrap();
        let second = service.add_sweet(draft).unwrap();

        assert_eq!(first.id().get(), 3);
        assert_eq!(second.id().get(), 4);
        assert_eq!(service.all_sweets().len(), 4);
    }

    #[test]
    fn config_first_id_is_honoured() {
        let config = InventoryConfig {
            first_id: 1000,
            ..InventoryConfig::default()
        };
        let service = SweetService::in_memory(&config).unwrap();
        let sweet = service
            .add_sweet(SweetDraft::new("Fudge", "candy", 3.0, 1).unwrap())
            .unwrap();
        assert_eq!(sweet.id().get(), 1000);
    }

    #[test]
    fn create_from_json_validates_then_stores() {
        let service = service();
        let created = service
            .create_from_json(&json!({
                "id": 8,
                "name": " Licorice ",
                "category": "candy",
                "price": 0.5,
                "quantity": 12,
            }))
            .unwrap();
        assert_eq!(created.name(), "Licorice");
        assert_eq!(service.sweet_by_id(8).unwrap(), Some(created));

        assert!(matches!(
            service.create_from_json(&Value::Null),
            Err(DomainError::InvalidEntity(_))
        ));
        assert!(matches!(
            service.create_from_json(&json!({ "id": 9, "name": "X", "category": "c", "price": "1", "quantity": 1 })),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(service.all_sweets().len(), 1);
    }

    #[test]
    fn duplicate_create_is_rejected() {
        let service = seeded();
        let err = service
            .create_sweet(Sweet::new(1, "Impostor", "candy", 1.0, 1).unwrap())
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateId(SweetId::new(1).unwrap()));
        assert_eq!(service.sweet_by_id(1).unwrap().unwrap().name(), "Dark Chocolate");
    }
}
