use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sweetshop_core::{DomainError, DomainResult, Entity, SweetId};
use sweetshop_inventory::Sweet;

use super::r#trait::SweetRepository;

/// Insertion-ordered sweets plus an id -> position index.
#[derive(Debug, Default)]
struct Catalogue {
    sweets: Vec<Sweet>,
    index: HashMap<SweetId, usize>,
}

impl Catalogue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            sweets: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn get(&self, id: SweetId) -> Option<&Sweet> {
        self.index.get(&id).map(|&pos| &self.sweets[pos])
    }

    fn get_mut(&mut self, id: SweetId) -> Option<&mut Sweet> {
        let pos = *self.index.get(&id)?;
        Some(&mut self.sweets[pos])
    }

    fn remove(&mut self, id: SweetId) -> Option<Sweet> {
        let pos = self.index.remove(&id)?;
        let removed = self.sweets.remove(pos);
        // Everything after `pos` shifted left by one.
        for (offset, sweet) in self.sweets[pos..].iter().enumerate() {
            self.index.insert(sweet.id(), pos + offset);
        }
        Some(removed)
    }
}

/// In-memory sweet repository behind a single `RwLock`.
///
/// One lock over the whole catalogue: reads run concurrently, writes
/// (including `try_update`'s guard-then-mutate) are serialized. Every write
/// replaces a whole, already-validated snapshot, so a poisoned lock still
/// guards consistent data and is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct InMemorySweetRepository {
    inner: RwLock<Catalogue>,
}

impl InMemorySweetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Catalogue::with_capacity(capacity)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalogue> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalogue> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SweetRepository for InMemorySweetRepository {
    fn create(&self, sweet: Sweet) -> DomainResult<Sweet> {
        let mut catalogue = self.write();
        let id = sweet.id();
        if catalogue.index.contains_key(&id) {
            return Err(DomainError::duplicate(id));
        }

        let pos = catalogue.sweets.len();
        catalogue.sweets.push(sweet.clone());
        catalogue.index.insert(id, pos);
        Ok(sweet)
    }

    fn get_all(&self) -> Vec<Sweet> {
        self.read().sweets.clone()
    }

    fn get_by_id(&self, id: SweetId) -> Option<Sweet> {
        self.read().get(id).cloned()
    }

    fn exists(&self, id: SweetId) -> bool {
        self.read().index.contains_key(&id)
    }

    fn delete(&self, id: SweetId) -> bool {
        self.write().remove(id).is_some()
    }

    fn update(&self, sweet: Sweet) -> bool {
        let mut catalogue = self.write();
        match catalogue.get_mut(sweet.id()) {
            Some(slot) => {
                *slot = sweet;
                true
            }
            None => false,
        }
    }

    fn find(&self, predicate: &dyn Fn(&Sweet) -> bool) -> Vec<Sweet> {
        self.read()
            .sweets
            .iter()
            .filter(|s| predicate(s))
            .cloned()
            .collect()
    }

    fn try_update(
        &self,
        id: SweetId,
        decide: &dyn Fn(&Sweet) -> DomainResult<Sweet>,
    ) -> DomainResult<Sweet> {
        let mut catalogue = self.write();
        let slot = catalogue.get_mut(id).ok_or(DomainError::not_found(id))?;

        let next = decide(slot)?;
        if next.id() != id {
            return Err(DomainError::invalid_argument(format!(
                "update of sweet {id} tried to change its id to {}",
                next.id()
            )));
        }

        *slot = next.clone();
        Ok(next)
    }

    fn len(&self) -> usize {
        self.read().sweets.len()
    }
}
