use std::sync::Arc;

use sweetshop_core::{DomainResult, SweetId};
use sweetshop_inventory::Sweet;

/// Authoritative, order-preserving collection of sweets.
///
/// Implementations own every stored snapshot; callers only ever receive
/// clones, so nothing outside the repository can diverge from stored state.
/// Each method is one critical section: no caller can observe or interleave
/// with a half-applied write.
pub trait SweetRepository: Send + Sync {
    /// Append `sweet`; fails with `DuplicateId` (repository unchanged) if the
    /// id is already taken.
    fn create(&self, sweet: Sweet) -> DomainResult<Sweet>;

    /// All sweets in insertion order.
    fn get_all(&self) -> Vec<Sweet>;

    fn get_by_id(&self, id: SweetId) -> Option<Sweet>;

    fn exists(&self, id: SweetId) -> bool;

    /// Remove the sweet with `id`; `false` if there was none.
    fn delete(&self, id: SweetId) -> bool;

    /// Replace the stored snapshot with the same id; `false` if there was none.
    fn update(&self, sweet: Sweet) -> bool;

    /// Sweets matching `predicate`, in insertion order.
    fn find(&self, predicate: &dyn Fn(&Sweet) -> bool) -> Vec<Sweet>;

    /// Read-decide-write on one sweet without releasing the lock in between.
    ///
    /// `decide` receives the current snapshot and returns its replacement.
    /// Fails with `NotFound` if `id` is absent, or with whatever `decide`
    /// returns; in both cases nothing is written.
    fn try_update(
        &self,
        id: SweetId,
        decide: &dyn Fn(&Sweet) -> DomainResult<Sweet>,
    ) -> DomainResult<Sweet>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> SweetRepository for Arc<S>
where
    S: SweetRepository + ?Sized,
{
    fn create(&self, sweet: Sweet) -> DomainResult<Sweet> {
        (**self).create(sweet)
    }

    fn get_all(&self) -> Vec<Sweet> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: SweetId) -> Option<Sweet> {
        (**self).get_by_id(id)
    }

    fn exists(&self, id: SweetId) -> bool {
        (**self).exists(id)
    }

    fn delete(&self, id: SweetId) -> bool {
        (**self).delete(id)
    }

    fn update(&self, sweet: Sweet) -> bool {
        (**self).update(sweet)
    }

    fn find(&self, predicate: &dyn Fn(&Sweet) -> bool) -> Vec<Sweet> {
        (**self).find(predicate)
    }

    fn try_update(
        &self,
        id: SweetId,
        decide: &dyn Fn(&Sweet) -> DomainResult<Sweet>,
    ) -> DomainResult<Sweet> {
        (**self).try_update(id, decide)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
