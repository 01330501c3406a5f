//! Multi-criteria search over a repository.

use tracing::{debug, instrument, warn};

use sweetshop_core::DomainResult;
use sweetshop_inventory::{SearchCriteria, Sweet};

use crate::repository::SweetRepository;

/// Evaluates [`SearchCriteria`] against a repository's current contents.
///
/// Pure read: criteria are validated before the repository is touched, and
/// results come back in repository order.
#[derive(Debug, Clone)]
pub struct SearchEngine<R> {
    repository: R,
}

impl<R> SearchEngine<R>
where
    R: SweetRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub fn search(&self, criteria: &SearchCriteria) -> DomainResult<Vec<Sweet>> {
        let filter = criteria.validate().inspect_err(|e| {
            warn!(error = %e, "rejected search criteria");
        })?;

        let found = self.repository.find(&|s| filter.matches(s));
        debug!(matches = found.len(), "search complete");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use sweetshop_core::{DomainError, Entity};

    use crate::repository::InMemorySweetRepository;

    fn engine() -> SearchEngine<Arc<InMemorySweetRepository>> {
        let repo = Arc::new(InMemorySweetRepository::new());
        for sweet in [
            Sweet::new(1, "Dark Chocolate", "chocolate", 4.99, 20),
            Sweet::new(2, "Lemon Drop", "candy", 0.75, 200),
            Sweet::new(3, "Chocolate Truffle", "chocolate", 12.0, 5),
            Sweet::new(4, "Milk Chocolate", "chocolate", 3.99, 0),
        ] {
            repo.create(sweet.unwrap()).unwrap();
        }
        SearchEngine::new(repo)
    }

    fn ids(found: &[Sweet]) -> Vec<u64> {
        found.iter().map(|s| s.id().get()).collect()
    }

    #[test]
    fn returns_matches_in_repository_order() {
        let found = engine()
            .search(&SearchCriteria::new().with_category("chocolate"))
            .unwrap();
        assert_eq!(ids(&found), vec![1, 3, 4]);
    }

    #[test]
    fn combines_name_and_price() {
        let found = engine()
            .search(
                &SearchCriteria::new()
                    .with_name("chocolate")
                    .with_min_price(4.0)
                    .with_max_price(13.0),
            )
            .unwrap();
        assert_eq!(ids(&found), vec![1, 3]);
    }

    #[test]
    fn invalid_criteria_fail_before_reading() {
        let engine = engine();
        assert_eq!(
            engine.search(&SearchCriteria::new()),
            Err(DomainError::EmptyCriteria)
        );
        assert!(matches!(
            engine.search(&SearchCriteria::new().with_min_price(10.0).with_max_price(5.0)),
            Err(DomainError::InvalidRange { .. })
        ));
    }

    #[test]
    fn no_match_is_empty() {
        let found = engine()
            .search(&SearchCriteria::new().with_name("licorice"))
            .unwrap();
        assert!(found.is_empty());
    }
}
