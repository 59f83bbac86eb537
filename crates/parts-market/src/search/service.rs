//! The search pipeline: predicate, fetch, rank, paginate.

use std::time::Duration;

use tracing::Instrument;

use crate::context::RequestContext;
use crate::error::MarketError;
use crate::search::{rank, Pagination, RankedPage, SearchCriteria};
use crate::store::ProductStore;

/// Runs searches against a [`ProductStore`].
#[derive(Debug, Clone)]
pub struct SearchService<S> {
    store: S,
    timeout: Option<Duration>,
}

impl<S: ProductStore> SearchService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            timeout: None,
        }
    }

    /// Bound the store round trip. Expiry is reported as a fetch failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run one search.
    ///
    /// The page and the total are fetched concurrently; either failing fails
    /// the whole search. The total is independent of the sort mode.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        criteria: &SearchCriteria,
    ) -> Result<RankedPage, MarketError> {
        let span = tracing::info_span!(
            "search",
            request_id = %ctx.request_id,
            sort = %criteria.sort,
            page = criteria.page,
            limit = criteria.limit,
        );

        async {
            let query = criteria.store_query();
            let fetch = async {
                futures::try_join!(
                    self.store.fetch_page(&query),
                    self.store.count(&query.predicate)
                )
            };

            let result = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, fetch)
                    .await
                    .unwrap_or_else(|_| Err(MarketError::Timeout(limit))),
                None => fetch.await,
            };

            let (candidates, total) = result.map_err(|e| {
                tracing::error!(error = %e, "product fetch failed");
                e
            })?;

            let products = rank(candidates, criteria.sort, &criteria.requester);
            let pagination = Pagination::new(criteria.page, criteria.limit, total);

            tracing::debug!(
                returned = products.len(),
                total,
                elapsed_ms = ctx.elapsed_ms() as u64,
                "search complete"
            );

            Ok::<_, MarketError>(RankedPage::new(products, pagination))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Candidate;
    use crate::search::{ProductPredicate, SortMode, StoreQuery};
    use crate::seed;
    use crate::store::MemoryProductStore;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl ProductStore for FailingStore {
        async fn fetch_page(&self, _query: &StoreQuery) -> Result<Vec<Candidate>, MarketError> {
            Ok(vec![])
        }

        async fn count(&self, _predicate: &ProductPredicate) -> Result<u64, MarketError> {
            Err(MarketError::DatabaseError("connection reset".into()))
        }
    }

    struct SlowStore;

    #[async_trait]
    impl ProductStore for SlowStore {
        async fn fetch_page(&self, _query: &StoreQuery) -> Result<Vec<Candidate>, MarketError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![])
        }

        async fn count(&self, _predicate: &ProductPredicate) -> Result<u64, MarketError> {
            Ok(0)
        }
    }

    fn service() -> SearchService<MemoryProductStore> {
        SearchService::new(MemoryProductStore::new(seed::sample_candidates()))
    }

    #[tokio::test]
    async fn test_location_search_ranks_by_score() {
        let criteria = SearchCriteria::new().with_requester("Basra", "Basra");
        let page = service()
            .search(&RequestContext::new(), &criteria)
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 4);
        let scores: Vec<u32> = page
            .products
            .iter()
            .map(|p| p.location_score.unwrap().score)
            .collect();
        assert_eq!(scores, vec![100, 100, 10, 10]);
        assert!(page.products[..2]
            .iter()
            .all(|p| p.candidate.dealer.province.as_deref() == Some("Basra")));
    }

    #[tokio::test]
    async fn test_total_independent_of_sort() {
        let svc = service();
        let ctx = RequestContext::new();
        let mut totals = Vec::new();
        for sort in [SortMode::Location, SortMode::Price, SortMode::Rating, SortMode::Newest] {
            let criteria = SearchCriteria::new().with_sort(sort).with_pagination(1, 1);
            let page = svc.search(&ctx, &criteria).await.unwrap();
            assert_eq!(page.products.len(), 1);
            totals.push(page.pagination.total);
        }
        assert!(totals.iter().all(|t| *t == 4));
    }

    #[tokio::test]
    async fn test_identical_inputs_identical_output() {
        let svc = service();
        let criteria = SearchCriteria::new().with_requester("Baghdad", "Al-Karrada");
        let a = svc.search(&RequestContext::new(), &criteria).await.unwrap();
        let b = svc.search(&RequestContext::new(), &criteria).await.unwrap();
        assert_eq!(a.products, b.products);
        assert_eq!(a.pagination, b.pagination);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let svc = SearchService::new(FailingStore);
        let err = svc
            .search(&RequestContext::new(), &SearchCriteria::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::DatabaseError(_)));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_timeout() {
        let svc = SearchService::new(SlowStore).with_timeout(Duration::from_millis(20));
        let err = svc
            .search(&RequestContext::new(), &SearchCriteria::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::Timeout(_)));
    }
}
