//! Catalog lookup: the TMDB client behind the movie search

mod client;
mod error;

pub use client::{PosterSize, TmdbClient, TrendingWindow, DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};
pub use error::LookupError;

use async_trait::async_trait;
use reel_core::CatalogItem;
use tokio_util::sync::CancellationToken;

/// Capability consumed by the search pipeline.
///
/// Implementations must honor cooperative cancellation: once `cancel` fires
/// the call returns `LookupError::Cancelled` instead of a late result, and
/// releases whatever the underlying request holds.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn search(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<CatalogItem>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Lookup whose backend never answers, so only cancellation can end it
    struct HangingLookup;

    #[async_trait]
    impl CatalogLookup for HangingLookup {
        async fn search(
            &self,
            _query: &str,
            cancel: CancellationToken,
        ) -> Result<Vec<CatalogItem>, LookupError> {
            tokio::select! {
                _ = cancel.cancelled() => Err(LookupError::Cancelled),
                _ = std::future::pending::<()>() => unreachable!(),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_unblocks_hung_lookup() {
        let cancel = CancellationToken::new();
        let task = {
            let cancel = cancel.clone();
            tokio::spawn(async move { HangingLookup.search("matrix", cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel.cancel();

        let result = task.await.unwrap();
        assert!(result.unwrap_err().is_cancelled());
    }
}
