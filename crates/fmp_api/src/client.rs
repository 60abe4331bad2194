use async_trait::async_trait;
use chart_model::{PricePoint, SymbolOption};

use crate::error::FmpError;

/// The three read-only queries the dashboard needs from a market-data source.
///
/// Every call is a single best-effort round trip: no retries, no caching.
/// Errors are always returned to the caller, which decides whether to degrade.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Up to ten matches for `query`. A blank query resolves to an empty list
    /// without touching the network.
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolOption>, FmpError>;

    /// Company profile, or `None` when the upstream has no record.
    async fn fetch_stock_profile(&self, symbol: &str) -> Result<Option<SymbolOption>, FmpError>;

    /// Daily closes in ascending timestamp order. Failures are reported as
    /// [`FmpError::DataFetch`].
    async fn fetch_stock_data(&self, symbol: &str) -> Result<Vec<PricePoint>, FmpError>;
}
