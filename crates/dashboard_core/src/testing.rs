use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chart_model::{PricePoint, SymbolOption};
use fmp_api::{FmpError, MarketDataClient};

pub(crate) const DAY_MILLIS: i64 = 86_400_000;

/// Ascending daily closes starting at the epoch.
pub(crate) fn points(closes: &[f64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(day, close)| PricePoint::new(day as i64 * DAY_MILLIS, *close))
        .collect()
}

pub(crate) fn apple() -> SymbolOption {
    SymbolOption::new("AAPL", "Apple Inc. (AAPL)")
}

pub(crate) fn tesla() -> SymbolOption {
    SymbolOption::new("TSLA", "Tesla, Inc. (TSLA)")
}

/// In-memory market data keyed by query or symbol, with scripted latency
/// and failures. Every call that would hit the network is logged.
#[derive(Default)]
pub(crate) struct FakeClient {
    options: HashMap<String, Vec<SymbolOption>>,
    profiles: HashMap<String, SymbolOption>,
    histories: HashMap<String, Vec<PricePoint>>,
    failing: HashSet<String>,
    latency: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub(crate) fn new() -> Self {
        FakeClient::default()
    }

    pub(crate) fn with_search(mut self, query: &str, options: Vec<SymbolOption>) -> Self {
        self.options.insert(query.to_string(), options);
        self
    }

    pub(crate) fn with_stock(mut self, option: SymbolOption, history: Vec<PricePoint>) -> Self {
        self.histories.insert(option.symbol.clone(), history);
        self.profiles.insert(option.symbol.clone(), option);
        self
    }

    pub(crate) fn with_history(mut self, symbol: &str, history: Vec<PricePoint>) -> Self {
        self.histories.insert(symbol.to_string(), history);
        self
    }

    pub(crate) fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub(crate) fn with_latency(mut self, key: &str, latency: Duration) -> Self {
        self.latency.insert(key.to_string(), latency);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        crate::lock(&self.calls).clone()
    }

    async fn round_trip(&self, call: String, key: &str) -> Result<(), FmpError> {
        crate::lock(&self.calls).push(call);
        if let Some(latency) = self.latency.get(key) {
            tokio::time::sleep(*latency).await;
        }
        if self.failing.contains(key) {
            return Err(FmpError::Upstream {
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MarketDataClient for FakeClient {
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolOption>, FmpError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.round_trip(format!("search:{}", query), query).await?;
        Ok(self.options.get(query).cloned().unwrap_or_default())
    }

    async fn fetch_stock_profile(&self, symbol: &str) -> Result<Option<SymbolOption>, FmpError> {
        self.round_trip(format!("profile:{}", symbol), symbol).await?;
        Ok(self.profiles.get(symbol).cloned())
    }

    async fn fetch_stock_data(&self, symbol: &str) -> Result<Vec<PricePoint>, FmpError> {
        self.round_trip(format!("history:{}", symbol), symbol)
            .await
            .map_err(|source| FmpError::DataFetch {
                symbol: symbol.to_string(),
                source: Box::new(source),
            })?;
        Ok(self.histories.get(symbol).cloned().unwrap_or_default())
    }
}
