use async_trait::async_trait;
use chart_model::{PricePoint, SymbolOption};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::client::MarketDataClient;
use crate::config::FmpConfig;
use crate::error::FmpError;

pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SymbolJSON {
    symbol: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileJSON {
    symbol: String,
    #[serde(default)]
    company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HistoryJSON {
    #[serde(default)]
    historical: Option<Vec<DailyBarJSON>>,
}

#[derive(Debug, Deserialize)]
struct DailyBarJSON {
    date: String,
    #[serde(default)]
    close: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorJSON {
    #[serde(rename = "Error Message")]
    error_message: String,
}

/// Financial Modeling Prep client.
#[derive(Clone)]
pub struct FmpAPI {
    config: FmpConfig,
    client: reqwest::Client,
}

impl FmpAPI {
    pub fn new(config: FmpConfig) -> Self {
        return FmpAPI {
            config,
            client: reqwest::Client::new(),
        };
    }

    /// Bulk list of every tradable symbol. Large; the dashboard searches instead.
    pub async fn fetch_tradable_symbols(&self) -> Result<Vec<SymbolOption>, FmpError> {
        let symbols: Vec<SymbolJSON> = self.get_json("/available-traded/list", &[]).await?;
        debug!("fetch_tradable_symbols | count: {}", symbols.len());
        Ok(symbols.into_iter().map(to_option).collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FmpError> {
        let url = format!("{}{}", self.config.base_url(), path);

        debug!("get_json | path: {} | params: {:?}", path, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.config.api_key())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FmpError::Status { status });
        }

        let body = response.text().await?;
        if let Ok(rejection) = serde_json::from_str::<ErrorJSON>(&body) {
            return Err(FmpError::Upstream {
                message: rejection.error_message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MarketDataClient for FmpAPI {
    async fn search_symbols(&self, query: &str) -> Result<Vec<SymbolOption>, FmpError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = SEARCH_LIMIT.to_string();
        let found: Vec<SymbolJSON> = self
            .get_json("/search", &[("query", query), ("limit", limit.as_str())])
            .await?;

        Ok(found.into_iter().take(SEARCH_LIMIT).map(to_option).collect())
    }

    async fn fetch_stock_profile(&self, symbol: &str) -> Result<Option<SymbolOption>, FmpError> {
        let profiles: Vec<ProfileJSON> =
            self.get_json(&format!("/profile/{}", symbol), &[]).await?;

        Ok(profiles.into_iter().next().map(|profile| {
            SymbolOption::from_name(&profile.symbol, profile.company_name.as_deref())
        }))
    }

    async fn fetch_stock_data(&self, symbol: &str) -> Result<Vec<PricePoint>, FmpError> {
        let history: HistoryJSON = self
            .get_json(&format!("/historical-price-full/{}", symbol), &[])
            .await
            .map_err(|e| FmpError::data_fetch(symbol, e))?;

        let Some(bars) = history.historical else {
            debug!("fetch_stock_data | no history | symbol: {}", symbol);
            return Ok(Vec::new());
        };

        Ok(normalize_history(symbol, bars))
    }
}

fn to_option(raw: SymbolJSON) -> SymbolOption {
    SymbolOption::from_name(&raw.symbol, raw.name.as_deref())
}

/// Upstream lists newest first; the chart wants oldest first.
fn normalize_history(symbol: &str, bars: Vec<DailyBarJSON>) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = bars
        .into_iter()
        .filter_map(|bar| {
            let (Some(date), Some(close)) = (parse_date(&bar.date), bar.close) else {
                warn!(
                    "fetch_stock_data | skipping bar | symbol: {} | date: {}",
                    symbol, bar.date
                );
                return None;
            };
            Some(PricePoint::on_date(date, close))
        })
        .collect();

    points.reverse();
    points.sort_by_key(|point| point.timestamp_millis);
    points
}

// "2024-01-02" or "2024-01-02 00:00:00"
fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}
