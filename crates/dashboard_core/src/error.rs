use fmp_api::FmpError;
use thiserror::Error;

/// Why the chart could not show a series. The display string is what the
/// error banner shows.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not load default stock data.")]
    DefaultUnavailable,

    #[error("No historical data found for this stock.")]
    NoHistoricalData,

    #[error(transparent)]
    Fetch(#[from] FmpError),
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown stale response policy: {0} (expected `latest` or `last-resolved`)")]
pub struct PolicyParseError(pub String);
