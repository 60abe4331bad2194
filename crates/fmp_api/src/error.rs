use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("FMP API key is missing or empty")]
    MissingApiKey,

    #[error("FMP base URL is empty")]
    MissingBaseUrl,
}

/// Failures of a single round trip to the market-data API.
#[derive(Error, Debug)]
pub enum FmpError {
    /// Transport failure: connect, TLS, timeout, truncated body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// Upstream answered 2xx but with an `{"Error Message": ...}` body,
    /// e.g. for an invalid API key.
    #[error("upstream rejected request: {message}")]
    Upstream { message: String },

    /// Body was not the JSON shape we expect.
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Historical price lookup failed. Never swallowed: the chart loader
    /// reports this message to the user.
    #[error("Error fetching data for {symbol}: {source}")]
    DataFetch {
        symbol: String,
        #[source]
        source: Box<FmpError>,
    },
}

impl FmpError {
    pub(crate) fn data_fetch(symbol: &str, source: FmpError) -> Self {
        FmpError::DataFetch {
            symbol: symbol.to_string(),
            source: Box::new(source),
        }
    }

    /// Symbol carried by a history fetch failure.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            FmpError::DataFetch { symbol, .. } => Some(symbol),
            _ => None,
        }
    }
}
