use crate::error::ConfigError;

pub const FMP_BASE_API_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Connection settings handed to [`crate::FmpAPI`] at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FmpConfig {
    api_key: String,
    base_url: String,
}

impl FmpConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(FmpConfig {
            api_key,
            base_url: FMP_BASE_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        self.base_url = base_url;
        Ok(self)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
