use std::env;
use std::error::Error;
use std::time::Duration;

use dashboard_core::DashboardSettings;
use dotenvy::dotenv;
use fmp_api::FmpConfig;

use crate::utils;

const DEFAULT_BIND: &str = "0.0.0.0:8080";

pub struct Config {
    pub workers: usize,
    pub bind: String,
    pub fmp: FmpConfig,
    pub dashboard: DashboardSettings,
}

impl Config {
    pub fn new() -> Result<Config, Box<dyn Error>> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Box<dyn Error>> {
        let mut fmp = FmpConfig::new(lookup("FMP_API_KEY").unwrap_or_default())?;
        if let Some(base_url) = lookup("FMP_BASE_URL") {
            fmp = fmp.with_base_url(base_url)?;
        }

        let mut workers: usize = match lookup("DASHBOARD_WORKERS") {
            Some(workers) => workers.trim().parse()?,
            None => 1,
        };
        if workers == 0 {
            workers = 1;
        }

        let mut bind = lookup("DASHBOARD_BIND").unwrap_or_default();
        if bind.trim().is_empty() {
            bind = DEFAULT_BIND.to_string();
        }

        let mut dashboard = DashboardSettings::default();
        if let Some(symbol) = lookup("DASHBOARD_DEFAULT_SYMBOL") {
            let symbol = utils::sanitize_ticker(symbol);
            if !symbol.is_empty() {
                dashboard.default_symbol = symbol;
            }
        }
        if let Some(millis) = lookup("DASHBOARD_DEBOUNCE_MS") {
            dashboard.debounce = Duration::from_millis(millis.trim().parse()?);
        }
        if let Some(policy) = lookup("DASHBOARD_STALE_RESPONSES") {
            dashboard.stale_responses = policy.parse()?;
        }

        Ok(Config {
            workers,
            bind,
            fmp,
            dashboard,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::StaleResponsePolicy;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Box<dyn Error>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn api_key_is_required() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("FMP_API_KEY", " ")]).is_err());
    }

    #[test]
    fn defaults() {
        let config = config_from(&[("FMP_API_KEY", "demo")]).unwrap();
        assert_eq!(config.workers, 1);
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.fmp.api_key(), "demo");
        assert_eq!(config.fmp.base_url(), fmp_api::config::FMP_BASE_API_URL);
        assert_eq!(config.dashboard, DashboardSettings::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("FMP_API_KEY", "demo"),
            ("FMP_BASE_URL", "http://localhost:9000/"),
            ("DASHBOARD_WORKERS", "0"),
            ("DASHBOARD_BIND", "127.0.0.1:3000"),
            ("DASHBOARD_DEFAULT_SYMBOL", "msft"),
            ("DASHBOARD_DEBOUNCE_MS", "250"),
            ("DASHBOARD_STALE_RESPONSES", "last-resolved"),
        ])
        .unwrap();

        assert_eq!(config.workers, 1);
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.fmp.base_url(), "http://localhost:9000");
        assert_eq!(config.dashboard.default_symbol, "MSFT");
        assert_eq!(config.dashboard.debounce, Duration::from_millis(250));
        assert_eq!(
            config.dashboard.stale_responses,
            StaleResponsePolicy::LastResolvedWins
        );
    }

    #[test]
    fn rejects_bad_numbers_and_policies() {
        assert!(config_from(&[("FMP_API_KEY", "demo"), ("DASHBOARD_WORKERS", "many")]).is_err());
        assert!(
            config_from(&[("FMP_API_KEY", "demo"), ("DASHBOARD_STALE_RESPONSES", "newest")])
                .is_err()
        );
    }
}
