use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_URL: &str = "http://localhost:8080/healthcheck";
const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
enum HealthcheckError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("dashboard answered HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("dashboard reported status {0:?}")]
    NotOk(String),
}

#[derive(Debug, Deserialize)]
struct HealthcheckJSON {
    status: String,
    #[serde(default)]
    chart: Option<String>,
}

fn check(body: HealthcheckJSON) -> Result<HealthcheckJSON, HealthcheckError> {
    if body.status != "ok" {
        return Err(HealthcheckError::NotOk(body.status));
    }
    Ok(body)
}

fn main() -> Result<(), HealthcheckError> {
    let url = std::env::var("DASHBOARD_HEALTHCHECK_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

    let client = reqwest::blocking::Client::builder().timeout(TIMEOUT).build()?;
    let res = client.get(&url).send()?;
    if !res.status().is_success() {
        return Err(HealthcheckError::Status(res.status()));
    }

    let body = check(res.json::<HealthcheckJSON>()?)?;
    if let Some(chart) = body.chart {
        println!("ok (chart: {})", chart);
    }
    Ok(())
}
