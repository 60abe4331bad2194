pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::FmpAPI;
pub use client::MarketDataClient;
pub use config::FmpConfig;
pub use error::{ConfigError, FmpError};
