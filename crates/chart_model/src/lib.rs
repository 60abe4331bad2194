use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A tradable security as offered to the search box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolOption {
    pub symbol: String,
    pub label: String,
}

impl SymbolOption {
    pub fn new(symbol: impl Into<String>, label: impl Into<String>) -> Self {
        SymbolOption {
            symbol: symbol.into(),
            label: label.into(),
        }
    }

    /// Builds the display label `"{name} ({symbol})"`, falling back to the bare
    /// symbol when the upstream record carries no name.
    pub fn from_name(symbol: &str, name: Option<&str>) -> Self {
        let label = match name.map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} ({})", name, symbol),
            _ => symbol.to_string(),
        };
        SymbolOption::new(symbol, label)
    }
}

/// One daily close. Serialized as `[timestampMillis, close]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct PricePoint {
    pub timestamp_millis: i64,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp_millis: i64, close: f64) -> Self {
        PricePoint {
            timestamp_millis,
            close,
        }
    }

    /// Point at UTC midnight of `date`.
    pub fn on_date(date: NaiveDate, close: f64) -> Self {
        let timestamp_millis = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        PricePoint::new(timestamp_millis, close)
    }
}

impl From<(i64, f64)> for PricePoint {
    fn from((timestamp_millis, close): (i64, f64)) -> Self {
        PricePoint::new(timestamp_millis, close)
    }
}

impl From<PricePoint> for (i64, f64) {
    fn from(point: PricePoint) -> Self {
        (point.timestamp_millis, point.close)
    }
}

/// Everything the chart renders. Replaces the chart content as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesState {
    pub title_label: String,
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl SeriesState {
    pub fn new(option: &SymbolOption, points: Vec<PricePoint>) -> Self {
        SeriesState {
            title_label: option.label.clone(),
            symbol: option.symbol.clone(),
            points,
        }
    }

    pub fn title(&self) -> String {
        format!("{} Price History", self.title_label)
    }

    pub fn is_ascending(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].timestamp_millis <= pair[1].timestamp_millis)
    }
}

/// Chart loader state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ChartPhase {
    #[default]
    Idle,
    Loading,
    Loaded(SeriesState),
    Failed(String),
}

impl ChartPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, ChartPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ChartPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn series(&self) -> Option<&SeriesState> {
        match self {
            ChartPhase::Loaded(series) => Some(series),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChartPhase::Idle => "idle",
            ChartPhase::Loading => "loading",
            ChartPhase::Loaded(_) => "loaded",
            ChartPhase::Failed(_) => "failed",
        }
    }
}

/// Transient UI flags, rebuilt on every interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadState {
    pub searching: bool,
    pub chart_loading: bool,
    pub error: Option<String>,
}

/// Snapshot consumed by the presentation shell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub options: Vec<SymbolOption>,
    pub selection: Option<SymbolOption>,
    #[serde(flatten)]
    pub load_state: LoadState,
    pub chart_series: Option<SeriesState>,
}
