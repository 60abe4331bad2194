use std::sync::Arc;
use std::time::Duration;

use chart_model::{ChartPhase, DashboardView, LoadState, SymbolOption};
use fmp_api::MarketDataClient;
use log::info;
use tokio::task::JoinHandle;

use crate::chart::ChartLoader;
use crate::generation::StaleResponsePolicy;
use crate::search::SearchController;

pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub default_symbol: String,
    pub debounce: Duration,
    pub stale_responses: StaleResponsePolicy,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            default_symbol: DEFAULT_SYMBOL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

/// Search box plus chart, driven by the events a front end emits.
#[derive(Clone)]
pub struct Dashboard {
    search: Arc<SearchController>,
    chart: ChartLoader,
    default_symbol: String,
}

impl Dashboard {
    pub fn new(client: Arc<dyn MarketDataClient>, settings: DashboardSettings) -> Self {
        Dashboard {
            search: Arc::new(SearchController::new(
                Arc::clone(&client),
                settings.debounce,
                settings.stale_responses,
            )),
            chart: ChartLoader::new(client, settings.stale_responses),
            default_symbol: settings.default_symbol,
        }
    }

    pub fn start(&self) -> JoinHandle<()> {
        info!("start | default symbol: {}", self.default_symbol);
        self.chart.load_default(&self.default_symbol)
    }

    pub fn on_input_changed(&self, text: &str) {
        self.search.on_input_changed(text);
    }

    pub fn on_symbol_selected(&self, selection: Option<SymbolOption>) -> Option<JoinHandle<()>> {
        if let Some(option) = &selection {
            self.search.remember(option.clone());
        }
        self.chart.on_selection_changed(selection)
    }

    pub fn chart_phase(&self) -> ChartPhase {
        self.chart.phase()
    }

    pub fn view(&self) -> DashboardView {
        let search = self.search.snapshot();
        let phase = self.chart.phase();

        DashboardView {
            options: search.options,
            selection: self.chart.selection(),
            load_state: LoadState {
                searching: search.searching,
                chart_loading: phase.is_loading(),
                error: phase.error().map(str::to_string),
            },
            chart_series: phase.series().cloned(),
        }
    }
}
