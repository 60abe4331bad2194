use std::sync::{Arc, Mutex};

use chart_model::{ChartPhase, SeriesState, SymbolOption};
use fmp_api::MarketDataClient;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::error::LoadError;
use crate::generation::{Generation, GenerationCounter, StaleResponsePolicy};
use crate::lock;

#[derive(Debug, Default)]
struct ChartState {
    phase: ChartPhase,
    selection: Option<SymbolOption>,
    generation: GenerationCounter,
}

/// Loads price history for whatever symbol is currently selected.
///
/// Loads are never cancelled. Each one is stamped when issued and, under
/// [`StaleResponsePolicy::LatestRequestWins`], only the newest may settle the
/// chart.
#[derive(Clone)]
pub struct ChartLoader {
    client: Arc<dyn MarketDataClient>,
    state: Arc<Mutex<ChartState>>,
    policy: StaleResponsePolicy,
}

impl ChartLoader {
    pub fn new(client: Arc<dyn MarketDataClient>, policy: StaleResponsePolicy) -> Self {
        ChartLoader {
            client,
            state: Arc::new(Mutex::new(ChartState::default())),
            policy,
        }
    }

    /// Startup load: profile and history are requested together, and on
    /// success the profile also becomes the selection.
    pub fn load_default(&self, symbol: &str) -> JoinHandle<()> {
        let issued = self.begin(None);
        let loader = self.clone();
        let symbol = symbol.to_string();

        tokio::spawn(async move {
            let (profile, history) = tokio::join!(
                loader.client.fetch_stock_profile(&symbol),
                loader.client.fetch_stock_data(&symbol)
            );

            let loaded = match (profile, history) {
                (Ok(Some(profile)), Ok(points)) if !points.is_empty() => {
                    Ok((SeriesState::new(&profile, points), profile))
                }
                (Ok(None), _) => {
                    warn!("load_default | no profile | symbol: {}", symbol);
                    Err(LoadError::DefaultUnavailable)
                }
                (Ok(Some(_)), Ok(_)) => {
                    warn!("load_default | empty history | symbol: {}", symbol);
                    Err(LoadError::DefaultUnavailable)
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!("load_default | {} | symbol: {}", e, symbol);
                    Err(LoadError::DefaultUnavailable)
                }
            };

            loader.settle(issued, |state| match loaded {
                Ok((series, profile)) => {
                    info!("load_default | loaded | symbol: {}", profile.symbol);
                    state.selection = Some(profile);
                    state.phase = ChartPhase::Loaded(series);
                }
                Err(e) => state.phase = ChartPhase::Failed(e.to_string()),
            });
        })
    }

    /// Reacts to the user picking (or clearing) a symbol. Returns the handle of
    /// the history load, if one was started.
    pub fn on_selection_changed(&self, selection: Option<SymbolOption>) -> Option<JoinHandle<()>> {
        let Some(option) = selection else {
            self.clear();
            return None;
        };

        let issued = self.begin(Some(option.clone()));
        let loader = self.clone();

        Some(tokio::spawn(async move {
            let loaded = match loader.client.fetch_stock_data(&option.symbol).await {
                Ok(points) if points.is_empty() => Err(LoadError::NoHistoricalData),
                Ok(points) => Ok(SeriesState::new(&option, points)),
                Err(e) => Err(LoadError::from(e)),
            };

            loader.settle(issued, |state| {
                state.phase = match loaded {
                    Ok(series) => ChartPhase::Loaded(series),
                    Err(e) => {
                        warn!("on_selection_changed | {} | symbol: {}", e, option.symbol);
                        ChartPhase::Failed(e.to_string())
                    }
                }
            });
        }))
    }

    pub fn phase(&self) -> ChartPhase {
        lock(&self.state).phase.clone()
    }

    pub fn selection(&self) -> Option<SymbolOption> {
        lock(&self.state).selection.clone()
    }

    fn begin(&self, selection: Option<SymbolOption>) -> Generation {
        let mut state = lock(&self.state);
        if selection.is_some() {
            state.selection = selection;
        }
        state.phase = ChartPhase::Loading;
        state.generation.advance()
    }

    fn clear(&self) {
        let mut state = lock(&self.state);
        state.generation.advance();
        state.selection = None;
        state.phase = ChartPhase::Idle;
    }

    fn settle(&self, issued: Generation, apply: impl FnOnce(&mut ChartState)) {
        let mut state = lock(&self.state);
        if !self.policy.admits(&state.generation, issued) {
            debug!("settle | stale load dropped | generation: {:?}", issued);
            return;
        }
        apply(&mut *state);
    }
}
