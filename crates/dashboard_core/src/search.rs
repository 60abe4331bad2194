use std::sync::{Arc, Mutex};
use std::time::Duration;

use chart_model::SymbolOption;
use fmp_api::MarketDataClient;
use log::{debug, warn};

use crate::debounce::DebounceTimer;
use crate::generation::{GenerationCounter, StaleResponsePolicy};
use crate::lock;

#[derive(Debug, Default)]
struct SearchState {
    searching: bool,
    options: Vec<SymbolOption>,
    generation: GenerationCounter,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub options: Vec<SymbolOption>,
    pub searching: bool,
}

/// Turns keystrokes into at most one symbol search per quiet period.
///
/// A failed search is not an error for the user: the option list is emptied
/// and the failure is logged.
pub struct SearchController {
    client: Arc<dyn MarketDataClient>,
    state: Arc<Mutex<SearchState>>,
    timer: Mutex<DebounceTimer>,
    policy: StaleResponsePolicy,
}

impl SearchController {
    pub fn new(
        client: Arc<dyn MarketDataClient>,
        debounce: Duration,
        policy: StaleResponsePolicy,
    ) -> Self {
        SearchController {
            client,
            state: Arc::new(Mutex::new(SearchState::default())),
            timer: Mutex::new(DebounceTimer::new(debounce)),
            policy,
        }
    }

    pub fn on_input_changed(&self, text: &str) {
        let issued = {
            let mut state = lock(&self.state);
            state.searching = true;
            state.generation.advance()
        };

        let text = text.to_string();
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let policy = self.policy;

        let search = async move {
            let options = if text.is_empty() {
                Vec::new()
            } else {
                match client.search_symbols(&text).await {
                    Ok(options) => options,
                    Err(e) => {
                        warn!("on_input_changed | search failed | query: {} | {}", text, e);
                        Vec::new()
                    }
                }
            };

            let mut state = lock(&state);
            if !policy.admits(&state.generation, issued) {
                debug!("on_input_changed | stale result dropped | query: {}", text);
                return;
            }
            state.options = options;
            state.searching = false;
        };

        lock(&self.timer).schedule(search);
    }

    /// Keeps a picked option at the head of the list so the bound value stays
    /// one of the offered options.
    pub fn remember(&self, option: SymbolOption) {
        let mut state = lock(&self.state);
        state.options.retain(|known| known.symbol != option.symbol);
        state.options.insert(0, option);
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let state = lock(&self.state);
        SearchSnapshot {
            options: state.options.clone(),
            searching: state.searching,
        }
    }
}
