use std::collections::BTreeSet;
use std::sync::Arc;

use crate::dashboard::{build_frame, DashboardFrame};
use crate::data::cache::DatasetCache;
use crate::data::filter::{Selection, SelectionError};
use crate::data::model::ReitDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, shared for the session.
    pub dataset: Option<Arc<ReitDataset>>,

    /// Fatal load error; nothing else is shown when set.
    pub load_error: Option<String>,

    /// Picker rows: every ticker of the dataset with its industry.
    pub tickers: Vec<(String, Option<String>)>,

    /// Tickers ticked in the picker.
    pub selected: BTreeSet<String>,

    /// Frame for the current selection, rebuilt whenever it changes.
    pub frame: Result<DashboardFrame, SelectionError>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            load_error: None,
            tickers: Vec::new(),
            selected: BTreeSet::new(),
            frame: Err(SelectionError::Empty),
            status_message: None,
        }
    }
}

impl AppState {
    /// Start a session: load through the cache and select `initial` tickers
    /// (all of them when empty).
    pub fn open(cache: &mut DatasetCache, initial: &[String]) -> Self {
        let mut state = Self::default();
        match cache.dataset() {
            Ok(dataset) => {
                state.set_dataset(Arc::clone(&dataset));
                if !initial.is_empty() {
                    match Selection::for_dataset(&dataset, initial.iter().cloned()) {
                        Ok(_) => {
                            state.selected = initial.iter().cloned().collect();
                            state.refilter();
                        }
                        Err(e) => {
                            log::warn!("Ignoring initial selection: {e}");
                            state.status_message = Some(e.to_string());
                        }
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", cache.path().display());
                state.load_error = Some(format!(
                    "Could not load {}: {e}",
                    cache.path().display()
                ));
            }
        }
        state
    }

    /// Ingest the session dataset and select every ticker.
    pub fn set_dataset(&mut self, dataset: Arc<ReitDataset>) {
        self.tickers = dataset
            .ticker_industries()
            .into_iter()
            .map(|(t, i)| (t.to_string(), i.map(str::to_string)))
            .collect();
        self.selected = self.tickers.iter().map(|(t, _)| t.clone()).collect();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.refilter();
    }

    /// Recompute the frame after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.frame = build_frame(ds, &self.selected);
            if let Err(warning) = &self.frame {
                log::warn!("{warning}");
            }
        }
    }

    /// Tick or untick one ticker.
    pub fn toggle_ticker(&mut self, ticker: &str) {
        if !self.selected.remove(ticker) {
            self.selected.insert(ticker.to_string());
        }
        self.refilter();
    }

    /// Select every ticker.
    pub fn select_all(&mut self) {
        self.selected = self.tickers.iter().map(|(t, _)| t.clone()).collect();
        self.refilter();
    }

    /// Deselect every ticker.
    pub fn select_none(&mut self) {
        self.selected.clear();
        self.refilter();
    }
}
