use std::collections::BTreeSet;

use super::model::ReitDataset;

// ---------------------------------------------------------------------------
// Selection: which tickers the user picked
// ---------------------------------------------------------------------------

/// Reasons a ticker selection is refused before filtering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please select at least one REIT ticker.")]
    Empty,

    #[error("Unknown ticker '{0}'.")]
    UnknownTicker(String),
}

/// A non-empty set of tickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    tickers: BTreeSet<String>,
}

impl Selection {
    /// Accept any non-empty set of tickers.
    pub fn new<I, S>(tickers: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tickers: BTreeSet<String> = tickers.into_iter().map(Into::into).collect();
        if tickers.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Selection { tickers })
    }

    /// Like [`Selection::new`], but every ticker must occur in `dataset`.
    pub fn for_dataset<I, S>(dataset: &ReitDataset, tickers: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selection = Self::new(tickers)?;
        let known = dataset.tickers();
        if let Some(unknown) = selection
            .tickers
            .iter()
            .find(|t| !known.contains(&t.as_str()))
        {
            return Err(SelectionError::UnknownTicker(unknown.clone()));
        }
        Ok(selection)
    }

    /// Every distinct ticker of the dataset.
    pub fn all(dataset: &ReitDataset) -> Result<Self, SelectionError> {
        Self::new(dataset.tickers())
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.contains(ticker)
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Project `dataset` onto the rows whose ticker is selected.
///
/// Row order and header are preserved; the input is never modified.
pub fn filter(dataset: &ReitDataset, selection: &Selection) -> ReitDataset {
    let records = dataset
        .records
        .iter()
        .filter(|r| selection.contains(&r.ticker))
        .cloned()
        .collect();
    ReitDataset::new(dataset.columns.clone(), records)
}
