//! One render cycle of the dashboard: filter the dataset for the current
//! ticker choice and compute every chart model from the result.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::chart::{
    bar_chart_model, industry_breakdown, BarChartModel, BarChartSpec, IndustryBreakdown,
    NoIndustryData, BAR_CHARTS,
};
use crate::color::ColorMap;
use crate::data::filter::{filter, Selection, SelectionError};
use crate::data::model::ReitDataset;

/// Everything drawn for one ticker selection.
#[derive(Debug, Clone)]
pub struct DashboardFrame {
    pub view: ReitDataset,
    pub breakdown: Result<IndustryBreakdown, NoIndustryData>,
    pub bar_charts: Vec<(BarChartSpec, BarChartModel)>,
    pub colors: ColorMap,
}

impl DashboardFrame {
    /// Non-blocking warnings raised while building the frame.
    pub fn warnings(&self) -> Vec<String> {
        match &self.breakdown {
            Ok(_) => Vec::new(),
            Err(e) => vec![e.to_string()],
        }
    }
}

/// Build the frame for `tickers`. An empty choice halts the cycle before any
/// output is produced; the error is the single warning to show.
pub fn build_frame(
    dataset: &ReitDataset,
    tickers: &BTreeSet<String>,
) -> Result<DashboardFrame, SelectionError> {
    let selection = Selection::new(tickers.iter().cloned())?;
    let view = filter(dataset, &selection);

    let breakdown = industry_breakdown(&view);
    if let Err(warning) = &breakdown {
        log::warn!("{warning}");
    }

    let bar_charts = BAR_CHARTS
        .iter()
        .map(|spec| (*spec, bar_chart_model(&view, spec.metric, spec.legend)))
        .collect();
    let colors = ColorMap::new(view.industries());

    Ok(DashboardFrame {
        view,
        breakdown,
        bar_charts,
        colors,
    })
}

// ---------------------------------------------------------------------------
// Serializable summary for headless runs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ChartSummary<'a> {
    pub title: &'a str,
    pub column: &'static str,
    pub y_label: &'a str,
    #[serde(flatten)]
    pub model: &'a BarChartModel,
}

#[derive(Debug, Serialize)]
pub struct FrameSummary<'a> {
    pub rows: usize,
    pub tickers: Vec<&'a str>,
    pub industry_breakdown: Option<&'a IndustryBreakdown>,
    pub charts: Vec<ChartSummary<'a>>,
    pub warnings: Vec<String>,
}

impl DashboardFrame {
    pub fn summary(&self) -> FrameSummary<'_> {
        FrameSummary {
            rows: self.view.len(),
            tickers: self.view.tickers(),
            industry_breakdown: self.breakdown.as_ref().ok(),
            charts: self
                .bar_charts
                .iter()
                .map(|(spec, model)| ChartSummary {
                    title: spec.title,
                    column: spec.metric.column(),
                    y_label: spec.y_label,
                    model,
                })
                .collect(),
            warnings: self.warnings(),
        }
    }
}
