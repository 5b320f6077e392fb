//! Chart models: everything the dashboard draws, computed from a filtered
//! view without touching egui. The `ui::charts` module turns these into plots.

use serde::Serialize;

use crate::data::model::{Record, ReitDataset, BETA, DIVIDEND_YIELD, MARKET_CAP};

// ---------------------------------------------------------------------------
// Industry breakdown (pie chart)
// ---------------------------------------------------------------------------

/// Angle of the first wedge, counter-clockwise from the positive x axis.
pub const PIE_START_ANGLE_DEG: f64 = 140.0;

/// Every record of the view lacks an industry, so there is nothing to break down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No industry data to display.")]
pub struct NoIndustryData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub industry: String,
    pub count: usize,
    /// Share of the records that have an industry, 0..=100.
    pub percent: f64,
}

impl PieSlice {
    /// Percentage rendered to one decimal place, e.g. `42.9%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    pub fn sweep_deg(&self) -> f64 {
        self.percent * 3.6
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryBreakdown {
    /// Slices by descending count; ties keep first-appearance order.
    pub slices: Vec<PieSlice>,
    /// Records with a non-null industry.
    pub total: usize,
}

impl IndustryBreakdown {
    /// `(start, sweep)` in degrees for each slice, walking counter-clockwise
    /// from [`PIE_START_ANGLE_DEG`].
    pub fn wedge_angles(&self) -> Vec<(f64, f64)> {
        let mut start = PIE_START_ANGLE_DEG;
        self.slices
            .iter()
            .map(|s| {
                let sweep = s.sweep_deg();
                let wedge = (start, sweep);
                start += sweep;
                wedge
            })
            .collect()
    }
}

/// Count records per industry.
pub fn industry_breakdown(view: &ReitDataset) -> Result<IndustryBreakdown, NoIndustryData> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for industry in view.records.iter().filter_map(|r| r.industry.as_deref()) {
        match counts.iter_mut().find(|(name, _)| *name == industry) {
            Some((_, n)) => *n += 1,
            None => counts.push((industry, 1)),
        }
    }

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Err(NoIndustryData);
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let slices = counts
        .into_iter()
        .map(|(industry, count)| PieSlice {
            industry: industry.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect();

    Ok(IndustryBreakdown { slices, total })
}

/// Closed outline of a pie wedge centred at the origin, for polygon plotting.
pub fn wedge_outline(radius: f64, start_deg: f64, sweep_deg: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep_deg / 2.0).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = (start_deg + sweep_deg * i as f64 / steps as f64).to_radians();
        points.push([radius * angle.cos(), radius * angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Grouped bar charts
// ---------------------------------------------------------------------------

/// Numeric column plotted by a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
    MarketCap,
    DividendYield,
    Beta,
}

impl Metric {
    pub fn column(self) -> &'static str {
        match self {
            Metric::MarketCap => MARKET_CAP,
            Metric::DividendYield => DIVIDEND_YIELD,
            Metric::Beta => BETA,
        }
    }

    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Metric::MarketCap => record.market_cap,
            Metric::DividendYield => record.dividend_yield,
            Metric::Beta => record.beta,
        }
    }
}

/// When the industry legend is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPolicy {
    /// Only when the view holds two or more distinct industries.
    Auto,
    Always,
    Never,
}

impl LegendPolicy {
    pub fn shows_legend(self, distinct_industries: usize) -> bool {
        match self {
            LegendPolicy::Auto => distinct_industries > 1,
            LegendPolicy::Always => distinct_industries > 0,
            LegendPolicy::Never => false,
        }
    }
}

/// Configuration of one bar chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarChartSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub metric: Metric,
    pub y_label: &'static str,
    pub legend: LegendPolicy,
}

/// The three metric charts, in dashboard order.
pub const BAR_CHARTS: [BarChartSpec; 3] = [
    BarChartSpec {
        id: "market_cap_chart",
        title: "Market Cap Comparison",
        metric: Metric::MarketCap,
        y_label: "Market Cap ($)",
        legend: LegendPolicy::Auto,
    },
    BarChartSpec {
        id: "dividend_yield_chart",
        title: "Dividend Yield Comparison",
        metric: Metric::DividendYield,
        y_label: "Dividend Yield (%)",
        legend: LegendPolicy::Auto,
    },
    BarChartSpec {
        id: "beta_chart",
        title: "Beta Comparison",
        metric: Metric::Beta,
        y_label: "Beta",
        legend: LegendPolicy::Auto,
    },
];

/// Total width of the bars sharing one ticker slot.
const GROUP_WIDTH: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub ticker: String,
    /// Bar centre on the x axis; ticker `i` sits around `i`.
    pub x: f64,
    pub value: f64,
}

/// All bars of one industry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub industry: Option<String>,
    pub bars: Vec<BarPoint>,
}

impl BarSeries {
    pub fn label(&self) -> &str {
        self.industry.as_deref().unwrap_or("(no industry)")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartModel {
    /// X categories: distinct tickers in view order.
    pub tickers: Vec<String>,
    /// One series per distinct industry, in view order.
    pub series: Vec<BarSeries>,
    pub bar_width: f64,
    pub show_legend: bool,
}

/// Lay out the bars of `metric` for a view.
///
/// Each bar is the mean of the metric over the rows sharing a ticker and an
/// industry; rows without a value are skipped and an empty bar is omitted.
/// Bars are dodged within a ticker slot only when some ticker spans more
/// than one industry.
pub fn bar_chart_model(view: &ReitDataset, metric: Metric, legend: LegendPolicy) -> BarChartModel {
    let tickers = view.tickers();
    let industries = view.industries();

    let dodge = tickers.iter().any(|t| {
        let mut first = None;
        view.records.iter().filter(|r| r.ticker == *t).any(|r| {
            let industry = r.industry.as_deref();
            *first.get_or_insert(industry) != industry
        })
    });

    let slots = if dodge { industries.len() } else { 1 };
    let bar_width = GROUP_WIDTH / slots as f64;

    let series = industries
        .iter()
        .enumerate()
        .map(|(h, industry)| {
            let offset = if dodge {
                -GROUP_WIDTH / 2.0 + bar_width * (h as f64 + 0.5)
            } else {
                0.0
            };
            let bars = tickers
                .iter()
                .enumerate()
                .filter_map(|(c, ticker)| {
                    let values: Vec<f64> = view
                        .records
                        .iter()
                        .filter(|r| r.ticker == *ticker && r.industry.as_deref() == *industry)
                        .filter_map(|r| metric.value(r))
                        .collect();
                    if values.is_empty() {
                        return None;
                    }
                    Some(BarPoint {
                        ticker: ticker.to_string(),
                        x: c as f64 + offset,
                        value: values.iter().sum::<f64>() / values.len() as f64,
                    })
                })
                .collect();
            BarSeries {
                industry: industry.map(str::to_string),
                bars,
            }
        })
        .collect();

    BarChartModel {
        tickers: tickers.into_iter().map(str::to_string).collect(),
        series,
        bar_width,
        show_legend: legend.shows_legend(industries.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(ticker: &str, industry: Option<&str>, cap: Option<f64>) -> Record {
        Record::new(ticker, industry, cap, Some(2.0), Some(1.0))
    }

    #[test]
    fn breakdown_orders_by_count_then_appearance() {
        let view = ReitDataset::from_records(vec![
            rec("A", Some("Office"), None),
            rec("B", Some("Retail"), None),
            rec("C", Some("Retail"), None),
            rec("D", Some("Data Center"), None),
            rec("E", None, None),
        ]);
        let b = industry_breakdown(&view).unwrap();
        let names: Vec<_> = b.slices.iter().map(|s| s.industry.as_str()).collect();
        assert_eq!(names, vec!["Retail", "Office", "Data Center"]);
        assert_eq!(b.total, 4);
        assert_eq!(b.slices[0].percent_label(), "50.0%");
        assert_eq!(b.slices[1].percent_label(), "25.0%");
    }

    #[test]
    fn breakdown_percentages_sum_to_one_hundred() {
        let industries = ["Retail", "Office", "Office", "Residential", "Retail", "Retail", "Health"];
        let view = ReitDataset::from_records(
            industries
                .iter()
                .enumerate()
                .map(|(i, ind)| rec(&format!("T{i}"), Some(*ind), None))
                .collect(),
        );
        let b = industry_breakdown(&view).unwrap();
        let exact: f64 = b.slices.iter().map(|s| s.percent).sum();
        assert!((exact - 100.0).abs() < 1e-9);

        let rounded: f64 = b
            .slices
            .iter()
            .map(|s| s.percent_label().trim_end_matches('%').parse::<f64>().unwrap())
            .sum();
        assert!((rounded - 100.0).abs() <= 0.05 * b.slices.len() as f64);

        let sweep: f64 = b.wedge_angles().iter().map(|(_, s)| s).sum();
        assert!((sweep - 360.0).abs() < 1e-9);
        assert_eq!(b.wedge_angles()[0].0, PIE_START_ANGLE_DEG);
    }

    #[test]
    fn all_null_industries_yield_a_warning() {
        let view = ReitDataset::from_records(vec![rec("A", None, None), rec("B", None, None)]);
        assert_eq!(industry_breakdown(&view), Err(NoIndustryData));
        assert_eq!(NoIndustryData.to_string(), "No industry data to display.");
    }

    #[test]
    fn wedge_outline_starts_at_centre_and_follows_the_arc() {
        let pts = wedge_outline(1.0, 0.0, 90.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        let first = pts[1];
        let last = pts[pts.len() - 1];
        assert!((first[0] - 1.0).abs() < 1e-9 && first[1].abs() < 1e-9);
        assert!(last[0].abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn one_bar_per_ticker_without_legend_for_single_industry() {
        let view = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), Some(100.0)),
            rec("BBB", Some("Retail"), Some(200.0)),
        ]);
        let m = bar_chart_model(&view, Metric::MarketCap, LegendPolicy::Auto);
        assert_eq!(m.tickers, vec!["AAA", "BBB"]);
        assert_eq!(m.series.len(), 1);
        assert!(!m.show_legend);
        let xs: Vec<f64> = m.series[0].bars.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0.0, 1.0]);
        assert_eq!(m.bar_width, GROUP_WIDTH);
    }

    #[test]
    fn legend_iff_two_or_more_industries() {
        let two = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), Some(1.0)),
            rec("BBB", Some("Office"), Some(2.0)),
        ]);
        assert!(bar_chart_model(&two, Metric::Beta, LegendPolicy::Auto).show_legend);
        assert!(!bar_chart_model(&two, Metric::Beta, LegendPolicy::Never).show_legend);

        let with_null = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), Some(1.0)),
            rec("BBB", None, Some(2.0)),
        ]);
        assert!(bar_chart_model(&with_null, Metric::Beta, LegendPolicy::Auto).show_legend);

        let one = ReitDataset::from_records(vec![rec("AAA", Some("Retail"), Some(1.0))]);
        assert!(!bar_chart_model(&one, Metric::Beta, LegendPolicy::Auto).show_legend);
        assert!(bar_chart_model(&one, Metric::Beta, LegendPolicy::Always).show_legend);
    }

    #[test]
    fn separate_industries_are_not_dodged() {
        let view = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), Some(1.0)),
            rec("BBB", Some("Office"), Some(2.0)),
        ]);
        let m = bar_chart_model(&view, Metric::MarketCap, LegendPolicy::Auto);
        assert_eq!(m.series[0].bars[0].x, 0.0);
        assert_eq!(m.series[1].bars[0].x, 1.0);
        assert!(m.series[0].bars.iter().all(|b| b.ticker == "AAA"));
    }

    #[test]
    fn shared_ticker_dodges_and_averages() {
        let view = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), Some(100.0)),
            rec("AAA", Some("Office"), Some(50.0)),
            rec("AAA", Some("Retail"), Some(200.0)),
        ]);
        let m = bar_chart_model(&view, Metric::MarketCap, LegendPolicy::Auto);
        assert_eq!(m.bar_width, 0.4);
        let retail = &m.series[0].bars[0];
        let office = &m.series[1].bars[0];
        assert_eq!(retail.value, 150.0);
        assert_eq!(office.value, 50.0);
        assert!((retail.x + 0.2).abs() < 1e-9);
        assert!((office.x - 0.2).abs() < 1e-9);
    }

    #[test]
    fn missing_metric_values_omit_the_bar() {
        let view = ReitDataset::from_records(vec![
            rec("AAA", Some("Retail"), None),
            rec("BBB", Some("Retail"), Some(3.0)),
        ]);
        let m = bar_chart_model(&view, Metric::MarketCap, LegendPolicy::Auto);
        assert_eq!(m.tickers.len(), 2);
        assert_eq!(m.series[0].bars.len(), 1);
        assert_eq!(m.series[0].bars[0].ticker, "BBB");
    }

    #[test]
    fn metric_reads_its_column() {
        let r = Record::new("AAA", None, Some(1.0), Some(2.0), Some(3.0));
        assert_eq!(Metric::MarketCap.value(&r), Some(1.0));
        assert_eq!(Metric::DividendYield.value(&r), Some(2.0));
        assert_eq!(Metric::Beta.value(&r), Some(3.0));
        assert_eq!(Metric::DividendYield.column(), "Dividend Yield");
    }
}
