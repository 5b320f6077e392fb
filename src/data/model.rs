use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const TICKER: &str = "Ticker";
pub const INDUSTRY: &str = "Industry";
pub const MARKET_CAP: &str = "Market Cap";
pub const DIVIDEND_YIELD: &str = "Dividend Yield";
pub const BETA: &str = "Beta";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [TICKER, INDUSTRY, MARKET_CAP, DIVIDEND_YIELD, BETA];

/// Whether the column is kept as raw text instead of type-guessed.
pub fn is_text_column(name: &str) -> bool {
    name == TICKER || name == INDUSTRY
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in an unmodeled column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Guess the type of a raw text field. Empty fields are null.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_nan() {
                return CellValue::Null;
            }
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// Try to interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(CellValue::Null, CellValue::Float)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(v: Option<&str>) -> Self {
        v.map_or(CellValue::Null, |s| CellValue::Text(s.to_string()))
    }
}

/// Floats keep a fractional part (`2.0`, not `2`) so a written file parses back
/// to the same variant.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One REIT (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub ticker: String,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    /// Unmodeled columns, passed through unchanged: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    /// Build a record with no extra columns.
    pub fn new(
        ticker: &str,
        industry: Option<&str>,
        market_cap: Option<f64>,
        dividend_yield: Option<f64>,
        beta: Option<f64>,
    ) -> Self {
        Record {
            ticker: ticker.to_string(),
            industry: industry.map(str::to_string),
            market_cap,
            dividend_yield,
            beta,
            extra: BTreeMap::new(),
        }
    }

    /// The value of any column, required or extra.
    pub fn cell(&self, column: &str) -> CellValue {
        match column {
            TICKER => CellValue::Text(self.ticker.clone()),
            INDUSTRY => self.industry.as_deref().into(),
            MARKET_CAP => self.market_cap.into(),
            DIVIDEND_YIELD => self.dividend_yield.into(),
            BETA => self.beta.into(),
            other => self.extra.get(other).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// ReitDataset – a loaded table or a filtered view of one
// ---------------------------------------------------------------------------

/// An ordered table of REIT records with its header.
///
/// The same type backs both the full dataset and a filtered view, so every
/// downstream consumer works on either.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReitDataset {
    /// Column names in file order.
    pub columns: Vec<String>,
    /// All records (rows), in file order.
    pub records: Vec<Record>,
}

impl ReitDataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        ReitDataset { columns, records }
    }

    /// Build a table with just the required columns.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        ReitDataset { columns, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct tickers in order of first appearance.
    pub fn tickers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for r in &self.records {
            if !seen.contains(&r.ticker.as_str()) {
                seen.push(r.ticker.as_str());
            }
        }
        seen
    }

    /// Each distinct ticker with the industry of its first row.
    pub fn ticker_industries(&self) -> Vec<(&str, Option<&str>)> {
        let mut seen: Vec<(&str, Option<&str>)> = Vec::new();
        for r in &self.records {
            if !seen.iter().any(|(t, _)| *t == r.ticker) {
                seen.push((r.ticker.as_str(), r.industry.as_deref()));
            }
        }
        seen
    }

    /// Distinct industry values, null included, in order of first appearance.
    pub fn industries(&self) -> Vec<Option<&str>> {
        let mut seen = Vec::new();
        for r in &self.records {
            let industry = r.industry.as_deref();
            if !seen.contains(&industry) {
                seen.push(industry);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_types_like_pandas() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("12"), CellValue::Integer(12));
        assert_eq!(CellValue::guess("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::guess("NaN"), CellValue::Null);
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("NYSE"), CellValue::Text("NYSE".into()));
    }

    #[test]
    fn float_display_keeps_fraction() {
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::guess(&CellValue::Float(2.0).to_string()), CellValue::Float(2.0));
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn ticker_industries_take_the_first_row() {
        let ds = ReitDataset::from_records(vec![
            Record::new("AAA", Some("Retail"), None, None, None),
            Record::new("BBB", None, None, None, None),
            Record::new("AAA", Some("Office"), None, None, None),
        ]);
        assert_eq!(
            ds.ticker_industries(),
            vec![("AAA", Some("Retail")), ("BBB", None)]
        );
    }

    #[test]
    fn cell_reads_required_and_extra_columns() {
        let mut r = Record::new("AAA", None, Some(100.0), None, Some(0.9));
        r.extra.insert("Exchange".into(), CellValue::Text("NYSE".into()));

        assert_eq!(r.cell(TICKER), CellValue::Text("AAA".into()));
        assert_eq!(r.cell(INDUSTRY), CellValue::Null);
        assert_eq!(r.cell(MARKET_CAP), CellValue::Float(100.0));
        assert_eq!(r.cell(DIVIDEND_YIELD), CellValue::Null);
        assert_eq!(r.cell("Exchange"), CellValue::Text("NYSE".into()));
        assert_eq!(r.cell("Missing"), CellValue::Null);
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let ds = ReitDataset::from_records(vec![
            Record::new("BBB", Some("Office"), None, None, None),
            Record::new("AAA", None, None, None, None),
            Record::new("BBB", Some("Office"), None, None, None),
            Record::new("CCC", Some("Retail"), None, None, None),
        ]);
        assert_eq!(ds.tickers(), vec!["BBB", "AAA", "CCC"]);
        assert_eq!(ds.industries(), vec![Some("Office"), None, Some("Retail")]);
        assert_eq!(ds.len(), 4);
    }
}
