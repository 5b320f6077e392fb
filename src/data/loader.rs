use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    is_text_column, CellValue, Record, ReitDataset, BETA, DIVIDEND_YIELD, INDUSTRY, MARKET_CAP,
    REQUIRED_COLUMNS, TICKER,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that stops the dataset from loading. Always fatal for the session.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("failed to decode arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("invalid JSON layout: {0}")]
    JsonLayout(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: missing ticker")]
    MissingTicker { row: usize },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a REIT dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one REIT per row (recommended)
/// * `.json`    – `[{ "Ticker": "...", "Industry": "...", ... }, ...]`
/// * `.parquet` – one column per field, as written by Pandas or Polars
pub fn load_file(path: &Path) -> Result<ReitDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let open = || {
        File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    match ext.as_str() {
        "csv" => read_csv(BufReader::new(open()?)),
        "json" => read_json(BufReader::new(open()?)),
        "parquet" | "pq" => read_parquet(open()?),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

fn check_columns(columns: &[String]) -> Result<(), LoadError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(LoadError::MissingColumn(required));
        }
    }
    Ok(())
}

/// Type a cell the way the CSV reader sees it, whatever the source format.
/// `Ticker` and `Industry` stay raw text; text in any other column is
/// type-guessed after trimming; NaN is missing. A loaded table therefore
/// writes to CSV and reads back unchanged.
fn canonical_cell(column: &str, value: CellValue) -> CellValue {
    match value {
        CellValue::Text(s) if s.is_empty() => CellValue::Null,
        CellValue::Text(s) if is_text_column(column) => CellValue::Text(s),
        CellValue::Text(s) => CellValue::guess(s.trim()),
        CellValue::Float(f) if f.is_nan() => CellValue::Null,
        other => other,
    }
}

fn numeric(row: usize, column: &'static str, value: CellValue) -> Result<Option<f64>, LoadError> {
    match value {
        CellValue::Null => Ok(None),
        v @ (CellValue::Integer(_) | CellValue::Float(_)) => Ok(v.as_f64()),
        other => Err(LoadError::NotNumeric {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

/// Turn one row of `(column, cell)` pairs into a [`Record`].
fn build_record(
    row: usize,
    cells: impl IntoIterator<Item = (String, CellValue)>,
) -> Result<Record, LoadError> {
    let mut ticker = None;
    let mut industry = None;
    let mut market_cap = None;
    let mut dividend_yield = None;
    let mut beta = None;
    let mut extra = BTreeMap::new();

    for (column, value) in cells {
        let value = canonical_cell(&column, value);
        match column.as_str() {
            TICKER => ticker = (!value.is_null()).then(|| value.to_string()),
            INDUSTRY => industry = (!value.is_null()).then(|| value.to_string()),
            MARKET_CAP => market_cap = numeric(row, MARKET_CAP, value)?,
            DIVIDEND_YIELD => dividend_yield = numeric(row, DIVIDEND_YIELD, value)?,
            BETA => beta = numeric(row, BETA, value)?,
            _ => {
                extra.insert(column, value);
            }
        }
    }

    Ok(Record {
        ticker: ticker.ok_or(LoadError::MissingTicker { row })?,
        industry,
        market_cap,
        dividend_yield,
        beta,
        extra,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one REIT per row.
pub fn read_csv<R: Read>(input: R) -> Result<ReitDataset, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    check_columns(&headers)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(col, raw)| (col.clone(), CellValue::Text(raw.to_string())));
        records.push(build_record(row_no, cells)?);
    }

    Ok(ReitDataset::new(headers, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Ticker": "PLD", "Industry": "Industrial", "Market Cap": 98.1,
///     "Dividend Yield": 3.1, "Beta": 1.05 },
///   ...
/// ]
/// ```
pub fn read_json<R: Read>(input: R) -> Result<ReitDataset, LoadError> {
    let root: JsonValue = serde_json::from_reader(input)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::JsonLayout("expected a top-level array".into()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| LoadError::JsonLayout(format!("row {i} is not an object")))?;

        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        let cells = obj.iter().map(|(k, v)| (k.clone(), json_to_cell(v)));
        records.push(build_record(i, cells)?);
    }

    if rows.is_empty() {
        columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
    }
    check_columns(&columns)?;

    Ok(ReitDataset::new(columns, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one REIT per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub fn read_parquet(file: File) -> Result<ReitDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_columns(&columns)?;

    let reader = builder.build()?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let mut cells = Vec::with_capacity(columns.len());
            for (col_idx, name) in columns.iter().enumerate() {
                cells.push((name.clone(), extract_cell(batch.column(col_idx), row)?));
            }
            records.push(build_record(row_no, cells)?);
        }
    }

    Ok(ReitDataset::new(columns, records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => {
            CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64)
        }
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        _ => CellValue::Text(array_value_to_string(col, row)?),
    };
    Ok(value)
}
