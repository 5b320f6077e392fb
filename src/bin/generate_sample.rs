use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{json, Map, Value};

use reit_analyzer::data::export::to_csv_string;
use reit_analyzer::data::model::{
    CellValue, Record, ReitDataset, BETA, DIVIDEND_YIELD, INDUSTRY, MARKET_CAP, TICKER,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[lo, hi)`, rounded to `digits` decimals.
    fn uniform(&mut self, lo: f64, hi: f64, digits: i32) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        let scale = 10f64.powi(digits);
        ((lo + unit * (hi - lo)) * scale).round() / scale
    }
}

const REITS: [(&str, &str, &str); 12] = [
    ("PLD", "Industrial", "Prologis"),
    ("REXR", "Industrial", "Rexford Industrial"),
    ("O", "Retail", "Realty Income"),
    ("SPG", "Retail", "Simon Property Group"),
    ("EQIX", "Data Center", "Equinix"),
    ("DLR", "Data Center", "Digital Realty"),
    ("AVB", "Residential", "AvalonBay Communities"),
    ("EQR", "Residential", "Equity Residential"),
    ("WELL", "Health Care", "Welltower"),
    ("BXP", "Office", "BXP"),
    ("AMT", "Specialty", "American Tower"),
    ("PSA", "Self Storage", "Public Storage"),
];

fn build_dataset(rng: &mut SimpleRng) -> ReitDataset {
    let records = REITS
        .iter()
        .map(|&(ticker, industry, name)| {
            let mut record = Record::new(
                ticker,
                Some(industry),
                Some(rng.uniform(5.0e9, 120.0e9, -8)),
                Some(rng.uniform(1.5, 7.5, 2)),
                Some(rng.uniform(0.5, 1.4, 2)),
            );
            record.extra.insert("Name".into(), CellValue::Text(name.into()));
            record.extra.insert(
                "Employees".into(),
                CellValue::Integer(rng.uniform(200.0, 12000.0, 0) as i64),
            );
            record
        })
        .collect();

    let columns = [TICKER, "Name", INDUSTRY, MARKET_CAP, DIVIDEND_YIELD, BETA, "Employees"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    ReitDataset::new(columns, records)
}

fn write_json(ds: &ReitDataset, path: &str) -> Result<()> {
    let rows: Vec<Value> = ds
        .records
        .iter()
        .map(|r| {
            let obj: Map<String, Value> = ds
                .columns
                .iter()
                .map(|c| {
                    let v = match r.cell(c) {
                        CellValue::Text(s) => json!(s),
                        CellValue::Integer(i) => json!(i),
                        CellValue::Float(f) => json!(f),
                        CellValue::Bool(b) => json!(b),
                        CellValue::Null => Value::Null,
                    };
                    (c.clone(), v)
                })
                .collect();
            Value::Object(obj)
        })
        .collect();
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, &rows)?;
    Ok(())
}

fn write_parquet(ds: &ReitDataset, path: &str) -> Result<()> {
    let text = |f: fn(&Record) -> Option<String>| -> ArrayRef {
        Arc::new(ds.records.iter().map(f).collect::<StringArray>())
    };
    let float = |f: fn(&Record) -> Option<f64>| -> ArrayRef {
        Arc::new(ds.records.iter().map(f).collect::<Float64Array>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(TICKER, DataType::Utf8, false),
        Field::new("Name", DataType::Utf8, true),
        Field::new(INDUSTRY, DataType::Utf8, true),
        Field::new(MARKET_CAP, DataType::Float64, true),
        Field::new(DIVIDEND_YIELD, DataType::Float64, true),
        Field::new(BETA, DataType::Float64, true),
        Field::new("Employees", DataType::Int64, true),
    ]));

    let employees: Int64Array = ds
        .records
        .iter()
        .map(|r| match r.cell("Employees") {
            CellValue::Integer(i) => Some(i),
            _ => None,
        })
        .collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|r| Some(r.ticker.clone())),
            text(|r| match r.cell("Name") {
                CellValue::Text(s) => Some(s),
                _ => None,
            }),
            text(|r| r.industry.clone()),
            float(|r| r.market_cap),
            float(|r| r.dividend_yield),
            float(|r| r.beta),
            Arc::new(employees) as ArrayRef,
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let ds = build_dataset(&mut rng);

    std::fs::write("reit_data.csv", to_csv_string(&ds)?).context("writing reit_data.csv")?;
    write_json(&ds, "reit_data.json")?;
    write_parquet(&ds, "reit_data.parquet")?;

    println!(
        "Wrote {} REITs to reit_data.csv, reit_data.json and reit_data.parquet",
        ds.len()
    );
    Ok(())
}
