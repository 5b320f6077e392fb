use std::path::Path;

use anyhow::{Context, Result};

use super::model::ReitDataset;

pub const EXPORT_FILE_NAME: &str = "reit_data_filtered.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// A serialized filtered view, ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub body: String,
}

/// Serialize a table as CSV: header row, one line per record, no index column.
pub fn to_csv_string(view: &ReitDataset) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&view.columns)?;
    for record in &view.records {
        writer.write_record(view.columns.iter().map(|c| record.cell(c).to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV export")?;
    String::from_utf8(bytes).context("CSV export is not valid UTF-8")
}

/// Build the downloadable artifact for a filtered view.
pub fn export_artifact(view: &ReitDataset) -> Result<ExportArtifact> {
    Ok(ExportArtifact {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        body: to_csv_string(view)?,
    })
}

/// Write an artifact to `path`.
pub fn write_artifact(artifact: &ExportArtifact, path: &Path) -> Result<()> {
    std::fs::write(path, &artifact.body)
        .with_context(|| format!("writing {} to {}", artifact.mime, path.display()))?;
    log::info!("Exported {} bytes to {}", artifact.body.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, Selection};
    use crate::data::loader::read_csv;
    use crate::data::model::{CellValue, Record};

    fn dataset() -> ReitDataset {
        let source = "\
Ticker,Industry,Market Cap,Dividend Yield,Beta,Exchange,Rating,Listed
AAA,Retail,100,2.0,0.9,NYSE,4,true
BBB,,200.25,,1.1,\"NASDAQ, Global\",,false
CCC,Office,1e12,3.333,,NYSE,2.5,
";
        read_csv(source.as_bytes()).unwrap()
    }

    #[test]
    fn export_has_header_and_no_index() {
        let view = ReitDataset::from_records(vec![Record::new(
            "AAA",
            Some("Retail"),
            Some(100.0),
            Some(2.0),
            Some(0.9),
        )]);
        let body = to_csv_string(&view).unwrap();
        assert_eq!(
            body,
            "Ticker,Industry,Market Cap,Dividend Yield,Beta\nAAA,Retail,100.0,2.0,0.9\n"
        );
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = dataset();
        for picked in [vec!["AAA"], vec!["BBB", "CCC"], vec!["AAA", "BBB", "CCC"]] {
            let view = filter(&ds, &Selection::for_dataset(&ds, picked).unwrap());
            let artifact = export_artifact(&view).unwrap();
            let reparsed = read_csv(artifact.body.as_bytes()).unwrap();
            assert_eq!(reparsed, view);
        }
    }

    #[test]
    fn json_sourced_export_round_trips() {
        use crate::data::loader::read_json;

        let json = r#"[
            {"Ticker": "AAA", "Industry": "Retail", "Market Cap": 100, "Dividend Yield": 2.0,
             "Beta": 0.9, "Zip": "02110", "Listed": "true", "Note": "NaN", "Rating": 4.0},
            {"Ticker": "BBB", "Industry": null, "Market Cap": 200.5, "Dividend Yield": null,
             "Beta": 1.1, "Zip": "10001", "Listed": false, "Note": "core, plus", "Rating": null}
        ]"#;
        let ds = read_json(json.as_bytes()).unwrap();
        assert_eq!(ds.columns[0], "Ticker");

        let reparsed = read_csv(to_csv_string(&ds).unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed, ds);
    }

    #[test]
    fn extra_columns_keep_their_types() {
        let ds = dataset();
        let reparsed = read_csv(to_csv_string(&ds).unwrap().as_bytes()).unwrap();
        assert_eq!(reparsed.records[0].extra["Rating"], CellValue::Integer(4));
        assert_eq!(reparsed.records[2].extra["Rating"], CellValue::Float(2.5));
        assert_eq!(reparsed.records[1].extra["Exchange"], CellValue::Text("NASDAQ, Global".into()));
        assert_eq!(reparsed.records[2].extra["Listed"], CellValue::Null);
    }

    #[test]
    fn artifact_uses_fixed_name_and_type() {
        let artifact = export_artifact(&dataset()).unwrap();
        assert_eq!(artifact.file_name, "reit_data_filtered.csv");
        assert_eq!(artifact.mime, "text/csv");

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(artifact.file_name);
        write_artifact(&artifact, &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), artifact.body);
    }
}
