//! Command-line run of the dashboard pipeline without a window.

use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{Context, Result};

use crate::config::Cli;
use crate::dashboard::build_frame;
use crate::data::cache::DatasetCache;
use crate::data::export::{export_artifact, write_artifact};
use crate::data::filter::Selection;

/// Load, filter, then export and/or summarize once.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut cache = DatasetCache::new(&cli.data);
    let dataset = cache.dataset()?;

    let tickers: BTreeSet<String> = if cli.tickers.is_empty() {
        dataset.tickers().into_iter().map(str::to_string).collect()
    } else {
        Selection::for_dataset(&dataset, cli.tickers.iter().cloned())?;
        cli.tickers.iter().cloned().collect()
    };

    let frame = build_frame(&dataset, &tickers)?;

    if let Some(path) = &cli.export {
        let artifact = export_artifact(&frame.view)?;
        write_artifact(&artifact, path)?;
    }

    if cli.summary {
        serde_json::to_writer_pretty(&mut *out, &frame.summary())
            .context("writing dashboard summary")?;
        writeln!(out)?;
    }

    Ok(())
}
