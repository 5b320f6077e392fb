//! REIT performance and sector analyzer.
//!
//! Loads a table of REITs once per session, filters it by ticker and derives
//! a table view, an industry pie chart, three grouped bar charts and a CSV
//! export from the filtered rows.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod headless;
pub mod state;
pub mod ui;
