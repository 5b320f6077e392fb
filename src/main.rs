use clap::Parser;
use eframe::egui;
use reit_analyzer::app::ReitAnalyzerApp;
use reit_analyzer::config::Cli;
use reit_analyzer::data::cache::DatasetCache;
use reit_analyzer::headless;
use reit_analyzer::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.is_headless() {
        return headless::run(&cli, &mut std::io::stdout().lock());
    }

    // The cache lives for the whole window session.
    let mut cache = DatasetCache::new(&cli.data);
    let state = AppState::open(&mut cache, &cli.tickers);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "REIT Performance & Sector Analyzer",
        options,
        Box::new(move |_cc| Ok(Box::new(ReitAnalyzerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
