mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::SmartphoneApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();
    let dataset = match data::loader::load_file(&config.data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Cannot load {}: {e}", config.data_path.display());
            eprintln!("error: cannot load {}: {e}", config.data_path.display());
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Smartphones Insights",
        options,
        Box::new(|_cc| Ok(Box::new(SmartphoneApp::new(config, dataset)))),
    )
}
