mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::DashboardApp;
use data::persist::{MemoryStore, QueryStringStore, SelectionStore};
use data::selection::SelectionOptions;
use eframe::egui;
use state::AppState;

/// Loaded at startup when present, mirroring the original viewer's
/// load-on-mount behaviour.
const DEFAULT_CSV: &str = "combined_experiments.csv";

/// Optional JSON file overriding the selection options preset.
const OPTIONS_FILE: &str = "dashboard.json";

/// Sidecar file playing the role of the page URL for persisted selections.
const QUERY_FILE: &str = "dashboard.query";

fn main() -> eframe::Result {
    env_logger::init();

    let options = SelectionOptions::load_or_default(Path::new(OPTIONS_FILE));
    let store: Box<dyn SelectionStore> = if options.persist {
        Box::new(QueryStringStore::new(QUERY_FILE.into()))
    } else {
        Box::new(MemoryStore::default())
    };

    let mut state = AppState::new(options, store);
    let csv = Path::new(DEFAULT_CSV);
    if csv.exists() {
        state.load_from_path(csv);
    } else {
        log::info!("{DEFAULT_CSV} not found, waiting for File → Open…");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Polarization – Experiment Dashboard",
        native_options,
        Box::new(|cc| {
            // Install image loaders so egui can render the gif figures.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
}
