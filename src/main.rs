//! Roster Viewer - Student Roster Browser
//!
//! Loads a student CSV, derives batch years from enrollment numbers and
//! shows a filterable, searchable table with CSV export.

mod config;
mod data;
mod gui;

use config::{RosterConfig, CONFIG_FILE};
use eframe::egui;
use gui::RosterApp;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let config = RosterConfig::load_or_default(Path::new(CONFIG_FILE));

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(&config.title),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Roster Viewer",
        options,
        Box::new(|cc| Ok(Box::new(RosterApp::new(cc, config)))),
    )
}
