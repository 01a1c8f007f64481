//! Roster Viewer Main Application
//! Main window with control panel and roster tables.

use crate::config::RosterConfig;
use crate::data::{
    export_file_name, export_to_path, RosterLoader, RosterProcessor, RosterView,
};
use crate::gui::{ControlPanel, ControlPanelAction, TableView};
use anyhow::Context;
use chrono::Local;
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::path::Path;
use tracing::{error, info, warn};

/// Main application window.
pub struct RosterApp {
    config: RosterConfig,
    loader: RosterLoader,
    control_panel: ControlPanel,
    table_view: TableView,
    view: Option<RosterView>,
}

impl RosterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: RosterConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.source_path = Some(config.source_path.clone());

        let mut app = Self {
            loader: RosterLoader::new(&config),
            table_view: TableView::new(config.title.clone()),
            control_panel,
            config,
            view: None,
        };
        app.handle_reload();
        app
    }

    /// Load the roster from disk and rebuild the view.
    fn handle_reload(&mut self) {
        info!(path = %self.loader.get_file_path().display(), "loading roster");
        self.view = None;

        let loaded = self.loader.load().map_err(|e| e.to_string()).and_then(|df| {
            RosterProcessor::batch_options(df, &self.config.columns.batch)
                .map(|batches| (df.height(), batches))
                .map_err(|e| e.to_string())
        });

        match loaded {
            Ok((row_count, batches)) => {
                let batch_count = batches.len();
                self.control_panel.update_batches(batches);
                self.control_panel.set_status(
                    &format!("Loaded {} students, {} batches", row_count, batch_count),
                    false,
                );
                self.refresh_view();
            }
            Err(e) => {
                error!("load failed: {e}");
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e), true);
                self.table_view
                    .set_error("No data available. Please check if the CSV file exists.", e);
            }
        }
    }

    /// Recompute the view for the current filter inputs.
    fn refresh_view(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            return;
        };
        let settings = &self.control_panel.settings;

        let result = RosterView::compute(
            df,
            &self.config.columns,
            &settings.selection,
            &settings.search,
        )
        .map_err(anyhow::Error::from)
        .and_then(|view| {
            self.table_view
                .set_view(&view, &self.config.columns)
                .context("rendering table")?;
            Ok(view)
        });

        match result {
            Ok(view) => {
                info!(
                    batch = %settings.selection,
                    search = %settings.search,
                    students = view.stats.total_students,
                    matches = view.matches.height(),
                    "view updated"
                );
                self.control_panel.export_enabled = true;
                self.view = Some(view);
            }
            Err(e) => {
                warn!("view update failed: {e:#}");
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {:#}", e), true);
                self.table_view
                    .set_error("Could not display the roster.", format!("{:#}", e));
                self.view = None;
            }
        }
    }

    /// Export the rows currently shown (batch filter and name search applied).
    fn handle_export_csv(&mut self) {
        let Some(view) = &self.view else {
            self.control_panel.set_status("No data to export", true);
            return;
        };

        let file_name = export_file_name(Local::now().naive_local());
        let output_path = match rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match save_export(&view.matches, &output_path) {
            Ok(rows) => {
                self.control_panel.set_status(
                    &format!("Exported {} rows to {}", rows, output_path.display()),
                    false,
                );
            }
            Err(e) => {
                error!("export failed: {e:#}");
                self.control_panel
                    .set_status(&format!("Export error: {:#}", e), true);
            }
        }
    }
}

fn save_export(df: &DataFrame, path: &Path) -> anyhow::Result<usize> {
    export_to_path(df, path).with_context(|| format!("writing {}", path.display()))
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::FilterChanged => self.refresh_view(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - roster tables
        egui::CentralPanel::default().show(ctx, |ui| {
            self.table_view.show(ui);
        });
    }
}
