//! Control Panel Widget
//! Left side panel with the batch filter, name search and export controls.

use crate::data::{BatchSelection, ALL_BATCHES};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Current filter inputs
#[derive(Default, Clone)]
pub struct UserSettings {
    pub selection: BatchSelection,
    pub search: String,
}

/// Left side control panel with filter and export controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub source_path: Option<PathBuf>,
    pub batches: Vec<String>,
    pub status: String,
    pub status_is_error: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            source_path: None,
            batches: Vec::new(),
            status: "Ready".to_string(),
            status_is_error: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the batch choices after a load. Drops a selection that no longer exists.
    pub fn update_batches(&mut self, batches: Vec<String>) {
        if let BatchSelection::Batch(label) = &self.settings.selection {
            if !batches.contains(label) {
                self.settings.selection = BatchSelection::All;
            }
        }
        self.batches = batches;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎓 Roster Viewer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .source_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file".to_string());
                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 150.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Batch Year:"));
            ComboBox::from_id_salt("batch_selection")
                .width(combo_width)
                .selected_text(self.settings.selection.to_string())
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(self.settings.selection == BatchSelection::All, ALL_BATCHES)
                        .clicked()
                    {
                        self.settings.selection = BatchSelection::All;
                        action = ControlPanelAction::FilterChanged;
                    }
                    for batch in &self.batches {
                        let selected =
                            matches!(&self.settings.selection, BatchSelection::Batch(b) if b == batch);
                        if ui.selectable_label(selected, batch).clicked() {
                            self.settings.selection = BatchSelection::Batch(batch.clone());
                            action = ControlPanelAction::FilterChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Search Name:"));
            let search = egui::TextEdit::singleline(&mut self.settings.search)
                .hint_text("name or part of name")
                .desired_width(combo_width);
            if ui.add(search).changed() {
                action = ControlPanelAction::FilterChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export CSV").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportCsv;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::from_rgb(40, 167, 69)
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str, is_error: bool) {
        self.status = status.to_string();
        self.status_is_error = is_error;
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FilterChanged,
    ExportCsv,
    Reload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_batches_drops_stale_selection() {
        let mut panel = ControlPanel::new();
        panel.settings.selection = BatchSelection::Batch("2001 - 2002".to_string());

        panel.update_batches(vec!["2001 - 2002".to_string(), "2002 - 2003".to_string()]);
        assert_eq!(
            panel.settings.selection,
            BatchSelection::Batch("2001 - 2002".to_string())
        );

        panel.update_batches(vec!["2002 - 2003".to_string()]);
        assert_eq!(panel.settings.selection, BatchSelection::All);
    }
}
