//! Table View Widget
//! Central panel with roster statistics, the student table and search results.

use crate::config::ColumnSchema;
use crate::data::{RosterStats, RosterView};
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

const TABLE_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 15.0;

/// Rows of a DataFrame rendered to display strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Convert a text-only frame for display. Nulls show as empty cells.
    pub fn from_frame(df: &DataFrame, schema: &ColumnSchema) -> PolarsResult<Self> {
        let headers = df
            .get_column_names()
            .iter()
            .map(|name| schema.display_name(name.as_str()).to_string())
            .collect();

        let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
        for column in df.get_columns() {
            let values = column.as_materialized_series().str()?;
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value.unwrap_or_default().to_string());
            }
        }

        Ok(Self { headers, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Central panel contents for the current view.
pub struct TableView {
    title: String,
    stats: RosterStats,
    records: TableData,
    matches: TableData,
    search_active: bool,
    /// Headline and detail of a failure that replaces the tables
    error: Option<(String, String)>,
}

impl TableView {
    pub fn new(title: String) -> Self {
        Self {
            title,
            stats: RosterStats::default(),
            records: TableData::default(),
            matches: TableData::default(),
            search_active: false,
            error: None,
        }
    }

    /// Show the given view
    pub fn set_view(&mut self, view: &RosterView, schema: &ColumnSchema) -> PolarsResult<()> {
        self.records = TableData::from_frame(&view.records, schema)?;
        self.matches = TableData::from_frame(&view.matches, schema)?;
        self.stats = view.stats;
        self.search_active = view.search_active;
        self.error = None;
        Ok(())
    }

    /// Replace any table with a failure message
    pub fn set_error(&mut self, headline: &str, error: String) {
        self.records = TableData::default();
        self.matches = TableData::default();
        self.stats = RosterStats::default();
        self.search_active = false;
        self.error = Some((headline.to_string(), error));
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading(RichText::new(&self.title).strong());
        ui.label("Filter and view students with roll numbers starting with CT or BCIT");
        ui.add_space(SECTION_SPACING);

        if let Some((headline, error)) = &self.error {
            ui.label(
                RichText::new(headline)
                    .size(16.0)
                    .color(Color32::from_rgb(255, 193, 7)),
            );
            ui.label(RichText::new(error).color(Color32::from_rgb(220, 53, 69)));
            return;
        }

        ScrollArea::vertical()
            .id_salt("roster_page")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new("Statistics").size(18.0).strong());
                ui.add_space(5.0);
                ui.columns(2, |cols| {
                    Self::draw_metric(&mut cols[0], "Total Students", self.stats.total_students);
                    Self::draw_metric(&mut cols[1], "Total Batches", self.stats.total_batches);
                });

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Student Records").size(18.0).strong());
                ui.add_space(5.0);
                Self::draw_table(ui, "records", &self.records);

                ui.add_space(SECTION_SPACING);
                ui.label(RichText::new("Search by Name").size(18.0).strong());
                ui.add_space(5.0);
                if !self.search_active {
                    ui.label(RichText::new("Enter a name in the side panel").color(Color32::GRAY));
                } else {
                    ui.label(
                        RichText::new(format!("Search Results: {} matches", self.matches.len()))
                            .size(14.0)
                            .strong(),
                    );
                    if self.matches.is_empty() {
                        ui.label("No matching records found.");
                    } else {
                        Self::draw_table(ui, "matches", &self.matches);
                    }
                }
            });
    }

    fn draw_metric(ui: &mut egui::Ui, label: &str, value: usize) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                ui.label(RichText::new(value.to_string()).size(26.0).strong());
            });
    }

    fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableData) {
        ScrollArea::both()
            .id_salt(id)
            .max_height(TABLE_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new(id)
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        for header in &table.headers {
                            ui.label(RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in &table.rows {
                            for cell in row {
                                ui.label(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BatchSelection;

    #[test]
    fn test_table_data_from_frame() {
        let df = DataFrame::new(vec![
            Column::new("Name".into(), ["Anita", "Farhan"]),
            Column::new("Batch".into(), [Some("2001 - 2002"), None]),
            Column::new("Department".into(), ["CT", "BCIT"]),
        ])
        .unwrap();

        let table = TableData::from_frame(&df, &ColumnSchema::default()).unwrap();
        assert_eq!(table.headers, ["Student Name", "Batch Year", "Department"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Anita".to_string(), "2001 - 2002".to_string(), "CT".to_string()],
                vec!["Farhan".to_string(), String::new(), "BCIT".to_string()],
            ]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_error_clears_previous_view() {
        let df = DataFrame::new(vec![
            Column::new("Name".into(), ["Anita", "Farhan"]),
            Column::new("Batch".into(), ["2001 - 2002", "2008 - 2009"]),
        ])
        .unwrap();
        let schema = ColumnSchema::default();
        let view = RosterView::compute(&df, &schema, &BatchSelection::All, "far").unwrap();

        let mut table_view = TableView::new("Roster".to_string());
        table_view.set_view(&view, &schema).unwrap();
        assert_eq!(table_view.records.len(), 2);
        assert_eq!(table_view.matches.len(), 1);
        assert!(table_view.search_active);

        table_view.set_error("Could not display the roster.", "bad column".to_string());
        assert!(table_view.records.is_empty());
        assert!(table_view.matches.is_empty());
        assert!(!table_view.search_active);
        assert_eq!(table_view.stats, RosterStats::default());
        assert_eq!(
            table_view.error,
            Some((
                "Could not display the roster.".to_string(),
                "bad column".to_string()
            ))
        );

        table_view.set_view(&view, &schema).unwrap();
        assert!(table_view.error.is_none());
    }
}
