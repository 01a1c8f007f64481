//! GUI module - User interface components

mod app;
mod control_panel;
mod table_view;

pub use app::RosterApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use table_view::TableView;
