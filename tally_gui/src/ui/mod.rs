//! UI module for the Tally GUI
//!
//! # Panel Structure
//! - `header` - Toolbar (Open Context, Reload, Settings), settings dropdown, status bar
//! - `charts` - Donut and trend canvases with the investment footer
//! - `legend` - Clickable breakdown legend rows
//! - `settlement` - Settlement shortcut chips and the record form
//!
//! # Overlay Layers
//! - `panels` - Slide-over detail panels and the shared dim backdrop
//! - `toasts` - Notification cards, bottom-right

pub mod charts;
pub mod header;
pub mod legend;
pub mod panels;
pub mod settlement;
pub mod toasts;

use iced::Color;

// Note: Functions are accessed via module paths (e.g., ui::charts::view_charts)

/// Widget color from a shaped rgb triple
pub fn tint(rgb: [f32; 3]) -> Color {
    Color::from_rgb(rgb[0], rgb[1], rgb[2])
}
