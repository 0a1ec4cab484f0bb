//! # Category Breakdown Shaping
//!
//! Turns raw category slices into everything a donut renderer needs: arc
//! angles, resolved colors, formatted amounts, and legend rows. Shaping is
//! headless so both the GUI canvas and the CLI table consume the same view.
//!
//! Angles follow screen convention (y grows downward): the first slice starts
//! at twelve o'clock and slices sweep clockwise in insertion order.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::color::slice_color;
use crate::context::CategorySlice;
use crate::money::{format_currency, DEFAULT_DECIMALS};

/// Placeholder text when there is nothing to chart
pub const NO_BREAKDOWN_MESSAGE: &str = "No spending data to display";

/// One donut slice with its geometry and display strings resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedSlice {
    pub name: String,
    pub amount: f64,
    pub formatted_amount: String,
    /// Share of the total, 0-100
    pub percent: f64,
    /// Radians, screen convention; a zero-amount slice has start == end
    pub start_angle: f32,
    pub end_angle: f32,
    pub color: [f32; 3],
}

/// One legend entry: swatch, name, amount, percentage badge
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub name: String,
    pub color: [f32; 3],
    pub formatted_amount: String,
    pub percent_label: String,
}

/// Shaped result of a breakdown render
#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownView {
    /// Nothing to chart; the message replaces the canvas and the legend is empty
    Placeholder(String),
    Chart {
        slices: Vec<ShapedSlice>,
        legend: Vec<LegendRow>,
        total: f64,
        formatted_total: String,
    },
}

impl BreakdownView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, BreakdownView::Placeholder(_))
    }
}

/// Shape categories into a donut view. Empty input or a non-positive total
/// yields the placeholder, never NaN geometry.
pub fn shape_breakdown(slices: &[CategorySlice], symbol: &str) -> BreakdownView {
    let total: f64 = slices.iter().map(|s| s.amount.max(0.0)).sum();
    if slices.is_empty() || total <= 0.0 {
        return BreakdownView::Placeholder(NO_BREAKDOWN_MESSAGE.to_string());
    }

    let mut shaped = Vec::with_capacity(slices.len());
    let mut legend = Vec::with_capacity(slices.len());
    let mut cursor = -FRAC_PI_2; // twelve o'clock
    for (index, slice) in slices.iter().enumerate() {
        let amount = slice.amount.max(0.0);
        let fraction = amount / total;
        let percent = fraction * 100.0;
        let sweep = (fraction as f32) * 2.0 * PI;
        let color = slice_color(&slice.color, index);
        let formatted_amount = format_currency(amount, symbol, DEFAULT_DECIMALS);
        shaped.push(ShapedSlice {
            name: slice.name.clone(),
            amount,
            formatted_amount: formatted_amount.clone(),
            percent,
            start_angle: cursor,
            end_angle: cursor + sweep,
            color,
        });
        legend.push(LegendRow {
            name: slice.name.clone(),
            color,
            formatted_amount,
            percent_label: format!("{:.1}%", percent),
        });
        cursor += sweep;
    }

    BreakdownView::Chart {
        slices: shaped,
        legend,
        total,
        formatted_total: format_currency(total, symbol, DEFAULT_DECIMALS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(view: BreakdownView) -> (Vec<ShapedSlice>, Vec<LegendRow>, f64) {
        match view {
            BreakdownView::Chart {
                slices,
                legend,
                total,
                ..
            } => (slices, legend, total),
            BreakdownView::Placeholder(_) => panic!("expected chart"),
        }
    }

    #[test]
    fn test_empty_input_is_placeholder() {
        let view = shape_breakdown(&[], "$");
        match view {
            BreakdownView::Placeholder(msg) => assert!(!msg.is_empty()),
            _ => panic!("expected placeholder"),
        }
    }

    #[test]
    fn test_zero_total_is_placeholder() {
        let slices = vec![
            CategorySlice::new("A", 0.0, ""),
            CategorySlice::new("B", 0.0, ""),
        ];
        assert!(shape_breakdown(&slices, "$").is_placeholder());
    }

    #[test]
    fn test_two_slices_split_the_circle() {
        let slices = vec![
            CategorySlice::new("Rent", 75.0, "#ff0000"),
            CategorySlice::new("Food", 25.0, "#00ff00"),
        ];
        let (shaped, legend, total) = chart(shape_breakdown(&slices, "$"));
        assert!((total - 100.0).abs() < 1e-9);
        assert!((shaped[0].percent - 75.0).abs() < 1e-9);
        assert!((shaped[1].percent - 25.0).abs() < 1e-9);
        assert_eq!(legend[0].percent_label, "75.0%");
        assert_eq!(legend[0].formatted_amount, "$75.00");

        // Arcs start at twelve o'clock and tile the circle
        assert!((shaped[0].start_angle + FRAC_PI_2).abs() < 1e-5);
        assert!((shaped[0].end_angle - shaped[1].start_angle).abs() < 1e-5);
        let full_turn = shaped[1].end_angle - shaped[0].start_angle;
        assert!((full_turn - 2.0 * PI).abs() < 1e-4);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let slices = vec![
            CategorySlice::new("A", 33.33, ""),
            CategorySlice::new("B", 41.17, ""),
            CategorySlice::new("C", 7.05, ""),
            CategorySlice::new("D", 19.90, ""),
        ];
        let (shaped, _, _) = chart(shape_breakdown(&slices, "$"));
        let sum: f64 = shaped.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_bad_color_falls_back_to_palette() {
        let slices = vec![
            CategorySlice::new("A", 10.0, "#123456"),
            CategorySlice::new("B", 10.0, "not-a-color"),
            CategorySlice::new("C", 10.0, "#a\u{20ac}bc"),
        ];
        let (shaped, _, _) = chart(shape_breakdown(&slices, "$"));
        assert_ne!(shaped[0].color, crate::color::PALETTE[0]);
        assert_eq!(shaped[1].color, crate::color::PALETTE[1]);
        assert_eq!(shaped[2].color, crate::color::PALETTE[2]);
    }

    #[test]
    fn test_negative_amount_treated_as_zero() {
        let slices = vec![
            CategorySlice::new("A", -5.0, ""),
            CategorySlice::new("B", 10.0, ""),
        ];
        let (shaped, _, total) = chart(shape_breakdown(&slices, "$"));
        assert!((total - 10.0).abs() < 1e-9);
        assert!((shaped[0].end_angle - shaped[0].start_angle).abs() < 1e-6);
        assert!((shaped[0].percent).abs() < 1e-9);
    }
}
