//! # Asset / Debt Trend Shaping
//!
//! Turns a `TrendSeries` into the shaped view the line-chart renderers draw:
//! paired points with preformatted tooltip currency, a padded value range,
//! evenly spaced axis ticks with compact labels, and the optional investment
//! footer. The footer percentage is relative to whichever asset value the
//! cursor is over, so the label itself is produced on demand via
//! [`InvestmentFooter::label_for`].

use crate::context::TrendSeries;
use crate::money::{compact, format_currency, DEFAULT_DECIMALS};

/// Placeholder text when there is nothing to plot
pub const NO_TREND_MESSAGE: &str = "No trend data to display";

/// Number of intervals on the value axis
const AXIS_INTERVALS: usize = 4;

/// One plottable month with both values and their tooltip strings
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub month: String,
    pub asset: f64,
    pub debt: f64,
    pub asset_label: String,
    pub debt_label: String,
}

/// A horizontal gridline position and its compact label
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

/// Investment summary shown under the chart when the total is positive
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentFooter {
    pub total: f64,
    pub formatted_total: String,
}

impl InvestmentFooter {
    /// Footer text for a given asset value (the hovered point, or the latest
    /// one when nothing is hovered). A non-positive asset value drops the
    /// percentage clause.
    pub fn label_for(&self, asset_value: f64, symbol: &str) -> String {
        let total = format_currency(self.total, symbol, DEFAULT_DECIMALS);
        if asset_value > 0.0 {
            let percent = self.total / asset_value * 100.0;
            format!("Investments: {} ({:.1}% of assets)", total, percent)
        } else {
            format!("Investments: {}", total)
        }
    }
}

/// Shaped result of a trend render
#[derive(Debug, Clone, PartialEq)]
pub enum TrendView {
    Placeholder(String),
    Chart {
        points: Vec<TrendPoint>,
        /// Padded value range covering both series
        lo: f64,
        hi: f64,
        ticks: Vec<AxisTick>,
        footer: Option<InvestmentFooter>,
    },
}

impl TrendView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, TrendView::Placeholder(_))
    }
}

/// Shape a trend series into a dual-line view. Empty input yields the
/// placeholder; the footer appears only for a positive investment total.
pub fn shape_trend(
    series: &TrendSeries,
    investment_total: Option<f64>,
    symbol: &str,
) -> TrendView {
    let len = series.len();
    if len == 0 {
        return TrendView::Placeholder(NO_TREND_MESSAGE.to_string());
    }

    let mut points = Vec::with_capacity(len);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for i in 0..len {
        let asset = series.asset_values[i];
        let debt = series.debt_values[i];
        min = min.min(asset).min(debt);
        max = max.max(asset).max(debt);
        points.push(TrendPoint {
            month: series.months[i].clone(),
            asset,
            debt,
            asset_label: format_currency(asset, symbol, DEFAULT_DECIMALS),
            debt_label: format_currency(debt, symbol, DEFAULT_DECIMALS),
        });
    }

    let (lo, hi) = padded_range(min, max);
    let ticks = axis_ticks(lo, hi);
    let footer = investment_total
        .filter(|total| *total > 0.0)
        .map(|total| InvestmentFooter {
            total,
            formatted_total: format_currency(total, symbol, DEFAULT_DECIMALS),
        });

    TrendView::Chart {
        points,
        lo,
        hi,
        ticks,
        footer,
    }
}

/// Pad the data range by 5% each side; a flat series still gets a usable span
fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        // flat line, give it room proportional to its magnitude
        (max.abs() * 0.1).max(1.0)
    };
    (min - pad, max + pad)
}

fn axis_ticks(lo: f64, hi: f64) -> Vec<AxisTick> {
    (0..=AXIS_INTERVALS)
        .map(|i| {
            let value = lo + (hi - lo) * (i as f64) / (AXIS_INTERVALS as f64);
            AxisTick {
                value,
                label: compact(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TrendSeries {
        TrendSeries::new(
            vec!["Jun".into(), "Jul".into(), "Aug".into()],
            vec![19100.0, 20350.0, 21480.0],
            vec![9150.0, 9000.0, 8850.0],
        )
    }

    fn chart(view: TrendView) -> (Vec<TrendPoint>, f64, f64, Vec<AxisTick>, Option<InvestmentFooter>) {
        match view {
            TrendView::Chart {
                points,
                lo,
                hi,
                ticks,
                footer,
            } => (points, lo, hi, ticks, footer),
            TrendView::Placeholder(_) => panic!("expected chart"),
        }
    }

    #[test]
    fn test_empty_series_is_placeholder() {
        let view = shape_trend(&TrendSeries::default(), Some(100.0), "$");
        match view {
            TrendView::Placeholder(msg) => assert!(!msg.is_empty()),
            _ => panic!("expected placeholder"),
        }
    }

    #[test]
    fn test_range_covers_both_series() {
        let (points, lo, hi, ticks, _) = chart(shape_trend(&series(), None, "$"));
        assert_eq!(points.len(), 3);
        assert!(lo < 8850.0);
        assert!(hi > 21480.0);
        assert_eq!(ticks.len(), AXIS_INTERVALS + 1);
        assert!(ticks.windows(2).all(|w| w[1].value > w[0].value));
        assert!((ticks[0].value - lo).abs() < 1e-6);
        assert!((ticks.last().unwrap().value - hi).abs() < 1e-6);
    }

    #[test]
    fn test_tooltip_labels_use_symbol() {
        let (points, ..) = chart(shape_trend(&series(), None, "€"));
        assert_eq!(points[1].asset_label, "€20350.00");
        assert_eq!(points[1].debt_label, "€9000.00");
    }

    #[test]
    fn test_footer_requires_positive_total() {
        let (.., footer) = chart(shape_trend(&series(), Some(7250.0), "$"));
        let footer = footer.unwrap();
        assert_eq!(footer.formatted_total, "$7250.00");

        let (.., missing) = chart(shape_trend(&series(), Some(0.0), "$"));
        assert!(missing.is_none());
        let (.., absent) = chart(shape_trend(&series(), None, "$"));
        assert!(absent.is_none());
    }

    #[test]
    fn test_footer_label_is_hover_relative() {
        let footer = InvestmentFooter {
            total: 5000.0,
            formatted_total: "$5000.00".into(),
        };
        assert_eq!(
            footer.label_for(20000.0, "$"),
            "Investments: $5000.00 (25.0% of assets)"
        );
        assert_eq!(footer.label_for(0.0, "$"), "Investments: $5000.00");
    }

    #[test]
    fn test_flat_series_has_nonzero_span() {
        let flat = TrendSeries::new(
            vec!["Jan".into(), "Feb".into()],
            vec![100.0, 100.0],
            vec![100.0, 100.0],
        );
        let (_, lo, hi, ..) = chart(shape_trend(&flat, None, "$"));
        assert!(hi > lo);
    }
}
