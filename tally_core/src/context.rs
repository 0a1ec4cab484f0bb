//! # Dashboard Context
//!
//! The data a dashboard session renders from: spending categories, the
//! asset/debt trend, settlement shortcuts, and display settings. A context is
//! produced elsewhere (whatever aggregates the accounts), serialized as JSON,
//! and loaded read-only here. Everything is transient: a reload rebuilds the
//! whole model, nothing persists across runs.
//!
//! Ingested data is sanitized rather than rejected: negative amounts clamp to
//! zero and mismatched trend vectors clamp to their shared prefix, each with a
//! logged warning, so an imperfect export still renders.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{TallyError, TallyResult};

// ============================================================================
// CATEGORY BREAKDOWN
// ============================================================================

/// One spending category in the breakdown donut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    /// Amount spent, non-negative after sanitization
    pub amount: f64,
    /// CSS-style color string; unparseable values fall back to the palette
    #[serde(default)]
    pub color: String,
}

impl CategorySlice {
    pub fn new(name: impl Into<String>, amount: f64, color: impl Into<String>) -> Self {
        CategorySlice {
            name: name.into(),
            amount,
            color: color.into(),
        }
    }
}

// ============================================================================
// ASSET / DEBT TREND
// ============================================================================

/// Monthly asset and debt series sharing one label axis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    #[serde(default)]
    pub months: Vec<String>,
    #[serde(default)]
    pub asset_values: Vec<f64>,
    #[serde(default)]
    pub debt_values: Vec<f64>,
}

impl TrendSeries {
    pub fn new(months: Vec<String>, asset_values: Vec<f64>, debt_values: Vec<f64>) -> Self {
        TrendSeries {
            months,
            asset_values,
            debt_values,
        }
    }

    /// Number of plottable points (the shared prefix of the three vectors)
    pub fn len(&self) -> usize {
        self.months
            .len()
            .min(self.asset_values.len())
            .min(self.debt_values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Truncate all three vectors to their shared prefix, warning when data
    /// is dropped. Unpaired points cannot be plotted.
    pub fn sanitized(mut self) -> Self {
        let target = self.len();
        if self.months.len() != target
            || self.asset_values.len() != target
            || self.debt_values.len() != target
        {
            warn!(
                months = self.months.len(),
                assets = self.asset_values.len(),
                debts = self.debt_values.len(),
                clamped_to = target,
                "trend series lengths differ, dropping unpaired points"
            );
            self.months.truncate(target);
            self.asset_values.truncate(target);
            self.debt_values.truncate(target);
        }
        self
    }
}

// ============================================================================
// SETTLEMENTS
// ============================================================================

/// Who owes whom in a suggested settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleDirection {
    /// The counterparty owes the current user
    CounterpartyOwes,
    /// The current user owes the counterparty
    UserOwes,
}

/// A one-click settlement suggestion shown next to the balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementShortcut {
    pub counterparty: String,
    pub amount: f64,
    pub direction: SettleDirection,
}

// ============================================================================
// CONTEXT DOCUMENT
// ============================================================================

fn default_symbol() -> String {
    crate::money::DEFAULT_SYMBOL.to_string()
}

/// Everything a dashboard session needs, loaded from one JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardContext {
    /// Currency symbol prefixed to every formatted amount
    #[serde(default = "default_symbol")]
    pub base_currency_symbol: String,
    /// Display name of the person viewing the dashboard
    #[serde(default)]
    pub current_user: String,
    #[serde(default)]
    pub categories: Vec<CategorySlice>,
    #[serde(default)]
    pub trend: TrendSeries,
    /// Total invested across accounts; the trend footer shows it when positive
    #[serde(default)]
    pub investment_total: Option<f64>,
    #[serde(default)]
    pub settlements: Vec<SettlementShortcut>,
    /// When the aggregation step produced this document
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for DashboardContext {
    fn default() -> Self {
        DashboardContext {
            base_currency_symbol: default_symbol(),
            current_user: String::new(),
            categories: Vec::new(),
            trend: TrendSeries::default(),
            investment_total: None,
            settlements: Vec::new(),
            generated_at: None,
        }
    }
}

impl DashboardContext {
    /// Clamp out-of-range values in place of rejecting the document
    pub fn sanitized(mut self) -> Self {
        for slice in &mut self.categories {
            if slice.amount < 0.0 {
                warn!(
                    category = %slice.name,
                    amount = slice.amount,
                    "negative category amount clamped to zero"
                );
                slice.amount = 0.0;
            }
        }
        self.trend = self.trend.sanitized();
        self
    }

    /// Demo data shown before any context file is loaded
    pub fn sample() -> Self {
        DashboardContext {
            base_currency_symbol: default_symbol(),
            current_user: String::new(),
            categories: vec![
                CategorySlice::new("Groceries", 612.40, "#4f7ba6"),
                CategorySlice::new("Rent", 1450.00, "#de8452"),
                CategorySlice::new("Transport", 183.25, "#54a868"),
                CategorySlice::new("Dining", 247.90, "#c24f51"),
                CategorySlice::new("Utilities", 139.60, "#8570ab"),
            ],
            trend: TrendSeries::new(
                vec![
                    "Mar".into(),
                    "Apr".into(),
                    "May".into(),
                    "Jun".into(),
                    "Jul".into(),
                    "Aug".into(),
                ],
                vec![18200.0, 18950.0, 19400.0, 19100.0, 20350.0, 21480.0],
                vec![9600.0, 9450.0, 9300.0, 9150.0, 9000.0, 8850.0],
            ),
            investment_total: Some(7250.0),
            settlements: vec![
                SettlementShortcut {
                    counterparty: "Alex".into(),
                    amount: 62.50,
                    direction: SettleDirection::CounterpartyOwes,
                },
                SettlementShortcut {
                    counterparty: "Sam".into(),
                    amount: 18.75,
                    direction: SettleDirection::UserOwes,
                },
            ],
            generated_at: None,
        }
    }
}

/// Parse a context document from JSON text. `origin` labels the source in
/// error messages (a path, or "inline" for embedded data).
pub fn parse_context(json: &str, origin: &str) -> TallyResult<DashboardContext> {
    let context: DashboardContext = serde_json::from_str(json)
        .map_err(|e| TallyError::context_error(origin, e.to_string()))?;
    Ok(context.sanitized())
}

/// Load and sanitize a context document from a JSON file
pub fn load_context(path: &Path) -> TallyResult<DashboardContext> {
    let text = fs::read_to_string(path)
        .map_err(|e| TallyError::context_error(path.display().to_string(), e.to_string()))?;
    parse_context(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document_gets_defaults() {
        let context = parse_context("{}", "inline").unwrap();
        assert_eq!(context.base_currency_symbol, "$");
        assert!(context.categories.is_empty());
        assert!(context.trend.is_empty());
        assert!(context.investment_total.is_none());
    }

    #[test]
    fn test_parse_error_is_context_error() {
        let err = parse_context("{not json", "inline").unwrap_err();
        assert!(matches!(err, TallyError::ContextError { .. }));
    }

    #[test]
    fn test_negative_amounts_clamped() {
        let json = r#"{"categories": [{"name": "Refunds", "amount": -50.0}]}"#;
        let context = parse_context(json, "inline").unwrap();
        assert_eq!(context.categories[0].amount, 0.0);
        assert_eq!(context.categories[0].color, "");
    }

    #[test]
    fn test_trend_clamps_to_shared_prefix() {
        let trend = TrendSeries::new(
            vec!["Jan".into(), "Feb".into(), "Mar".into()],
            vec![100.0, 110.0],
            vec![50.0, 48.0, 46.0, 44.0],
        )
        .sanitized();
        assert_eq!(trend.len(), 2);
        assert_eq!(trend.months.len(), 2);
        assert_eq!(trend.asset_values, vec![100.0, 110.0]);
        assert_eq!(trend.debt_values, vec![50.0, 48.0]);
    }

    #[test]
    fn test_direction_serde_names() {
        let shortcut = SettlementShortcut {
            counterparty: "Alex".into(),
            amount: 10.0,
            direction: SettleDirection::UserOwes,
        };
        let json = serde_json::to_string(&shortcut).unwrap();
        assert!(json.contains("\"user_owes\""));
        let back: SettlementShortcut = serde_json::from_str(&json).unwrap();
        assert_eq!(back.direction, SettleDirection::UserOwes);
    }

    #[test]
    fn test_sample_is_coherent() {
        let sample = DashboardContext::sample();
        assert!(!sample.categories.is_empty());
        assert_eq!(sample.trend.months.len(), sample.trend.asset_values.len());
        assert_eq!(sample.trend.months.len(), sample.trend.debt_values.len());
        assert!(sample.categories.iter().all(|c| c.amount >= 0.0));
    }
}
