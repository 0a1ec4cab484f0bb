//! # Chart Presenter
//!
//! Drives the render port from raw context data. The presenter owns no chart
//! state at all: every call shapes the inputs from scratch and hands the
//! result to the port, so re-presenting can never leak or duplicate anything.
//!
//! Failures never escape: a failing port is logged and reported as
//! [`Outcome::Skipped`], and empty data renders as a placeholder rather than
//! erroring.

use tracing::{error, warn};

use crate::breakdown::{shape_breakdown, BreakdownView};
use crate::context::{CategorySlice, DashboardContext, TrendSeries};
use crate::port::RenderPort;
use crate::toast::Severity;
use crate::trend::{shape_trend, TrendView};

/// What became of a present call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The chart was handed to the port
    Rendered,
    /// There was nothing to chart; the placeholder was handed to the port
    Placeholder,
    /// The port refused; logged and skipped
    Skipped,
}

/// Shapes context data and feeds the render port
#[derive(Debug, Clone)]
pub struct ChartPresenter {
    symbol: String,
}

impl ChartPresenter {
    pub fn new(symbol: impl Into<String>) -> Self {
        ChartPresenter {
            symbol: symbol.into(),
        }
    }

    /// Presenter configured from a context's currency symbol
    pub fn from_context(context: &DashboardContext) -> Self {
        Self::new(context.base_currency_symbol.clone())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Shape and present the category breakdown donut with its legend
    pub fn present_breakdown(
        &self,
        slices: &[CategorySlice],
        port: &mut dyn RenderPort,
    ) -> Outcome {
        let view = shape_breakdown(slices, &self.symbol);
        let placeholder = view.is_placeholder();
        match port.render_donut(&view) {
            Ok(()) if placeholder => Outcome::Placeholder,
            Ok(()) => Outcome::Rendered,
            Err(e) => {
                error!(error = %e, "breakdown render skipped");
                Outcome::Skipped
            }
        }
    }

    /// Shape and present the asset/debt trend with its optional footer
    pub fn present_trend(
        &self,
        series: &TrendSeries,
        investment_total: Option<f64>,
        port: &mut dyn RenderPort,
    ) -> Outcome {
        let view = shape_trend(series, investment_total, &self.symbol);
        let placeholder = view.is_placeholder();
        match port.render_line_series(&view) {
            Ok(()) if placeholder => Outcome::Placeholder,
            Ok(()) => Outcome::Rendered,
            Err(e) => {
                error!(error = %e, "trend render skipped");
                Outcome::Skipped
            }
        }
    }

    /// Present everything a context carries
    pub fn present_context(
        &self,
        context: &DashboardContext,
        port: &mut dyn RenderPort,
    ) -> (Outcome, Outcome) {
        let breakdown = self.present_breakdown(&context.categories, port);
        let trend = self.present_trend(&context.trend, context.investment_total, port);
        (breakdown, trend)
    }

    /// Pass a message to the port's notification surface. Returns `false`
    /// when the port has none; the caller should then fall back to a
    /// blocking native alert.
    pub fn notify(&self, message: &str, severity: Severity, port: &mut dyn RenderPort) -> bool {
        match port.show_notification(message, severity) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "notification surface unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{TallyError, TallyResult};

    #[derive(Default)]
    struct RecordingPort {
        donuts: Vec<BreakdownView>,
        lines: Vec<TrendView>,
        notes: Vec<(String, Severity)>,
        fail: bool,
    }

    impl RenderPort for RecordingPort {
        fn render_donut(&mut self, view: &BreakdownView) -> TallyResult<()> {
            if self.fail {
                return Err(TallyError::mount_missing("donut"));
            }
            self.donuts.push(view.clone());
            Ok(())
        }

        fn render_line_series(&mut self, view: &TrendView) -> TallyResult<()> {
            if self.fail {
                return Err(TallyError::mount_missing("trend"));
            }
            self.lines.push(view.clone());
            Ok(())
        }

        fn show_notification(&mut self, message: &str, severity: Severity) -> TallyResult<()> {
            if self.fail {
                return Err(TallyError::port_unavailable("notifications"));
            }
            self.notes.push((message.to_string(), severity));
            Ok(())
        }
    }

    fn sample_slices() -> Vec<CategorySlice> {
        vec![
            CategorySlice::new("Rent", 900.0, "#de8452"),
            CategorySlice::new("Food", 300.0, "#54a868"),
        ]
    }

    #[test]
    fn test_breakdown_rendered_through_port() {
        let presenter = ChartPresenter::new("$");
        let mut port = RecordingPort::default();
        let outcome = presenter.present_breakdown(&sample_slices(), &mut port);
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(port.donuts.len(), 1);
        assert!(!port.donuts[0].is_placeholder());
    }

    #[test]
    fn test_empty_breakdown_presents_placeholder() {
        let presenter = ChartPresenter::new("$");
        let mut port = RecordingPort::default();
        let outcome = presenter.present_breakdown(&[], &mut port);
        assert_eq!(outcome, Outcome::Placeholder);
        assert!(port.donuts[0].is_placeholder());
    }

    #[test]
    fn test_failing_port_is_skipped_not_fatal() {
        let presenter = ChartPresenter::new("$");
        let mut port = RecordingPort {
            fail: true,
            ..RecordingPort::default()
        };
        assert_eq!(
            presenter.present_breakdown(&sample_slices(), &mut port),
            Outcome::Skipped
        );
        assert_eq!(
            presenter.present_trend(&TrendSeries::default(), None, &mut port),
            Outcome::Skipped
        );
        assert!(port.donuts.is_empty());
    }

    #[test]
    fn test_re_presenting_carries_no_state() {
        let presenter = ChartPresenter::new("$");
        let mut port = RecordingPort::default();
        presenter.present_breakdown(&sample_slices(), &mut port);
        presenter.present_breakdown(&sample_slices(), &mut port);
        assert_eq!(port.donuts.len(), 2);
        assert_eq!(port.donuts[0], port.donuts[1]);
    }

    #[test]
    fn test_present_context_renders_both() {
        let presenter = ChartPresenter::from_context(&DashboardContext::sample());
        let mut port = RecordingPort::default();
        let (breakdown, trend) =
            presenter.present_context(&DashboardContext::sample(), &mut port);
        assert_eq!(breakdown, Outcome::Rendered);
        assert_eq!(trend, Outcome::Rendered);
        assert_eq!(port.donuts.len(), 1);
        assert_eq!(port.lines.len(), 1);
    }

    #[test]
    fn test_notify_reports_fallback_need() {
        let presenter = ChartPresenter::new("$");
        let mut port = RecordingPort::default();
        assert!(presenter.notify("saved", Severity::Success, &mut port));
        assert_eq!(port.notes.len(), 1);

        let mut broken = RecordingPort {
            fail: true,
            ..RecordingPort::default()
        };
        assert!(!presenter.notify("saved", Severity::Success, &mut broken));
    }
}
