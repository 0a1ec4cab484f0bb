//! Iced implementation of the render port.
//!
//! The surface owns the shaped chart views plus the canvas caches that back
//! them. Re-presenting replaces the view and clears its cache, so the next
//! frame redraws from the new data and stale geometry can never linger.
//! Notifications queue up here and are drained into the toast stack by the
//! update loop.

use iced::widget::canvas;

use tally_core::breakdown::{BreakdownView, NO_BREAKDOWN_MESSAGE};
use tally_core::errors::TallyResult;
use tally_core::port::RenderPort;
use tally_core::toast::Severity;
use tally_core::trend::{TrendView, NO_TREND_MESSAGE};

/// Canvas-backed render surface for the dashboard
pub struct IcedSurface {
    breakdown: BreakdownView,
    trend: TrendView,
    donut_cache: canvas::Cache,
    trend_cache: canvas::Cache,
    pending_notices: Vec<(String, Severity)>,
}

impl Default for IcedSurface {
    fn default() -> Self {
        IcedSurface {
            breakdown: BreakdownView::Placeholder(NO_BREAKDOWN_MESSAGE.to_string()),
            trend: TrendView::Placeholder(NO_TREND_MESSAGE.to_string()),
            donut_cache: canvas::Cache::new(),
            trend_cache: canvas::Cache::new(),
            pending_notices: Vec::new(),
        }
    }
}

impl IcedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn breakdown(&self) -> &BreakdownView {
        &self.breakdown
    }

    pub fn trend(&self) -> &TrendView {
        &self.trend
    }

    pub fn donut_cache(&self) -> &canvas::Cache {
        &self.donut_cache
    }

    pub fn trend_cache(&self) -> &canvas::Cache {
        &self.trend_cache
    }

    /// Notifications queued since the last drain
    pub fn take_notices(&mut self) -> Vec<(String, Severity)> {
        std::mem::take(&mut self.pending_notices)
    }
}

impl RenderPort for IcedSurface {
    fn render_donut(&mut self, view: &BreakdownView) -> TallyResult<()> {
        if self.breakdown != *view {
            self.donut_cache.clear();
            self.breakdown = view.clone();
        }
        Ok(())
    }

    fn render_line_series(&mut self, view: &TrendView) -> TallyResult<()> {
        if self.trend != *view {
            self.trend_cache.clear();
            self.trend = view.clone();
        }
        Ok(())
    }

    fn show_notification(&mut self, message: &str, severity: Severity) -> TallyResult<()> {
        self.pending_notices.push((message.to_string(), severity));
        Ok(())
    }
}
