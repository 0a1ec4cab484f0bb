//! # Render Port
//!
//! The seam between the headless presenters and whatever actually draws.
//! Front ends implement [`RenderPort`]; the core never touches a widget or a
//! terminal directly. Implementations report failure through `TallyResult`
//! so presenters can degrade instead of panicking.

use crate::breakdown::BreakdownView;
use crate::errors::TallyResult;
use crate::toast::Severity;
use crate::trend::TrendView;

/// A rendering backend: a GUI canvas surface, a terminal, or a test recorder.
pub trait RenderPort {
    /// Present a shaped breakdown (chart or placeholder) and its legend
    fn render_donut(&mut self, view: &BreakdownView) -> TallyResult<()>;

    /// Present a shaped asset/debt trend (chart or placeholder)
    fn render_line_series(&mut self, view: &TrendView) -> TallyResult<()>;

    /// Surface a transient message to the user. An `Err` means this backend
    /// has no notification surface and the caller should fall back to a
    /// blocking native alert.
    fn show_notification(&mut self, message: &str, severity: Severity) -> TallyResult<()>;
}
