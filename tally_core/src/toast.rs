//! # Toast Notifications
//!
//! A headless stack of transient notifications. Each toast carries a severity
//! (header color and glyph), optional action buttons with typed message
//! payloads, and an auto-hide deadline. Like the panels, the stack runs on a
//! caller-supplied millisecond clock: `tick` advances lifecycles and returns
//! the payloads the front end should dispatch.
//!
//! A toast is `Visible` until dismissed (by deadline, by hand, or by a
//! dismissing action press), then `Hiding` for a short fade window, then gone.
//! The optional close payload is emitted once, when hiding begins.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::TallyError;

/// Default auto-hide delay, ms
pub const AUTO_HIDE_DELAY_MS: u64 = 5000;

/// How long a hiding toast stays around for its fade-out, ms
pub const HIDE_WINDOW_MS: u64 = 200;

/// Identifier handed back to callers when a toast is pushed
pub type ToastId = Uuid;

// ============================================================================
// SEVERITY
// ============================================================================

/// Visual weight of a toast header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    #[serde(alias = "danger")]
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Header tint for this severity
    pub fn color(&self) -> [f32; 3] {
        match self {
            Severity::Success => [0.2, 0.6, 0.2],
            Severity::Error => [0.8, 0.2, 0.2],
            Severity::Warning => [0.85, 0.65, 0.13],
            Severity::Info => [0.2, 0.4, 0.8],
        }
    }

    /// Header glyph for this severity
    pub fn glyph(&self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Error => "!",
            Severity::Warning => "▲",
            Severity::Info => "ℹ",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl FromStr for Severity {
    type Err = TallyError;

    /// Case-insensitive; `"danger"` is accepted as an alias of `Error`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Severity::Success),
            "error" | "danger" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(TallyError::invalid_input(
                "severity",
                other,
                "Expected success, error, danger, warning, or info",
            )),
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// Button style for a toast action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Primary,
    Secondary,
}

/// One action button on a toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastAction<M> {
    pub label: String,
    pub style: ActionStyle,
    /// Dispatched to the app when the button is pressed
    pub message: M,
    /// Pressing also dismisses the toast (the default)
    pub dismiss_on_press: bool,
}

impl<M> ToastAction<M> {
    pub fn new(label: impl Into<String>, style: ActionStyle, message: M) -> Self {
        ToastAction {
            label: label.into(),
            style,
            message,
            dismiss_on_press: true,
        }
    }
}

/// Creation options for a toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastOptions<M> {
    pub auto_hide: bool,
    pub auto_hide_delay_ms: u64,
    pub actions: Vec<ToastAction<M>>,
    /// Emitted once when the toast starts hiding, however that happens
    pub on_close: Option<M>,
}

impl<M> Default for ToastOptions<M> {
    fn default() -> Self {
        ToastOptions {
            auto_hide: true,
            auto_hide_delay_ms: AUTO_HIDE_DELAY_MS,
            actions: Vec::new(),
            on_close: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Hiding,
}

/// One live toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastRecord<M> {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub actions: Vec<ToastAction<M>>,
    pub phase: ToastPhase,
    hide_at: Option<u64>,
    remove_at: Option<u64>,
    on_close: Option<M>,
}

// ============================================================================
// STACK
// ============================================================================

/// The live toasts, newest last
#[derive(Debug, Default)]
pub struct ToastStack<M> {
    toasts: Vec<ToastRecord<M>>,
}

impl<M: Clone> ToastStack<M> {
    pub fn new() -> Self {
        ToastStack { toasts: Vec::new() }
    }

    /// Show a toast. Returns its id; each toast lives and dies independently
    /// of the others.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        options: ToastOptions<M>,
        now_ms: u64,
    ) -> ToastId {
        let id = Uuid::new_v4();
        let hide_at = options
            .auto_hide
            .then(|| now_ms + options.auto_hide_delay_ms);
        self.toasts.push(ToastRecord {
            id,
            message: message.into(),
            severity,
            actions: options.actions,
            phase: ToastPhase::Visible,
            hide_at,
            remove_at: None,
            on_close: options.on_close,
        });
        debug!(toast = %id, severity = severity.label(), "toast pushed");
        id
    }

    /// Dismiss a toast by hand. Returns its close payload, if any.
    pub fn dismiss(&mut self, id: ToastId, now_ms: u64) -> Option<M> {
        let toast = self
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.phase == ToastPhase::Visible)?;
        Self::begin_hide(toast, now_ms)
    }

    /// Press an action button. Returns the messages to dispatch: the action
    /// payload, plus the close payload when the press dismisses the toast.
    pub fn press(&mut self, id: ToastId, action_index: usize, now_ms: u64) -> Vec<M> {
        let Some(toast) = self
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.phase == ToastPhase::Visible)
        else {
            return Vec::new();
        };
        let Some(action) = toast.actions.get(action_index) else {
            return Vec::new();
        };
        let mut emitted = vec![action.message.clone()];
        if action.dismiss_on_press {
            if let Some(close) = Self::begin_hide(toast, now_ms) {
                emitted.push(close);
            }
        }
        emitted
    }

    /// Advance lifecycles: start hiding toasts past their deadline, drop the
    /// ones whose fade window has elapsed. Returns close payloads to dispatch.
    pub fn tick(&mut self, now_ms: u64) -> Vec<M> {
        let mut emitted = Vec::new();
        for toast in &mut self.toasts {
            if toast.phase == ToastPhase::Visible
                && toast.hide_at.is_some_and(|at| at <= now_ms)
            {
                if let Some(close) = Self::begin_hide(toast, now_ms) {
                    emitted.push(close);
                }
            }
        }
        self.toasts
            .retain(|t| t.remove_at.is_none_or(|at| at > now_ms));
        emitted
    }

    fn begin_hide(toast: &mut ToastRecord<M>, now_ms: u64) -> Option<M> {
        toast.phase = ToastPhase::Hiding;
        toast.remove_at = Some(now_ms + HIDE_WINDOW_MS);
        debug!(toast = %toast.id, "toast hiding");
        toast.on_close.take()
    }

    /// Live toasts in display order, including those fading out
    pub fn toasts(&self) -> &[ToastRecord<M>] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestMsg {
        Undo,
        Closed,
    }

    #[test]
    fn test_push_defaults() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        stack.push("done", Severity::Success, ToastOptions::default(), 0);
        assert_eq!(stack.toasts().len(), 1);
        let toast = &stack.toasts()[0];
        assert_eq!(toast.phase, ToastPhase::Visible);
        assert_eq!(toast.severity.color(), [0.2, 0.6, 0.2]);
        assert_eq!(toast.severity.glyph(), "✓");
    }

    #[test]
    fn test_auto_hide_then_removal() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        let options = ToastOptions {
            on_close: Some(TestMsg::Closed),
            ..ToastOptions::default()
        };
        stack.push("done", Severity::Success, options, 0);

        assert!(stack.tick(AUTO_HIDE_DELAY_MS - 1).is_empty());
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Visible);

        let emitted = stack.tick(AUTO_HIDE_DELAY_MS);
        assert_eq!(emitted, vec![TestMsg::Closed]);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Hiding);

        stack.tick(AUTO_HIDE_DELAY_MS + HIDE_WINDOW_MS);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_sticky_toast_stays() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        let options = ToastOptions {
            auto_hide: false,
            ..ToastOptions::default()
        };
        let id = stack.push("persistent", Severity::Error, options, 0);
        stack.tick(60_000);
        assert_eq!(stack.toasts().len(), 1);

        stack.dismiss(id, 60_000);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Hiding);
        stack.tick(60_000 + HIDE_WINDOW_MS);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_press_dispatches_and_dismisses() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        let options = ToastOptions {
            actions: vec![ToastAction::new("Undo", ActionStyle::Primary, TestMsg::Undo)],
            on_close: Some(TestMsg::Closed),
            ..ToastOptions::default()
        };
        let id = stack.push("saved", Severity::Info, options, 0);

        let emitted = stack.press(id, 0, 10);
        assert_eq!(emitted, vec![TestMsg::Undo, TestMsg::Closed]);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Hiding);
    }

    #[test]
    fn test_non_dismissing_action_keeps_toast() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        let mut action = ToastAction::new("Undo", ActionStyle::Secondary, TestMsg::Undo);
        action.dismiss_on_press = false;
        let options = ToastOptions {
            actions: vec![action],
            ..ToastOptions::default()
        };
        let id = stack.push("saved", Severity::Info, options, 0);

        assert_eq!(stack.press(id, 0, 10), vec![TestMsg::Undo]);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Visible);
        // Repeated presses keep working while visible
        assert_eq!(stack.press(id, 0, 20), vec![TestMsg::Undo]);
    }

    #[test]
    fn test_toasts_hide_independently() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        stack.push("first", Severity::Info, ToastOptions::default(), 0);
        stack.push("second", Severity::Info, ToastOptions::default(), 3000);

        stack.tick(AUTO_HIDE_DELAY_MS);
        assert_eq!(stack.toasts()[0].phase, ToastPhase::Hiding);
        assert_eq!(stack.toasts()[1].phase, ToastPhase::Visible);

        stack.tick(AUTO_HIDE_DELAY_MS + HIDE_WINDOW_MS);
        assert_eq!(stack.toasts().len(), 1);
        assert_eq!(stack.toasts()[0].message, "second");
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("success".parse::<Severity>().unwrap(), Severity::Success);
        assert_eq!("danger".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!(" Warning ".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_serde_alias() {
        let parsed: Severity = serde_json::from_str("\"danger\"").unwrap();
        assert_eq!(parsed, Severity::Error);
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn test_press_on_unknown_toast_is_empty() {
        let mut stack: ToastStack<TestMsg> = ToastStack::new();
        let id = stack.push("one", Severity::Info, ToastOptions::default(), 0);
        assert!(stack.press(id, 5, 0).is_empty());
        assert!(stack.press(Uuid::new_v4(), 0, 0).is_empty());
    }
}
