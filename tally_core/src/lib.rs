//! # tally_core - Dashboard Presentation Engine
//!
//! `tally_core` is the headless heart of Tally, a personal-finance dashboard.
//! It shapes raw financial data into renderable views, runs the UI lifecycle
//! state machines (panels, toasts), and defines the port the front ends draw
//! through. Nothing in this crate knows about widgets or terminals.
//!
//! ## Design Philosophy
//!
//! - **Stateless presenting**: every render call shapes from scratch, so
//!   re-rendering can never leak or duplicate anything
//! - **Fail-soft**: bad data degrades to placeholders and clamped values, a
//!   failing backend is logged and skipped, never a panic
//! - **Clock-agnostic**: timed behavior runs on a caller-supplied millisecond
//!   clock, so every lifecycle is unit-testable without sleeping
//!
//! ## Quick Start
//!
//! ```rust
//! use tally_core::context::DashboardContext;
//! use tally_core::presenter::ChartPresenter;
//!
//! let context = DashboardContext::sample();
//! let presenter = ChartPresenter::from_context(&context);
//! // hand `presenter` a RenderPort implementation and present away
//! ```
//!
//! ## Modules
//!
//! - [`context`] - The context document: categories, trend, settlements
//! - [`breakdown`] / [`trend`] - Chart shaping (geometry, labels, ranges)
//! - [`presenter`] / [`port`] - Driving a rendering backend, fail-soft
//! - [`panel`] / [`toast`] - UI lifecycle state machines
//! - [`settlement`] - Settlement form prefill and validation
//! - [`money`] / [`color`] - Currency formatting and CSS color parsing
//! - [`errors`] - Structured error types

pub mod breakdown;
pub mod color;
pub mod context;
pub mod errors;
pub mod money;
pub mod panel;
pub mod port;
pub mod presenter;
pub mod settlement;
pub mod toast;
pub mod trend;

// Re-export commonly used types at crate root for convenience
pub use breakdown::BreakdownView;
pub use context::{CategorySlice, DashboardContext, SettlementShortcut, TrendSeries};
pub use errors::{TallyError, TallyResult};
pub use money::{format_currency, parse_amount};
pub use panel::{PanelOptions, PanelRegistry, PanelState};
pub use port::RenderPort;
pub use presenter::{ChartPresenter, Outcome};
pub use settlement::SettlementForm;
pub use toast::{Severity, ToastId, ToastOptions, ToastStack};
pub use trend::TrendView;
