//! # Tally GUI Application
//!
//! Graphical front end for the personal finance dashboard. Built with Iced
//! for cross-platform support (Windows, macOS, Linux, WASM).
//!
//! The app owns a [`DashboardContext`], drives a [`ChartPresenter`] into the
//! iced render surface, and advances panel and toast deadlines off a
//! millisecond tick subscription.

mod surface;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use iced::widget::{column, container, scrollable, stack, text_input};
use iced::{Element, Length, Subscription, Task, Theme};
use tracing::{debug, info, warn};

use tally_core::breakdown::BreakdownView;
use tally_core::context::{load_context, DashboardContext, SettlementShortcut};
use tally_core::errors::TallyError;
use tally_core::money::{format_currency, parse_amount};
use tally_core::panel::{PanelOptions, PanelRegistry};
use tally_core::presenter::ChartPresenter;
use tally_core::settlement::SettlementForm;
use tally_core::toast::{ActionStyle, Severity, ToastAction, ToastId, ToastOptions, ToastStack};

use surface::IcedSurface;
use ui::panels::{ABOUT_PANEL, CATEGORY_PANEL};

/// Clock tick driving panel and toast deadlines
const TICK_MS: u64 = 50;
/// Scrollable id for the dashboard body
const DASHBOARD_SCROLL: &str = "dashboard-scroll";

// ============================================================================
// MESSAGES
// ============================================================================

/// Result of an asynchronous context pick or reload
#[derive(Debug, Clone)]
pub struct ContextLoad {
    /// Short source label for status lines and error messages
    pub label: String,
    /// Backing file, when one exists (absent for browser picks)
    pub path: Option<PathBuf>,
    pub result: Result<DashboardContext, TallyError>,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Context
    OpenContext,
    ReloadContext,
    /// `None` when the file dialog was cancelled
    ContextLoaded(Option<ContextLoad>),

    // Clock
    Tick(iced::time::Instant),

    // Settlement
    ToggleSettlement,
    SettlementShortcutPressed(SettlementShortcut),
    SettlementPayerChanged(String),
    SettlementReceiverChanged(String),
    SettlementAmountChanged(String),
    SettlementSubmit,

    // Panels
    OpenCategoryPanel(usize),
    OpenAbout,
    ClosePanel(String),
    BackdropPressed,

    // Toasts
    ToastDismissed(ToastId),
    ToastPressed { id: ToastId, index: usize },

    // Chrome
    ToggleSettingsMenu,
    DarkModeToggled(bool),
    TrendHovered(Option<usize>),
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub context: DashboardContext,
    pub context_path: Option<PathBuf>,
    pub presenter: ChartPresenter,
    pub surface: IcedSurface,
    pub panels: PanelRegistry,
    pub toasts: ToastStack<Message>,
    pub form: SettlementForm,
    pub settlement_open: bool,
    pub settings_menu_open: bool,
    pub dark_mode: bool,
    /// Trend point under the cursor, reported by the trend canvas
    pub trend_hover: Option<usize>,
    /// Category backing the detail panel
    pub detail_category: Option<usize>,
    pub current_user: String,
    pub status: String,
    epoch: Option<iced::time::Instant>,
    now_ms: u64,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let context = DashboardContext::sample();
        let presenter = ChartPresenter::from_context(&context);
        let current_user = resolve_user(&context);
        let mut app = App {
            context,
            context_path: None,
            presenter,
            surface: IcedSurface::new(),
            panels: PanelRegistry::new(),
            toasts: ToastStack::new(),
            form: SettlementForm::default(),
            settlement_open: false,
            settings_menu_open: false,
            dark_mode: false,
            trend_hover: None,
            detail_category: None,
            current_user,
            status: String::from("Showing sample data"),
            epoch: None,
            now_ms: 0,
        };
        app.present();
        (app, Task::none())
    }

    fn title(&self) -> String {
        String::from("Tally - Personal Finance Dashboard")
    }

    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        // Always on. Panels and toasts schedule deadlines against this
        // clock; pausing it would let stale deadlines pile up and fire in a
        // burst when it resumes.
        iced::time::every(Duration::from_millis(TICK_MS)).map(Message::Tick)
    }

    // ------------------------------------------------------------------------
    // UPDATE
    // ------------------------------------------------------------------------

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenContext => {
                self.settings_menu_open = false;
                Task::perform(pick_context(), Message::ContextLoaded)
            }
            Message::ReloadContext => {
                let Some(path) = self.context_path.clone() else {
                    return Task::none();
                };
                Task::perform(async move { Some(read_context(path)) }, Message::ContextLoaded)
            }
            Message::ContextLoaded(None) => {
                self.status = String::from("Open cancelled");
                Task::none()
            }
            Message::ContextLoaded(Some(load)) => self.apply_load(load),

            Message::Tick(instant) => {
                let epoch = *self.epoch.get_or_insert(instant);
                self.now_ms = instant.duration_since(epoch).as_millis() as u64;
                self.panels.tick(self.now_ms);
                let emitted = self.toasts.tick(self.now_ms);
                self.dispatch_all(emitted)
            }

            Message::ToggleSettlement => {
                self.settlement_open = !self.settlement_open;
                if self.settlement_open {
                    self.scroll_to_settlement()
                } else {
                    Task::none()
                }
            }
            Message::SettlementShortcutPressed(shortcut) => {
                self.form = SettlementForm::prefill(&shortcut, &self.current_user);
                self.settlement_open = true;
                self.scroll_to_settlement()
            }
            Message::SettlementPayerChanged(value) => {
                self.form.payer = value;
                Task::none()
            }
            Message::SettlementReceiverChanged(value) => {
                self.form.receiver = value;
                Task::none()
            }
            Message::SettlementAmountChanged(value) => {
                self.form.amount = value;
                Task::none()
            }
            Message::SettlementSubmit => self.submit_settlement(),

            Message::OpenCategoryPanel(index) => {
                self.open_category(index);
                Task::none()
            }
            Message::OpenAbout => {
                self.settings_menu_open = false;
                self.panels.open(
                    ABOUT_PANEL,
                    "About",
                    PanelOptions {
                        icon: Some("ℹ".into()),
                        icon_color: None,
                    },
                    self.now_ms,
                );
                Task::none()
            }
            Message::ClosePanel(id) => {
                self.panels.close(&id, self.now_ms);
                Task::none()
            }
            Message::BackdropPressed => {
                if let Some(top) = self.panels.top().map(|p| p.id.clone()) {
                    self.panels.close(&top, self.now_ms);
                }
                Task::none()
            }

            Message::ToastDismissed(id) => {
                let close = self.toasts.dismiss(id, self.now_ms);
                self.dispatch_all(close.into_iter().collect())
            }
            Message::ToastPressed { id, index } => {
                let emitted = self.toasts.press(id, index, self.now_ms);
                self.dispatch_all(emitted)
            }

            Message::ToggleSettingsMenu => {
                self.settings_menu_open = !self.settings_menu_open;
                Task::none()
            }
            Message::DarkModeToggled(enabled) => {
                self.dark_mode = enabled;
                Task::none()
            }
            Message::TrendHovered(index) => {
                self.trend_hover = index;
                Task::none()
            }
        }
    }

    /// Feed messages emitted by the core state machines back through update
    fn dispatch_all(&mut self, messages: Vec<Message>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = messages.into_iter().map(|m| self.update(m)).collect();
        Task::batch(tasks)
    }

    /// Re-present the context into the render surface and surface any
    /// queued notifications as toasts
    fn present(&mut self) {
        let (breakdown, trend) = self
            .presenter
            .present_context(&self.context, &mut self.surface);
        debug!(?breakdown, ?trend, "dashboard presented");
        self.drain_notices();
    }

    fn drain_notices(&mut self) {
        for (message, severity) in self.surface.take_notices() {
            self.toasts
                .push(message, severity, ToastOptions::default(), self.now_ms);
        }
    }

    /// Notify through the render port, falling back to a blocking alert
    /// when the port has no notification surface
    fn notify(&mut self, message: &str, severity: Severity) {
        if !self.presenter.notify(message, severity, &mut self.surface) {
            alert_fallback(message);
        }
        self.drain_notices();
    }

    fn apply_load(&mut self, load: ContextLoad) -> Task<Message> {
        match load.result {
            Ok(context) => {
                info!(source = %load.label, "context loaded");
                self.context = context;
                self.context_path = load.path;
                self.presenter = ChartPresenter::from_context(&self.context);
                self.current_user = resolve_user(&self.context);
                self.trend_hover = None;
                self.detail_category = None;
                self.form.reset();
                self.settlement_open = false;
                self.status = format!("Loaded {}", load.label);
                self.present();
                self.notify(
                    &format!("Context loaded from {}", load.label),
                    Severity::Success,
                );
                Task::none()
            }
            Err(error) => {
                warn!(error = %error, "context load failed");
                self.status = String::from("Context load failed");
                let mut options = ToastOptions {
                    auto_hide: false,
                    ..ToastOptions::default()
                };
                if load.path.is_some() {
                    options.actions = vec![ToastAction::new(
                        "Retry",
                        ActionStyle::Primary,
                        Message::ReloadContext,
                    )];
                }
                self.toasts
                    .push(error.to_string(), error.toast_severity(), options, self.now_ms);
                Task::none()
            }
        }
    }

    fn submit_settlement(&mut self) -> Task<Message> {
        self.form.validated = true;
        let report = self.form.validate();
        if let Some(field) = report.first_invalid() {
            warn!(field, "settlement form invalid");
            return text_input::focus(field.to_string());
        }

        let amount = parse_amount(&self.form.amount);
        let message = format!(
            "Recorded: {} paid {} {}",
            self.form.payer.trim(),
            self.form.receiver.trim(),
            format_currency(amount, self.presenter.symbol(), 2),
        );
        self.form.reset();
        self.settlement_open = false;
        self.notify(&message, Severity::Success);
        Task::none()
    }

    fn open_category(&mut self, index: usize) {
        let Some(slice) = self.context.categories.get(index) else {
            return;
        };
        let color = match self.surface.breakdown() {
            BreakdownView::Chart { legend, .. } => legend.get(index).map(|row| row.color),
            _ => None,
        };
        self.detail_category = Some(index);
        self.panels.open(
            CATEGORY_PANEL,
            slice.name.clone(),
            PanelOptions {
                icon: Some("●".into()),
                icon_color: color,
            },
            self.now_ms,
        );
    }

    fn scroll_to_settlement(&self) -> Task<Message> {
        scrollable::snap_to(DASHBOARD_SCROLL, scrollable::RelativeOffset::END)
    }

    // ------------------------------------------------------------------------
    // VIEW
    // ------------------------------------------------------------------------

    fn view(&self) -> Element<'_, Message> {
        let body = container(
            column![
                ui::charts::view_charts(self),
                ui::settlement::view_settlement(self),
            ]
            .spacing(16),
        )
        .padding(iced::Padding::from([8, 16]));

        // Scrolling is suppressed while a panel is up
        let middle: Element<'_, Message> = if self.panels.scroll_locked() {
            container(body).height(Length::Fill).into()
        } else {
            scrollable(body)
                .id(DASHBOARD_SCROLL)
                .height(Length::Fill)
                .into()
        };

        let base = column![
            ui::header::view_toolbar(self),
            middle,
            ui::header::view_status_bar(self),
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        let mut layers = stack![base];
        if !self.panels.is_empty() {
            layers = layers.push(ui::panels::view_backdrop(self));
            for panel in self.panels.panels() {
                layers = layers.push(ui::panels::view_panel(self, panel));
            }
        }
        if self.settings_menu_open {
            layers = layers.push(ui::header::view_settings_menu(self));
        }
        if !self.toasts.is_empty() {
            layers = layers.push(ui::toasts::view_toasts(self));
        }
        layers.into()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Display name standing in for "you" in settlement prefills
fn resolve_user(context: &DashboardContext) -> String {
    let name = context.current_user.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let fallback = whoami::realname();
        if !fallback.trim().is_empty() {
            return fallback;
        }
    }
    String::from("You")
}

/// Last-resort notification when no toast surface exists
#[cfg(not(target_arch = "wasm32"))]
fn alert_fallback(message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_title("Tally")
        .set_description(message)
        .set_level(rfd::MessageLevel::Warning)
        .show();
}

#[cfg(target_arch = "wasm32")]
fn alert_fallback(message: &str) {
    tracing::error!(%message, "no notification surface");
}

/// File-picker flow. `None` means the dialog was cancelled.
async fn pick_context() -> Option<ContextLoad> {
    let handle = rfd::AsyncFileDialog::new()
        .add_filter("context", &["json"])
        .set_title("Open dashboard context")
        .pick_file()
        .await?;

    #[cfg(not(target_arch = "wasm32"))]
    {
        Some(read_context(handle.path().to_path_buf()))
    }
    #[cfg(target_arch = "wasm32")]
    {
        let label = handle.file_name();
        let bytes = handle.read().await;
        let result = String::from_utf8(bytes)
            .map_err(|e| TallyError::context_error(label.clone(), e.to_string()))
            .and_then(|text| tally_core::context::parse_context(&text, &label));
        Some(ContextLoad {
            label,
            path: None,
            result,
        })
    }
}

fn read_context(path: PathBuf) -> ContextLoad {
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let result = load_context(&path);
    ContextLoad {
        label,
        path: Some(path),
        result,
    }
}

// ============================================================================
// ENTRY
// ============================================================================

fn run() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .title(App::title)
        .window_size((1100.0, 760.0))
        .run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    run()
}

#[cfg(target_arch = "wasm32")]
fn main() -> iced::Result {
    console_error_panic_hook::set_once();
    run()
}
