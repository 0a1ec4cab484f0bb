//! Slide-over panels and the shared dim backdrop
//!
//! Panels render in registry stacking order as right-aligned sheets. A panel
//! still inside its entry delay shows a short loading body; the backdrop only
//! dims once a panel reaches the active phase, but it captures clicks for as
//! long as any panel exists so a press always closes the top one.

use iced::widget::{button, column, container, row, rule, scrollable, text, Space};
use iced::{Color, Element, Length};

use tally_core::money::format_currency;
use tally_core::panel::{PanelPhase, PanelState};

use crate::ui::tint;
use crate::{App, Message};

/// Panel ids, shared between open calls and body lookup
pub const CATEGORY_PANEL: &str = "category-detail";
pub const ABOUT_PANEL: &str = "about";

pub fn view_backdrop(app: &App) -> Element<'_, Message> {
    let active = app.panels.overlay_active();
    button(Space::new())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme, _status| {
            let alpha = if active { 0.5 } else { 0.0 };
            button::Style::default().with_background(Color::from_rgba(0.0, 0.0, 0.0, alpha))
        })
        .on_press(Message::BackdropPressed)
        .into()
}

pub fn view_panel<'a>(app: &'a App, state: &'a PanelState) -> Element<'a, Message> {
    let header = row![
        text(&state.icon).size(14).color(tint(state.icon_color)),
        Space::new().width(8),
        text(&state.title).size(14),
        Space::new().width(Length::Fill),
        button(text("✕").size(12))
            .on_press(Message::ClosePanel(state.id.clone()))
            .padding(iced::Padding::from([2, 8]))
            .style(button::text),
    ]
    .align_y(iced::Alignment::Center);

    let body: Element<'_, Message> = match state.phase {
        PanelPhase::Entering => text("Loading…").size(11).color([0.5, 0.5, 0.5]).into(),
        PanelPhase::Active | PanelPhase::Closing => panel_body(app, state),
    };

    let sheet = container(
        column![header, rule::horizontal(1), scrollable(body)].spacing(12),
    )
    .width(Length::Fixed(360.0))
    .height(Length::Fill)
    .padding(16)
    .style(|theme: &iced::Theme| {
        let palette = theme.extended_palette();
        container::Style {
            text_color: Some(palette.background.base.text),
            background: Some(palette.background.base.color.into()),
            border: iced::Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 0.0.into(),
            },
            shadow: iced::Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                offset: iced::Vector::new(-4.0, 0.0),
                blur_radius: 16.0,
            },
            snap: false,
        }
    });

    container(sheet)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .into()
}

fn panel_body<'a>(app: &'a App, state: &'a PanelState) -> Element<'a, Message> {
    match state.id.as_str() {
        CATEGORY_PANEL => category_body(app),
        ABOUT_PANEL => about_body(app),
        _ => Space::new().into(),
    }
}

fn detail_row<'a>(label: &'a str, value: Element<'a, Message>) -> Element<'a, Message> {
    row![
        text(label).size(11).color([0.5, 0.5, 0.5]).width(Length::Fixed(110.0)),
        value,
    ]
    .align_y(iced::Alignment::Center)
    .into()
}

fn category_body(app: &App) -> Element<'_, Message> {
    let Some(slice) = app
        .detail_category
        .and_then(|i| app.context.categories.get(i))
    else {
        return text("No category selected.").size(11).into();
    };

    let total: f64 = app
        .context
        .categories
        .iter()
        .map(|c| c.amount.max(0.0))
        .sum();
    let share = if total > 0.0 {
        slice.amount.max(0.0) / total * 100.0
    } else {
        0.0
    };
    let symbol = app.presenter.symbol();

    column![
        text(&slice.name).size(16),
        Space::new().height(4),
        detail_row(
            "Amount",
            text(format_currency(slice.amount.max(0.0), symbol, 2))
                .size(12)
                .into(),
        ),
        detail_row("Share of total", text(format!("{share:.1}%")).size(12).into()),
        detail_row(
            "All categories",
            text(format_currency(total, symbol, 2)).size(12).into(),
        ),
    ]
    .spacing(8)
    .into()
}

fn about_body(app: &App) -> Element<'_, Message> {
    let generated = app
        .context
        .generated_at
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "n/a".to_string());

    column![
        text("Tally").size(16),
        text("Personal finance dashboard").size(11).color([0.5, 0.5, 0.5]),
        Space::new().height(4),
        detail_row(
            "Version",
            text(env!("CARGO_PKG_VERSION")).size(12).into(),
        ),
        detail_row("User", text(&app.current_user).size(12).into()),
        detail_row("Generated", text(generated).size(12).into()),
        detail_row(
            "Categories",
            text(app.context.categories.len().to_string()).size(12).into(),
        ),
        detail_row(
            "Months",
            text(app.context.trend.len().to_string()).size(12).into(),
        ),
        detail_row(
            "Settlements",
            text(app.context.settlements.len().to_string()).size(12).into(),
        ),
    ]
    .spacing(8)
    .into()
}
