//! Toolbar, settings dropdown, and the bottom status bar

use iced::widget::{button, checkbox, column, container, row, rule, text, Space};
use iced::{Element, Length};

use crate::{App, Message};

pub fn view_toolbar(app: &App) -> Element<'_, Message> {
    let settings_label = if app.settings_menu_open {
        "Settings ▲"
    } else {
        "Settings ▼"
    };

    let bar = row![
        text("TALLY").size(18),
        Space::new().width(10),
        text("Personal finance dashboard")
            .size(10)
            .color([0.5, 0.5, 0.5]),
        Space::new().width(Length::Fill),
        button(text("Open Context…").size(11))
            .on_press(Message::OpenContext)
            .padding(iced::Padding::from([5, 14]))
            .style(button::secondary),
        Space::new().width(6),
        button(text("Reload").size(11))
            .on_press_maybe(app.context_path.is_some().then_some(Message::ReloadContext))
            .padding(iced::Padding::from([5, 14]))
            .style(button::secondary),
        Space::new().width(6),
        button(text(settings_label).size(11))
            .on_press(Message::ToggleSettingsMenu)
            .padding(iced::Padding::from([5, 14]))
            .style(button::text),
    ]
    .align_y(iced::Alignment::Center);

    container(bar)
        .padding(iced::Padding::from([10, 16]))
        .width(Length::Fill)
        .into()
}

/// Dropdown under the toolbar's settings button, rendered as a stack layer
pub fn view_settings_menu(app: &App) -> Element<'_, Message> {
    let menu = container(
        column![
            checkbox(app.dark_mode)
                .label("Dark mode")
                .on_toggle(Message::DarkModeToggled)
                .text_size(11),
            rule::horizontal(1),
            button(text("About Tally").size(11))
                .on_press(Message::OpenAbout)
                .padding(iced::Padding::from([4, 8]))
                .width(Length::Fill)
                .style(button::text),
        ]
        .spacing(8),
    )
    .padding(12)
    .width(Length::Fixed(200.0))
    .style(container::bordered_box);

    container(menu)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding(iced::Padding {
            top: 48.0,
            right: 16.0,
            bottom: 0.0,
            left: 0.0,
        })
        .into()
}

pub fn view_status_bar(app: &App) -> Element<'_, Message> {
    let source = app
        .context_path
        .as_deref()
        .and_then(|p| p.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("sample data"));

    let generated = app
        .context
        .generated_at
        .map(|at| at.format("generated %Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();

    let bar = row![
        text(&app.status).size(10).color([0.5, 0.5, 0.5]),
        Space::new().width(Length::Fill),
        text(generated).size(10).color([0.5, 0.5, 0.5]),
        Space::new().width(12),
        text(source).size(10),
    ]
    .align_y(iced::Alignment::Center);

    container(bar)
        .padding(iced::Padding::from([5, 16]))
        .width(Length::Fill)
        .style(|theme: &iced::Theme| {
            let palette = theme.extended_palette();
            container::Style {
                background: Some(palette.background.weak.color.into()),
                ..container::Style::default()
            }
        })
        .into()
}
