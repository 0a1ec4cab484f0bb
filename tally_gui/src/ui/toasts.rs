//! Toast notification cards
//!
//! Stacked bottom-right. Each card carries a severity glyph, the message, an
//! optional action row, and a dismiss button. Cards in the hiding phase fade
//! to a muted look until the stack drops them.

use iced::widget::{button, column, container, row, text, Space};
use iced::{Color, Element, Length};

use tally_core::toast::{ActionStyle, ToastPhase, ToastRecord};

use crate::ui::tint;
use crate::{App, Message};

pub fn view_toasts(app: &App) -> Element<'_, Message> {
    let cards: Vec<Element<'_, Message>> =
        app.toasts.toasts().iter().map(view_card).collect();

    container(column(cards).spacing(8).width(Length::Fixed(300.0)))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(16)
        .into()
}

fn view_card(record: &ToastRecord<Message>) -> Element<'_, Message> {
    let hiding = record.phase == ToastPhase::Hiding;
    let accent = tint(record.severity.color());

    let header = row![
        text(record.severity.glyph()).size(12).color(accent),
        Space::new().width(8),
        text(&record.message).size(11).width(Length::Fill),
        button(text("✕").size(10))
            .on_press(Message::ToastDismissed(record.id))
            .padding(iced::Padding::from([2, 6]))
            .style(button::text),
    ]
    .align_y(iced::Alignment::Center);

    let mut card = column![header].spacing(8);

    if !record.actions.is_empty() {
        let mut actions = row![Space::new().width(Length::Fill)].spacing(6);
        for (index, action) in record.actions.iter().enumerate() {
            let style = match action.style {
                ActionStyle::Primary => button::primary,
                ActionStyle::Secondary => button::secondary,
            };
            actions = actions.push(
                button(text(&action.label).size(10))
                    .on_press(Message::ToastPressed {
                        id: record.id,
                        index,
                    })
                    .padding(iced::Padding::from([3, 10]))
                    .style(style),
            );
        }
        card = card.push(actions);
    }

    container(card)
        .padding(10)
        .width(Length::Fill)
        .style(move |theme: &iced::Theme| {
            let palette = theme.extended_palette();
            let alpha = if hiding { 0.55 } else { 1.0 };
            container::Style {
                text_color: Some(palette.background.base.text),
                background: Some(
                    Color {
                        a: alpha,
                        ..palette.background.base.color
                    }
                    .into(),
                ),
                border: iced::Border {
                    color: Color { a: alpha, ..accent },
                    width: 1.0,
                    radius: 6.0.into(),
                },
                shadow: iced::Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
                    offset: iced::Vector::new(0.0, 2.0),
                    blur_radius: 10.0,
                },
                snap: false,
            }
        })
        .into()
}
