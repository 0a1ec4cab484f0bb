//! Legend rows for the category breakdown
//!
//! Each row shows the slice swatch, name, formatted amount, and share of the
//! total. Rows are clickable and open the category detail panel.

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Length};

use tally_core::breakdown::{BreakdownView, LegendRow};

use crate::ui::tint;
use crate::Message;

pub fn view_legend(view: &BreakdownView) -> Element<'_, Message> {
    let BreakdownView::Chart { legend, .. } = view else {
        return Space::new().into();
    };

    let rows: Vec<Element<'_, Message>> = legend
        .iter()
        .enumerate()
        .map(|(index, entry)| view_row(index, entry))
        .collect();

    scrollable(column(rows).spacing(2).width(Length::Fill))
        .height(Length::Fixed(140.0))
        .into()
}

fn view_row<'a>(index: usize, entry: &'a LegendRow) -> Element<'a, Message> {
    let swatch = container(Space::new().width(10).height(10)).style({
        let color = entry.color;
        move |_theme| container::Style {
            background: Some(tint(color).into()),
            ..container::Style::default()
        }
    });

    button(
        row![
            swatch,
            Space::new().width(8),
            text(&entry.name).size(11),
            Space::new().width(Length::Fill),
            text(&entry.formatted_amount).size(11),
            Space::new().width(10),
            text(&entry.percent_label).size(10).color([0.5, 0.5, 0.5]),
        ]
        .align_y(iced::Alignment::Center),
    )
    .on_press(Message::OpenCategoryPanel(index))
    .padding(iced::Padding::from([4, 6]))
    .width(Length::Fill)
    .style(button::text)
    .into()
}
