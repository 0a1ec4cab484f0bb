//! Settlement section: shortcut chips and the record form
//!
//! Shortcuts prefill the form from a suggested settlement and expand it in
//! one press. Failed validation highlights the offending inputs; highlights
//! only appear after a submit attempt.

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Element, Length};

use tally_core::context::{SettleDirection, SettlementShortcut};
use tally_core::money::format_currency;
use tally_core::settlement::{AMOUNT_INPUT, PAYER_INPUT, RECEIVER_INPUT};

use crate::{App, Message};

pub fn view_settlement(app: &App) -> Element<'_, Message> {
    let toggle_label = if app.settlement_open {
        "Hide form ▲"
    } else {
        "Record settlement ▼"
    };

    let mut section = column![
        row![
            text("Settle Up").size(14),
            Space::new().width(Length::Fill),
            button(text(toggle_label).size(11))
                .on_press(Message::ToggleSettlement)
                .padding(iced::Padding::from([4, 12]))
                .style(button::secondary),
        ]
        .align_y(iced::Alignment::Center),
    ]
    .spacing(12);

    if !app.context.settlements.is_empty() {
        let chips: Vec<Element<'_, Message>> = app
            .context
            .settlements
            .iter()
            .map(|shortcut| view_shortcut(app, shortcut))
            .collect();
        section = section.push(row(chips).spacing(8));
    }

    if app.settlement_open {
        section = section.push(view_form(app));
    }

    container(section)
        .padding(12)
        .style(container::bordered_box)
        .width(Length::Fill)
        .into()
}

fn view_shortcut<'a>(app: &'a App, shortcut: &'a SettlementShortcut) -> Element<'a, Message> {
    let amount = format_currency(shortcut.amount, app.presenter.symbol(), 2);
    let label = match shortcut.direction {
        SettleDirection::CounterpartyOwes => {
            format!("{} owes you {}", shortcut.counterparty, amount)
        }
        SettleDirection::UserOwes => format!("You owe {} {}", shortcut.counterparty, amount),
    };

    button(text(label).size(10))
        .on_press(Message::SettlementShortcutPressed(shortcut.clone()))
        .padding(iced::Padding::from([4, 10]))
        .style(button::secondary)
        .into()
}

fn view_form(app: &App) -> Element<'_, Message> {
    let report = app.form.validate();
    let flag = |id: &str| app.form.validated && report.is_invalid(id);

    let mut form = column![
        labeled_input(
            "Payer",
            "Name",
            &app.form.payer,
            PAYER_INPUT,
            flag(PAYER_INPUT),
            Message::SettlementPayerChanged,
        ),
        labeled_input(
            "Receiver",
            "Name",
            &app.form.receiver,
            RECEIVER_INPUT,
            flag(RECEIVER_INPUT),
            Message::SettlementReceiverChanged,
        ),
        labeled_input(
            "Amount",
            "0.00",
            &app.form.amount,
            AMOUNT_INPUT,
            flag(AMOUNT_INPUT),
            Message::SettlementAmountChanged,
        ),
    ]
    .spacing(8);

    if app.form.validated && !report.is_valid() {
        form = form.push(
            text("Fill in the highlighted fields.")
                .size(10)
                .color([0.8, 0.2, 0.2]),
        );
    }

    form = form.push(
        row![
            Space::new().width(Length::Fill),
            button(text("Record").size(11))
                .on_press(Message::SettlementSubmit)
                .padding(iced::Padding::from([5, 16]))
                .style(button::primary),
        ],
    );

    form.into()
}

fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    id: &'static str,
    invalid: bool,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let input = text_input(placeholder, value)
        .on_input(on_input)
        .id(id)
        .size(11)
        .padding(6)
        .style(move |theme: &iced::Theme, status| {
            let mut style = text_input::default(theme, status);
            if invalid {
                style.border.color = theme.extended_palette().danger.base.color;
                style.border.width = 1.0;
            }
            style
        });

    row![
        text(label).size(11).width(Length::Fixed(90.0)),
        input,
    ]
    .align_y(iced::Alignment::Center)
    .into()
}
