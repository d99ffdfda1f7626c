use ratatui::{
    prelude::*,
    text::Text,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::preferences::Currency;
use crate::state::{LoadingState, TransactionsState};
use crate::ui::components::empty_state::{self, Placeholder};
use crate::ui::components::popup::{self, PopupKind};
use crate::ui::components::{help_bar, screen_title, transaction_form};
use crate::ui::layouts::ScreenAreas;
use crate::ui::theme::Palette;
use crate::ui::utils;
use itertools::Itertools;
use moneymap_ledger::Transaction;

pub fn render(
    f: &mut Frame,
    areas: &ScreenAreas,
    palette: &Palette,
    state: &TransactionsState,
    currency: Currency,
) {
    screen_title::render_screen_title(
        f,
        areas.title,
        palette,
        "Transactions",
        &LoadingState::NotStarted,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(areas.content);

    render_totals_line(f, chunks[0], palette, state, currency);
    render_table(f, chunks[1], palette, state, currency);

    if let Some(form) = &state.form {
        let inner = popup::render_popup_frame(f, palette, PopupKind::Form, "Add Transaction");
        let form_chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(transaction_form::FORM_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        transaction_form::render_transaction_form(f, form_chunks[0], palette, form, true);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[Enter] ", palette.header_style()),
                Span::raw("Add  "),
                Span::styled("[Esc]", palette.help_text_style()),
                Span::raw(" Cancel"),
            ]))
            .alignment(Alignment::Center),
            form_chunks[1],
        );
    }

    if state.form.is_some() {
        let hints = help_bar::transaction_form_hints("Add", "Cancel");
        help_bar::render_help_bar(f, areas.help, palette, &hints);
    } else {
        help_bar::render_help_bar(
            f,
            areas.help,
            palette,
            &[("j/k", "Select"), ("a", "Add transaction"), ("?", "Help")],
        );
    }
}

fn render_totals_line(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &TransactionsState,
    currency: Currency,
) {
    let summary = state.ledger.summary();
    let text = [
        format!("{} transactions", state.ledger.len()),
        format!(
            "Income {}",
            utils::fmt_currency(summary.total_income, currency)
        ),
        format!(
            "Expenses {}",
            utils::fmt_currency(summary.total_expense, currency)
        ),
        format!("Balance {}", utils::fmt_currency(summary.balance, currency)),
    ]
    .iter()
    .join("  ·  ");

    f.render_widget(
        Paragraph::new(Span::styled(text, palette.help_text_style())),
        area,
    );
}

fn render_table(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &TransactionsState,
    currency: Currency,
) {
    if state.ledger.is_empty() {
        empty_state::render_placeholder(
            f,
            area,
            palette,
            "Transactions",
            Placeholder::NoTransactions,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from("Date"),
        Cell::from("Description"),
        Cell::from("Category"),
        Cell::from("Type"),
        Cell::from(Text::from("Amount").right_aligned()),
    ])
    .style(palette.header_style())
    .underlined();

    let rows: Vec<Row> = state
        .rows()
        .into_iter()
        .map(|t| build_transaction_row(t, palette, currency))
        .collect();

    let mut table = Table::new(
        rows,
        [
            Constraint::Length(13),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Length(8),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("All Transactions"))
    .column_spacing(2);

    if state.form.is_none() {
        table = table.row_highlight_style(palette.selection_style());
    }

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn build_transaction_row<'a>(
    transaction: &'a Transaction,
    palette: &Palette,
    currency: Currency,
) -> Row<'a> {
    let signed = transaction.signed_amount();
    Row::new(vec![
        Cell::from(utils::fmt_date(transaction.date)),
        Cell::from(transaction.description.as_str()),
        Cell::from(transaction.category.name()),
        Cell::from(transaction.kind.name()),
        Cell::from(Text::from(utils::fmt_signed_currency(signed, currency)).right_aligned())
            .style(Style::default().fg(palette.amount_color(signed.cents()))),
    ])
}
