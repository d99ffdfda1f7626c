use ratatui::{
    prelude::*,
    text::Text,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::preferences::Currency;
use crate::state::{DashboardState, LoadingState};
use crate::ui::components::empty_state::{self, Placeholder};
use crate::ui::components::{help_bar, screen_title, transaction_form};
use crate::ui::layouts::ScreenAreas;
use crate::ui::theme::{Palette, SUMMARY_CARD_HEIGHT};
use crate::ui::utils;
use moneymap_ledger::Amount;

/// Months shown in the monthly totals table
pub const MONTHS_SHOWN: usize = 6;

const BAR_WIDTH: usize = 20;

pub fn render(
    f: &mut Frame,
    areas: &ScreenAreas,
    palette: &Palette,
    state: &DashboardState,
    currency: Currency,
) {
    screen_title::render_screen_title(
        f,
        areas.title,
        palette,
        "Dashboard",
        &LoadingState::NotStarted,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_CARD_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(transaction_form::FORM_HEIGHT + 2),
        ])
        .split(areas.content);

    render_summary_cards(f, rows[0], palette, state, currency);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    render_breakdown(f, middle[0], palette, state, currency);
    render_monthly_totals(f, middle[1], palette, state, currency);

    render_quick_add(f, rows[2], palette, state);

    if state.form_focused {
        let hints = help_bar::transaction_form_hints("Save", "Done");
        help_bar::render_help_bar(f, areas.help, palette, &hints);
    } else {
        let hints = [("a", "Add transaction"), ("?", "Help")];
        help_bar::render_help_bar(f, areas.help, palette, &hints);
    }
}

fn render_summary_cards(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &DashboardState,
    currency: Currency,
) {
    let summary = state.ledger.summary();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let entries = [
        ("Total Income", summary.total_income, palette.positive),
        ("Total Expenses", summary.total_expense, palette.negative),
        (
            "Balance",
            summary.balance,
            palette.amount_color(summary.balance.cents()),
        ),
    ];

    for ((title, amount, color), card) in entries.into_iter().zip(cards.iter()) {
        let paragraph = Paragraph::new(Span::styled(
            utils::fmt_currency(amount, currency),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, *card);
    }
}

fn render_breakdown(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &DashboardState,
    currency: Currency,
) {
    let breakdown = state.ledger.category_breakdown();
    if breakdown.is_empty() {
        empty_state::render_placeholder(
            f,
            area,
            palette,
            "Expenses by Category",
            Placeholder::for_breakdown(&state.ledger),
        );
        return;
    }

    let largest = breakdown
        .values()
        .map(Amount::cents)
        .max()
        .unwrap_or(1)
        .max(1);

    let rows: Vec<Row> = breakdown
        .iter()
        .map(|(category, amount)| {
            Row::new(vec![
                Cell::from(category.name()),
                Cell::from(bar(amount.cents(), largest)).style(Style::default().fg(palette.negative)),
                Cell::from(Text::from(utils::fmt_currency(*amount, currency)).right_aligned()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Length(BAR_WIDTH as u16),
            Constraint::Min(10),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Expenses by Category"),
    );
    f.render_widget(table, area);
}

fn bar(value: i64, largest: i64) -> String {
    let filled = ((value.max(0) as f64 / largest as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.max(1))
}

fn render_monthly_totals(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &DashboardState,
    currency: Currency,
) {
    let months = state
        .ledger
        .monthly_totals(MONTHS_SHOWN, state.monthly_totals_through());

    let header = Row::new(vec![
        Cell::from("Month"),
        Cell::from(Text::from("Income").right_aligned()),
        Cell::from(Text::from("Expenses").right_aligned()),
        Cell::from(Text::from("Net").right_aligned()),
    ])
    .style(palette.header_style())
    .underlined();

    let rows: Vec<Row> = months
        .iter()
        .map(|month| {
            let net = month.net();
            Row::new(vec![
                Cell::from(month.label()),
                Cell::from(Text::from(utils::fmt_currency(month.income, currency)).right_aligned())
                    .style(Style::default().fg(palette.positive)),
                Cell::from(
                    Text::from(utils::fmt_currency(month.expense, currency)).right_aligned(),
                )
                .style(Style::default().fg(palette.negative)),
                Cell::from(Text::from(utils::fmt_signed_currency(net, currency)).right_aligned())
                    .style(Style::default().fg(palette.amount_color(net.cents()))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Monthly Totals"));
    f.render_widget(table, area);
}

fn render_quick_add(f: &mut Frame, area: Rect, palette: &Palette, state: &DashboardState) {
    let border_style = if state.form_focused {
        palette.accent_border_style()
    } else {
        palette.help_text_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Add Transaction");
    let inner = block.inner(area);
    f.render_widget(block, area);

    transaction_form::render_transaction_form(f, inner, palette, &state.form, state.form_focused);
}
