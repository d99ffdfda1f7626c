//! The add-transaction form, shared by the dashboard panel and the
//! transactions dialog.

use ratatui::prelude::Rect;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::state::{TransactionField, TransactionForm};
use crate::ui::components::form_field::{self, Field};
use crate::ui::theme::{Palette, FORM_FIELD_HEIGHT};

/// Rows needed to draw the whole form
pub const FORM_HEIGHT: u16 = FORM_FIELD_HEIGHT * 3 + 1;

/// Draw the form; `active` is false when it is shown but not taking keys
pub fn render_transaction_form(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    form: &TransactionForm,
    active: bool,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(1), // Error row
            Constraint::Min(0),
        ])
        .split(area);

    let halves = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let focused = |field: TransactionField| active && form.focus == field;

    form_field::render_field(
        f,
        rows[0],
        palette,
        &Field::text(
            "Description",
            &form.description,
            focused(TransactionField::Description),
        ),
    );

    let second = halves(rows[1]);
    form_field::render_field(
        f,
        second[0],
        palette,
        &Field::text("Amount", &form.amount, focused(TransactionField::Amount)),
    );
    form_field::render_field(
        f,
        second[1],
        palette,
        &Field::choice("Type", form.kind.name(), focused(TransactionField::Kind)),
    );

    let third = halves(rows[2]);
    form_field::render_field(
        f,
        third[0],
        palette,
        &Field::choice(
            "Category",
            form.category.name(),
            focused(TransactionField::Category),
        ),
    );
    form_field::render_field(
        f,
        third[1],
        palette,
        &Field::text(
            "Date (YYYY-MM-DD)",
            &form.date,
            focused(TransactionField::Date),
        ),
    );

    form_field::render_form_error(f, rows[3], palette, form.error.as_deref());
}
