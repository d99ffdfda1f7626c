use ratatui::{prelude::*, widgets::Paragraph};

use crate::state::{RegisterField, RegisterState};
use crate::ui::components::{
    form_field::{self, Field},
    help_bar, screen_title,
};
use crate::ui::layouts::{self, ScreenAreas};
use crate::ui::theme::{Palette, FORM_FIELD_HEIGHT};

const FORM_WIDTH: u16 = 48;

pub fn render(f: &mut Frame, areas: &ScreenAreas, palette: &Palette, state: &RegisterState) {
    let form = &state.form;
    screen_title::render_screen_title(
        f,
        areas.title,
        palette,
        "Create your account",
        &form.submitting,
    );

    let column = layouts::centered_column(FORM_WIDTH, areas.content);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(1), // Error
            Constraint::Length(2), // Actions
            Constraint::Min(0),
        ])
        .split(column);

    let fields = [
        Field::text("Full name", &form.name, form.focus == RegisterField::Name),
        Field::text("Email", &form.email, form.focus == RegisterField::Email),
        Field::secret(
            "Password",
            &form.password,
            form.focus == RegisterField::Password,
        ),
        Field::secret(
            "Confirm password",
            &form.confirm,
            form.focus == RegisterField::Confirm,
        ),
    ];
    for (field, area) in fields.iter().zip(chunks.iter()) {
        form_field::render_field(f, *area, palette, field);
    }
    form_field::render_form_error(f, chunks[4], palette, form.error.as_deref());

    let submit = if form.submitting.is_loading() {
        "Creating account..."
    } else {
        "Enter  Sign up"
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(submit, palette.header_style())),
            Line::from(Span::styled(
                "Esc  Already have an account? Go back",
                palette.help_text_style(),
            )),
        ]),
        chunks[5],
    );

    help_bar::render_help_bar(f, areas.help, palette, help_bar::REGISTER_HINTS);
}
