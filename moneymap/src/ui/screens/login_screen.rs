use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{EmailDialog, EmailDialogKind, LoginField, LoginState};
use crate::ui::components::{
    form_field::{self, Field},
    help_bar,
    popup::{self, PopupKind},
    screen_title, status_line,
};
use crate::ui::layouts::{self, ScreenAreas};
use crate::ui::theme::{Palette, FORM_FIELD_HEIGHT};

const FORM_WIDTH: u16 = 48;

pub fn render(f: &mut Frame, areas: &ScreenAreas, palette: &Palette, state: &LoginState) {
    screen_title::render_screen_title(
        f,
        areas.title,
        palette,
        "Sign in to your account",
        &state.form.submitting,
    );

    let column = layouts::centered_column(FORM_WIDTH, areas.content);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Notice
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(1), // Error
            Constraint::Length(1),
            Constraint::Length(4), // Actions
            Constraint::Min(0),
        ])
        .split(column);

    status_line::render_status(f, chunks[0], palette, state.notice.as_ref());

    let form = &state.form;
    let form_active = state.dialog.is_none();
    form_field::render_field(
        f,
        chunks[1],
        palette,
        &Field::text(
            "Email",
            &form.email,
            form_active && form.focus == LoginField::Email,
        ),
    );
    form_field::render_field(
        f,
        chunks[2],
        palette,
        &Field::secret(
            "Password",
            &form.password,
            form_active && form.focus == LoginField::Password,
        ),
    );
    form_field::render_form_error(f, chunks[3], palette, form.error.as_deref());

    let submit = if form.submitting.is_loading() {
        "Signing in..."
    } else {
        "Enter  Sign in"
    };
    let actions = Paragraph::new(vec![
        Line::from(Span::styled(submit, palette.header_style())),
        Line::from(Span::styled(
            "Ctrl+G  Continue with Google",
            palette.form_field_style(),
        )),
        Line::from(Span::styled(
            "Ctrl+R  Forgot password?",
            palette.help_text_style(),
        )),
        Line::from(Span::styled(
            "Ctrl+N  Don't have an account? Sign up",
            palette.help_text_style(),
        )),
    ]);
    f.render_widget(actions, chunks[5]);

    if let Some(dialog) = &state.dialog {
        render_email_dialog(f, palette, dialog);
    }

    help_bar::render_help_bar(f, areas.help, palette, help_bar::SIGN_IN_HINTS);
}

fn render_email_dialog(f: &mut Frame, palette: &Palette, dialog: &EmailDialog) {
    let (title, prompt, action) = match dialog.kind {
        EmailDialogKind::Google => (
            "Sign in with Google",
            "Enter the email of your Google account",
            "Continue",
        ),
        EmailDialogKind::PasswordReset => (
            "Reset Password",
            "We will send a reset link to this address",
            "Send reset link",
        ),
    };

    let inner = popup::render_popup_frame(f, palette, PopupKind::EmailPrompt, title);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(1), // Error
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(prompt, palette.help_text_style())),
        chunks[0],
    );
    form_field::render_field(
        f,
        chunks[1],
        palette,
        &Field::text("Email", &dialog.email, true),
    );
    form_field::render_form_error(f, chunks[2], palette, dialog.error.as_deref());

    let hint = if dialog.submitting.is_loading() {
        Line::from(Span::styled("Please wait...", palette.loading_style()))
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", palette.header_style()),
            Span::raw(format!("{}  ", action)),
            Span::styled("[Esc]", palette.help_text_style()),
            Span::raw(" Cancel"),
        ])
    };
    f.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::NONE)),
        chunks[3],
    );
}
