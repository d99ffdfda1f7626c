use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::appearance::ThemeSnapshot;
use crate::state::{
    PasswordField, PasswordForm, PreferenceField, ProfileField, ProfileForm, SettingsState,
    SettingsTab,
};
use crate::ui::components::{
    confirmation,
    form_field::{self, Field},
    help_bar::{self, KeyHint},
    popup::{self, PopupKind},
    screen_title, status_line,
};
use crate::ui::layouts::ScreenAreas;
use crate::ui::theme::{Palette, FORM_FIELD_HEIGHT};

pub fn render(
    f: &mut Frame,
    areas: &ScreenAreas,
    palette: &Palette,
    state: &SettingsState,
    appearance: &ThemeSnapshot,
) {
    screen_title::render_screen_title(f, areas.title, palette, "Settings", &state.saving);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // Status
            Constraint::Min(0),
        ])
        .split(areas.content);

    let selected = SettingsTab::ALL
        .iter()
        .position(|tab| *tab == state.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(SettingsTab::ALL.iter().map(|tab| tab.title()))
        .select(selected)
        .style(palette.form_field_style())
        .highlight_style(palette.selection_style())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(tabs, chunks[0]);

    status_line::render_status(f, chunks[1], palette, state.status.as_ref());

    match state.tab {
        SettingsTab::Profile => match &state.profile_form {
            Some(form) => render_profile_form(f, chunks[2], palette, form),
            None => render_profile(f, chunks[2], palette, state),
        },
        SettingsTab::Preferences => render_preferences(f, chunks[2], palette, state, appearance),
        SettingsTab::Security => render_security(f, chunks[2], palette),
    }

    if let Some(dialog) = &state.password_dialog {
        render_password_dialog(f, palette, dialog);
    }
    if state.confirm_sign_out {
        confirmation::render_sign_out_confirmation(f, palette);
    }

    help_bar::render_help_bar(f, areas.help, palette, help_text(state));
}

fn help_text(state: &SettingsState) -> &'static [KeyHint] {
    if state.password_dialog.is_some() {
        return &[
            ("Tab", "Next field"),
            ("Enter", "Update password"),
            ("Esc", "Cancel"),
        ];
    }
    match state.tab {
        SettingsTab::Profile if state.profile_form.is_some() => {
            &[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Cancel")]
        }
        SettingsTab::Profile => &[
            ("Tab", "Switch tab"),
            ("e", "Edit profile"),
            ("?", "Help"),
        ],
        SettingsTab::Preferences => &[
            ("j/k", "Select"),
            ("←/→", "Change"),
            ("s", "Save"),
            ("Tab", "Switch tab"),
        ],
        SettingsTab::Security => &[
            ("p", "Change password"),
            ("o", "Sign out"),
            ("Tab", "Switch tab"),
        ],
    }
}

fn render_profile(f: &mut Frame, area: Rect, palette: &Palette, state: &SettingsState) {
    let profile = &state.profile;
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:14}", label), palette.header_style()),
            Span::styled(value, palette.form_field_style()),
        ])
    };

    let lines = vec![
        row("Name", or_dash(&profile.name)),
        row("Email", or_dash(&profile.email)),
        row("Phone", or_dash(&profile.phone)),
        row("Location", or_dash(&profile.location)),
        row("Bio", or_dash(&profile.bio)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Member since {}", profile.member_since()),
            palette.help_text_style(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Profile")),
        area,
    );
}

fn render_profile_form(f: &mut Frame, area: Rect, palette: &Palette, form: &ProfileForm) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.accent_border_style())
        .title("Edit Profile");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(FORM_FIELD_HEIGHT); 5];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let fields = [
        Field::text("Full name", &form.name, form.focus == ProfileField::Name),
        Field::text("Email", &form.email, form.focus == ProfileField::Email),
        Field::text("Phone", &form.phone, form.focus == ProfileField::Phone),
        Field::text(
            "Location",
            &form.location,
            form.focus == ProfileField::Location,
        ),
        Field::text("Bio", &form.bio, form.focus == ProfileField::Bio),
    ];
    for (field, area) in fields.iter().zip(chunks.iter()) {
        form_field::render_field(f, *area, palette, field);
    }
    form_field::render_form_error(f, chunks[5], palette, form.error.as_deref());
}

fn render_preferences(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    state: &SettingsState,
    appearance: &ThemeSnapshot,
) {
    let block = Block::default().borders(Borders::ALL).title("Preferences");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &state.preferences;
    let currency = form.settings.currency.to_string();
    let notifications = if form.settings.notifications {
        "On"
    } else {
        "Off"
    };
    form_field::render_field(
        f,
        chunks[0],
        palette,
        &Field::choice(
            "Currency",
            &currency,
            form.focus == PreferenceField::Currency,
        ),
    );
    form_field::render_field(
        f,
        chunks[1],
        palette,
        &Field::choice(
            "Notifications",
            notifications,
            form.focus == PreferenceField::Notifications,
        ),
    );

    let theme_line = format!(
        "Theme: {} (showing {}). Press t to change.",
        appearance.preference,
        if appearance.effective().is_dark() {
            "dark"
        } else {
            "light"
        }
    );
    f.render_widget(
        Paragraph::new(Span::styled(theme_line, palette.help_text_style())),
        chunks[2],
    );
}

fn render_security(f: &mut Frame, area: Rect, palette: &Palette) {
    let lines = vec![
        Line::from(vec![
            Span::styled("[p] ", palette.header_style()),
            Span::raw("Change password"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("[o] ", palette.error_style()),
            Span::raw("Sign out of this device"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Security")),
        area,
    );
}

fn render_password_dialog(f: &mut Frame, palette: &Palette, form: &PasswordForm) {
    let inner = popup::render_popup_frame(f, palette, PopupKind::Form, "Change Password");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(FORM_FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields = [
        Field::secret(
            "Current password",
            &form.current,
            form.focus == PasswordField::Current,
        ),
        Field::secret(
            "New password",
            &form.new_password,
            form.focus == PasswordField::New,
        ),
        Field::secret(
            "Confirm new password",
            &form.confirm,
            form.focus == PasswordField::Confirm,
        ),
    ];
    for (field, area) in fields.iter().zip(chunks.iter()) {
        form_field::render_field(f, *area, palette, field);
    }
    form_field::render_form_error(f, chunks[3], palette, form.error.as_deref());
}
