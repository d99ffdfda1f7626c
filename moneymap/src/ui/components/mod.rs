pub mod confirmation;
pub mod empty_state;
pub mod form_field;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod navbar;
pub mod popup;
pub mod screen_title;
pub mod status_line;
pub mod transaction_form;
