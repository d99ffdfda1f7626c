//! Placeholder panels shown where ledger data would otherwise go.

use ratatui::prelude::Rect;
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::components::help_bar::{self, KeyHint};
use crate::ui::theme::Palette;
use moneymap_ledger::Ledger;

/// Why a panel has nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoTransactions,
    /// Transactions exist but none of them are expenses
    NoExpenses,
    /// The stored session is still being read
    Restoring,
}

impl Placeholder {
    /// Placeholder for an empty per-category expense breakdown
    pub fn for_breakdown(ledger: &Ledger) -> Self {
        if ledger.is_empty() {
            Self::NoTransactions
        } else {
            Self::NoExpenses
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NoTransactions => "No transactions yet",
            Self::NoExpenses => "Only income so far",
            Self::Restoring => "Restoring your session...",
        }
    }

    pub fn hint(&self) -> Option<KeyHint> {
        match self {
            Self::NoTransactions => Some(("a", "Add your first transaction")),
            Self::NoExpenses => Some(("a", "Record an expense")),
            Self::Restoring => None,
        }
    }
}

pub fn render_placeholder(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    placeholder: Placeholder,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(placeholder.message(), palette.loading_style())),
    ];

    if let Some(hint) = placeholder.hint() {
        lines.push(Line::from(""));
        lines.push(help_bar::hint_line(
            &[hint],
            palette,
            area.width.saturating_sub(2),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneymap_ledger::{fixtures, Amount, InsertPosition, NewTransaction, TransactionKind};

    #[test]
    fn test_breakdown_placeholder_depends_on_ledger() {
        let mut ledger = Ledger::new();
        assert_eq!(Placeholder::for_breakdown(&ledger), Placeholder::NoTransactions);

        let salary = NewTransaction::new(
            "Salary",
            Amount::from_major(3000),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        )
        .kind(TransactionKind::Income);
        ledger.add(salary, InsertPosition::Back).unwrap();
        assert_eq!(Placeholder::for_breakdown(&ledger), Placeholder::NoExpenses);

        assert!(!fixtures::starter_ledger().category_breakdown().is_empty());
    }

    #[test]
    fn test_only_restoring_has_no_hint() {
        assert_eq!(Placeholder::Restoring.hint(), None);
        assert_eq!(
            Placeholder::NoTransactions.hint(),
            Some(("a", "Add your first transaction"))
        );
    }
}
