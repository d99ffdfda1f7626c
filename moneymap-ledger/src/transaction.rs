use crate::amount::Amount;
use crate::category::Category;
use crate::error::LedgerError;
use crate::macros::setter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with expenses negated, as it affects the balance
    pub fn signed_amount(&self) -> Amount {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => Amount::ZERO - self.amount,
        }
    }
}

/// A transaction that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// An expense in the default category; adjust with the setters
    pub fn new(description: impl Into<String>, amount: Amount, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            kind: TransactionKind::default(),
            category: Category::default(),
            date,
        }
    }

    setter!(kind: TransactionKind);
    setter!(category: Category);

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyDescription);
        }
        if !self.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount);
        }
        if self.amount.exceeds_max() {
            return Err(LedgerError::AmountTooLarge);
        }
        Ok(())
    }

    pub(crate) fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            date: self.date,
        }
    }
}

/// Parse an ISO calendar date (`YYYY-MM-DD`)
pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn new_transaction_defaults_to_food_expense() {
        let draft = NewTransaction::new("Lunch", Amount::from_major(12), date("2025-07-01"));
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.category, Category::Food);

        let draft = draft.kind(TransactionKind::Income).category(Category::Work);
        assert_eq!(draft.kind, TransactionKind::Income);
        assert_eq!(draft.category, Category::Work);
    }

    #[test]
    fn validate_rejects_blank_description_and_non_positive_amount() {
        let blank = NewTransaction::new("   ", Amount::from_major(5), date("2025-07-01"));
        assert_eq!(blank.validate(), Err(LedgerError::EmptyDescription));

        let zero = NewTransaction::new("Coffee", Amount::ZERO, date("2025-07-01"));
        assert_eq!(zero.validate(), Err(LedgerError::NonPositiveAmount));

        let negative = NewTransaction::new("Coffee", Amount::from_cents(-1), date("2025-07-01"));
        assert_eq!(negative.validate(), Err(LedgerError::NonPositiveAmount));

        let ok = NewTransaction::new("Coffee", Amount::from_cents(1), date("2025-07-01"));
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn validate_caps_amount_at_max() {
        let at_max = NewTransaction::new("Windfall", Amount::MAX, date("2025-07-01"));
        assert_eq!(at_max.validate(), Ok(()));

        let over = NewTransaction::new(
            "Windfall",
            Amount::MAX + Amount::from_cents(1),
            date("2025-07-01"),
        );
        assert_eq!(over.validate(), Err(LedgerError::AmountTooLarge));
    }

    #[test]
    fn serializes_kind_under_type_key() {
        let transaction = NewTransaction::new("Salary", Amount::from_major(3000), date("2023-06-01"))
            .kind(TransactionKind::Income)
            .category(Category::Salary)
            .into_transaction(TransactionId::new(2));

        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["category"], "Salary");
        assert_eq!(json["amount"], 300000);
        assert_eq!(json["date"], "2023-06-01");

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, transaction);
    }

    #[test]
    fn signed_amount_negates_expenses() {
        let expense = NewTransaction::new("Rent", Amount::from_major(1200), date("2023-06-05"))
            .into_transaction(TransactionId::new(3));
        assert_eq!(expense.signed_amount(), Amount::from_major(-1200));
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2025-07-24").unwrap(), date("2025-07-24"));
        assert_eq!(
            parse_date("07/24/2025"),
            Err(LedgerError::InvalidDate("07/24/2025".to_string()))
        );
    }
}
