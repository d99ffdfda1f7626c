use crate::amount::Amount;
use crate::category::Category;
use crate::error::LedgerError;
use crate::summary::{self, MonthlyTotals, Summary};
use crate::transaction::{NewTransaction, Transaction, TransactionId};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a newly added transaction lands in the list.
///
/// This is a view-level choice: the transaction page shows newest entries
/// first, the dashboard appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Front,
    Back,
}

/// Ordered list of transactions. List order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Validate and insert a transaction, stamping it with a fresh id.
    ///
    /// A rejected draft leaves the list untouched.
    pub fn add(
        &mut self,
        draft: NewTransaction,
        position: InsertPosition,
    ) -> Result<&Transaction, LedgerError> {
        self.add_at(draft, position, Utc::now().timestamp_millis())
    }

    /// Same as [`Ledger::add`] with an explicit clock reading in milliseconds
    pub fn add_at(
        &mut self,
        draft: NewTransaction,
        position: InsertPosition,
        now_millis: i64,
    ) -> Result<&Transaction, LedgerError> {
        draft.validate()?;

        let id = self.next_id(now_millis);
        let transaction = draft.into_transaction(id);

        let index = match position {
            InsertPosition::Front => {
                self.transactions.insert(0, transaction);
                0
            }
            InsertPosition::Back => {
                self.transactions.push(transaction);
                self.transactions.len() - 1
            }
        };

        Ok(&self.transactions[index])
    }

    /// Timestamp-based id that never collides with an existing one, even
    /// when two transactions are added within the same millisecond
    fn next_id(&self, now_millis: i64) -> TransactionId {
        let highest = self.transactions.iter().map(|t| t.id.inner()).max();
        match highest {
            Some(highest) if highest >= now_millis => TransactionId::new(highest + 1),
            _ => TransactionId::new(now_millis),
        }
    }

    /// Display order: most recent date first, ties keep list order
    pub fn by_date_desc(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.transactions)
    }

    pub fn total_income(&self) -> Amount {
        summary::total_income(&self.transactions)
    }

    pub fn total_expense(&self) -> Amount {
        summary::total_expense(&self.transactions)
    }

    pub fn balance(&self) -> Amount {
        summary::balance(&self.transactions)
    }

    pub fn category_breakdown(&self) -> BTreeMap<Category, Amount> {
        summary::category_breakdown(&self.transactions)
    }

    pub fn monthly_totals(&self, months: usize, through: NaiveDate) -> Vec<MonthlyTotals> {
        summary::monthly_totals(&self.transactions, months, through)
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self::from_transactions(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::transaction::TransactionKind;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(description: &str, cents: i64) -> NewTransaction {
        NewTransaction::new(description, Amount::from_cents(cents), date("2025-07-25"))
    }

    #[test]
    fn add_prepends_or_appends() {
        let mut ledger = Ledger::from_transactions(fixtures::dashboard_seed());

        ledger
            .add_at(draft("Coffee", 450), InsertPosition::Front, 10_000)
            .unwrap();
        ledger
            .add_at(draft("Books", 2000), InsertPosition::Back, 10_001)
            .unwrap();

        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.transactions()[0].description, "Coffee");
        assert_eq!(ledger.transactions()[4].description, "Books");
    }

    #[test]
    fn add_rejects_invalid_drafts_without_changing_length() {
        let mut ledger = Ledger::from_transactions(fixtures::dashboard_seed());

        assert_eq!(
            ledger.add_at(draft("", 450), InsertPosition::Back, 1),
            Err(LedgerError::EmptyDescription)
        );
        assert_eq!(
            ledger.add_at(draft("Coffee", 0), InsertPosition::Front, 1),
            Err(LedgerError::NonPositiveAmount)
        );
        assert_eq!(
            ledger.add_at(draft("Coffee", -100), InsertPosition::Front, 1),
            Err(LedgerError::NonPositiveAmount)
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn ids_stay_distinct_within_the_same_millisecond() {
        let mut ledger = Ledger::new();
        let first = ledger
            .add_at(draft("One", 100), InsertPosition::Back, 5_000)
            .unwrap()
            .id;
        let second = ledger
            .add_at(draft("Two", 100), InsertPosition::Back, 5_000)
            .unwrap()
            .id;
        let third = ledger
            .add_at(draft("Three", 100), InsertPosition::Back, 4_000)
            .unwrap()
            .id;

        assert_eq!(first, TransactionId::new(5_000));
        assert_eq!(second, TransactionId::new(5_001));
        assert_eq!(third, TransactionId::new(5_002));
    }

    #[test]
    fn added_description_is_trimmed() {
        let mut ledger = Ledger::new();
        let added = ledger
            .add_at(draft("  Lunch  ", 1200), InsertPosition::Back, 1)
            .unwrap();
        assert_eq!(added.description, "Lunch");
    }

    #[test]
    fn by_date_desc_sorts_without_touching_list_order() {
        let ledger = Ledger::from_transactions(fixtures::dashboard_seed());
        let dates: Vec<NaiveDate> = ledger.by_date_desc().iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![date("2023-06-15"), date("2023-06-05"), date("2023-06-01")]
        );
        assert_eq!(ledger.transactions()[0].description, "Grocery");
    }

    #[test]
    fn totals_track_additions() {
        let mut ledger = Ledger::from_transactions(fixtures::dashboard_seed());
        ledger
            .add_at(
                draft("Bonus", 50_000).kind(TransactionKind::Income),
                InsertPosition::Back,
                1,
            )
            .unwrap();

        assert_eq!(ledger.total_income(), Amount::from_major(3500));
        assert_eq!(ledger.total_expense(), Amount::from_major(1350));
        assert_eq!(ledger.balance(), Amount::from_major(2150));
        assert_eq!(ledger.summary().balance, ledger.balance());
    }

    #[test]
    fn add_rejects_amounts_above_max() {
        let mut ledger = Ledger::new();
        let huge = Amount::parse("92233720368547758");
        assert_eq!(huge, Err(LedgerError::AmountTooLarge));

        let over = NewTransaction::new(
            "Lottery",
            Amount::MAX + Amount::from_cents(1),
            date("2025-07-25"),
        );
        assert_eq!(
            ledger.add_at(over, InsertPosition::Back, 1),
            Err(LedgerError::AmountTooLarge)
        );
        assert!(ledger.is_empty());

        for at in [1, 2] {
            let windfall = NewTransaction::new("Lottery", Amount::MAX, date("2025-07-25"))
                .kind(TransactionKind::Income);
            ledger.add_at(windfall, InsertPosition::Back, at).unwrap();
        }
        assert_eq!(ledger.total_income(), Amount::from_cents(2_000_000_000_000));
        assert_eq!(ledger.balance(), ledger.total_income());
    }

    #[test]
    fn totals_over_unvalidated_stored_amounts_saturate() {
        let huge = Amount::from_cents(i64::MAX / 2 + 1);
        let stored = |id: i64, kind: TransactionKind| {
            NewTransaction::new("Imported", huge, date("2025-07-25"))
                .kind(kind)
                .category(Category::Other)
                .into_transaction(TransactionId::new(id))
        };
        let ledger = Ledger::from_transactions(vec![
            stored(1, TransactionKind::Income),
            stored(2, TransactionKind::Income),
            stored(3, TransactionKind::Expense),
            stored(4, TransactionKind::Expense),
            stored(5, TransactionKind::Expense),
        ]);

        assert_eq!(ledger.total_income().cents(), i64::MAX);
        assert_eq!(ledger.total_expense().cents(), i64::MAX);
        assert_eq!(ledger.balance(), Amount::ZERO);
        assert_eq!(ledger.category_breakdown()[&Category::Other].cents(), i64::MAX);

        let months = ledger.monthly_totals(1, date("2025-07-31"));
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].income.cents(), i64::MAX);
        assert_eq!(months[0].net(), Amount::ZERO);
    }
}
