//! Seed data for a ledger that has never been saved.

use crate::amount::Amount;
use crate::category::Category;
use crate::ledger::Ledger;
use crate::transaction::{Transaction, TransactionId, TransactionKind};
use chrono::NaiveDate;

fn seed(
    id: i64,
    description: &str,
    cents: i64,
    kind: TransactionKind,
    category: Category,
    (year, month, day): (i32, u32, u32),
) -> Option<Transaction> {
    Some(Transaction {
        id: TransactionId::new(id),
        description: description.to_string(),
        amount: Amount::from_cents(cents),
        kind,
        category,
        date: NaiveDate::from_ymd_opt(year, month, day)?,
    })
}

/// The three entries the dashboard starts with
pub fn dashboard_seed() -> Vec<Transaction> {
    use TransactionKind::*;
    [
        seed(1, "Grocery", 15_000, Expense, Category::Food, (2023, 6, 15)),
        seed(2, "Salary", 300_000, Income, Category::Salary, (2023, 6, 1)),
        seed(3, "Rent", 120_000, Expense, Category::Housing, (2023, 6, 5)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Recent activity shown on the transaction page of a new account
pub fn transactions_seed() -> Vec<Transaction> {
    use TransactionKind::*;
    [
        seed(4, "Grocery Shopping", 12_575, Expense, Category::Food, (2025, 7, 24)),
        seed(5, "Freelance Work", 50_000, Income, Category::Work, (2025, 7, 23)),
        seed(6, "Electric Bill", 8_530, Expense, Category::Utilities, (2025, 7, 20)),
        seed(7, "Restaurant", 4_590, Expense, Category::Food, (2025, 7, 19)),
        seed(8, "Online Course", 19_999, Expense, Category::Education, (2025, 7, 15)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Ledger given to a user with nothing saved yet
pub fn starter_ledger() -> Ledger {
    let mut transactions = transactions_seed();
    transactions.extend(dashboard_seed());
    Ledger::from_transactions(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn starter_ledger_ids_are_distinct() {
        let ledger = starter_ledger();
        assert_eq!(ledger.len(), 8);

        let ids: HashSet<TransactionId> = ledger.transactions().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), ledger.len());
    }

    #[test]
    fn transactions_seed_totals() {
        let ledger = Ledger::from_transactions(transactions_seed());
        assert_eq!(ledger.total_income(), Amount::from_cents(50_000));
        assert_eq!(ledger.total_expense(), Amount::from_cents(45_694));
        assert_eq!(
            ledger.category_breakdown()[&Category::Food],
            Amount::from_cents(17_165)
        );
    }
}
