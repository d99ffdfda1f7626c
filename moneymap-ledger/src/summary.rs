//! Pure folds over a slice of transactions.
//!
//! Nothing here is cached: callers recompute on every render, which is cheap
//! for the list sizes a personal ledger holds.

use crate::amount::Amount;
use crate::category::Category;
use crate::transaction::{Transaction, TransactionKind};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

/// Headline totals shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub balance: Amount,
}

impl Summary {
    pub fn of(transactions: &[Transaction]) -> Self {
        let total_income = total_for(transactions, TransactionKind::Income);
        let total_expense = total_for(transactions, TransactionKind::Expense);
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}

/// Income and expense inside one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    /// First day of the month
    pub month: NaiveDate,
    pub income: Amount,
    pub expense: Amount,
}

impl MonthlyTotals {
    /// Short month label, e.g. "Jun"
    pub fn label(&self) -> String {
        self.month.format("%b").to_string()
    }

    pub fn net(&self) -> Amount {
        self.income - self.expense
    }
}

pub fn total_for(transactions: &[Transaction], kind: TransactionKind) -> Amount {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn total_income(transactions: &[Transaction]) -> Amount {
    total_for(transactions, TransactionKind::Income)
}

pub fn total_expense(transactions: &[Transaction]) -> Amount {
    total_for(transactions, TransactionKind::Expense)
}

pub fn balance(transactions: &[Transaction]) -> Amount {
    total_income(transactions) - total_expense(transactions)
}

/// Expense totals per category. Categories without expenses are absent.
pub fn category_breakdown(transactions: &[Transaction]) -> BTreeMap<Category, Amount> {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(BTreeMap::new(), |mut acc, t| {
            *acc.entry(t.category).or_insert(Amount::ZERO) += t.amount;
            acc
        })
}

/// Totals for the `months` calendar months ending with the month of
/// `through`, oldest first. Months without activity are reported as zero.
pub fn monthly_totals(
    transactions: &[Transaction],
    months: usize,
    through: NaiveDate,
) -> Vec<MonthlyTotals> {
    let Some(last_month) = first_of_month(through) else {
        return Vec::new();
    };

    (0..months)
        .rev()
        .filter_map(|offset| last_month.checked_sub_months(Months::new(offset as u32)))
        .map(|month| {
            let in_month = |t: &&Transaction| {
                t.date.year() == month.year() && t.date.month() == month.month()
            };
            let income = transactions
                .iter()
                .filter(in_month)
                .filter(|t| t.is_income())
                .map(|t| t.amount)
                .sum();
            let expense = transactions
                .iter()
                .filter(in_month)
                .filter(|t| t.is_expense())
                .map(|t| t.amount)
                .sum();

            MonthlyTotals {
                month,
                income,
                expense,
            }
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::transaction::TransactionId;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn transaction(
        id: i64,
        amount: i64,
        kind: TransactionKind,
        category: Category,
        on: &str,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            description: format!("Transaction {id}"),
            amount: Amount::from_major(amount),
            kind,
            category,
            date: date(on),
        }
    }

    #[test]
    fn dashboard_fixture_totals() {
        let transactions = fixtures::dashboard_seed();
        let summary = Summary::of(&transactions);

        assert_eq!(summary.total_income, Amount::from_major(3000));
        assert_eq!(summary.total_expense, Amount::from_major(1350));
        assert_eq!(summary.balance, Amount::from_major(1650));

        let breakdown = category_breakdown(&transactions);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[&Category::Food], Amount::from_major(150));
        assert_eq!(breakdown[&Category::Housing], Amount::from_major(1200));
        assert!(!breakdown.contains_key(&Category::Salary));
    }

    #[test]
    fn empty_list_sums_to_zero() {
        let summary = Summary::of(&[]);
        assert_eq!(summary, Summary::default());
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn balance_can_go_negative() {
        let transactions = vec![
            transaction(1, 100, TransactionKind::Income, Category::Work, "2025-01-02"),
            transaction(2, 250, TransactionKind::Expense, Category::Bills, "2025-01-03"),
        ];
        assert_eq!(balance(&transactions), Amount::from_major(-150));
    }

    #[test]
    fn breakdown_groups_repeated_categories() {
        let transactions = vec![
            transaction(1, 10, TransactionKind::Expense, Category::Food, "2025-01-02"),
            transaction(2, 15, TransactionKind::Expense, Category::Food, "2025-01-03"),
            transaction(3, 99, TransactionKind::Income, Category::Food, "2025-01-04"),
        ];
        let breakdown = category_breakdown(&transactions);
        assert_eq!(breakdown[&Category::Food], Amount::from_major(25));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let transactions = fixtures::transactions_seed();
        assert_eq!(Summary::of(&transactions), Summary::of(&transactions));
        assert_eq!(
            category_breakdown(&transactions),
            category_breakdown(&transactions)
        );
    }

    #[test]
    fn monthly_totals_cover_trailing_months_oldest_first() {
        let transactions = vec![
            transaction(1, 3000, TransactionKind::Income, Category::Salary, "2023-06-01"),
            transaction(2, 1200, TransactionKind::Expense, Category::Housing, "2023-06-05"),
            transaction(3, 40, TransactionKind::Expense, Category::Food, "2023-04-18"),
            transaction(4, 999, TransactionKind::Expense, Category::Food, "2022-12-31"),
        ];

        let months = monthly_totals(&transactions, 3, date("2023-06-20"));
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].month, date("2023-04-01"));
        assert_eq!(months[0].expense, Amount::from_major(40));
        assert_eq!(months[1].month, date("2023-05-01"));
        assert_eq!(months[1].income, Amount::ZERO);
        assert_eq!(months[2].label(), "Jun");
        assert_eq!(months[2].income, Amount::from_major(3000));
        assert_eq!(months[2].net(), Amount::from_major(1800));
    }

    #[test]
    fn monthly_totals_cross_year_boundary() {
        let months = monthly_totals(&[], 3, date("2024-01-15"));
        let labels: Vec<NaiveDate> = months.iter().map(|m| m.month).collect();
        assert_eq!(
            labels,
            vec![date("2023-11-01"), date("2023-12-01"), date("2024-01-01")]
        );
    }
}
