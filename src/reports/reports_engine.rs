use chrono::Datelike;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::categories::ClassificationType;
use crate::constants::{
    NON_CASHFLOW_EXPENSE_CATEGORY, NON_CASHFLOW_INCOME_CATEGORY, SPARKLINE_WEEK_BUCKETS,
};
use crate::reports::reports_model::{
    AccountFilter, CashflowPartition, ChangeDirection, ClassificationFilter, ExpenseBreakdown,
    IncomeBreakdown, MonthChange, MonthlySummary, NonCashflowTotals, WeekGroup,
};
use crate::transactions::Transaction;

/// Keeps transactions belonging to the target month and account.
pub fn filter_for_month(
    transactions: &[Transaction],
    month: &str,
    account: &AccountFilter,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.month == month && account.matches(t.source_id.as_deref()))
        .cloned()
        .collect()
}

/// Splits transactions into the cashflow set every summary consumes and the
/// excluded non-cashflow remainder.
pub fn partition_cashflow(transactions: Vec<Transaction>) -> CashflowPartition {
    let (non_cashflow, cashflow): (Vec<Transaction>, Vec<Transaction>) =
        transactions.into_iter().partition(|t| t.is_non_cashflow);
    CashflowPartition {
        cashflow,
        non_cashflow,
    }
}

/// Headline income/expenses/balance plus the fixed breakdowns.
///
/// The classification filters narrow the headline numbers only. Breakdowns
/// are computed from the whole cashflow set so the drawer subtotals always
/// reflect true totals, whatever filter is active. Totals keep full
/// precision; view models round for display.
pub fn compute_summary(
    cashflow: &[Transaction],
    income_filter: &ClassificationFilter,
    expense_filter: &ClassificationFilter,
) -> MonthlySummary {
    let summarizable: Vec<&Transaction> = cashflow.iter().filter(|t| !t.is_non_cashflow).collect();

    let income: Decimal = summarizable
        .iter()
        .filter(|t| t.amount_decimal() > Decimal::ZERO)
        .filter(|t| income_filter.matches(t.income_classification()))
        .map(|t| t.amount_decimal())
        .sum();

    let expenses: Decimal = summarizable
        .iter()
        .filter(|t| t.amount_decimal() < Decimal::ZERO)
        .filter(|t| expense_filter.matches(t.expense_classification()))
        .map(|t| t.amount_decimal().abs())
        .sum();

    let classified_income = |wanted: ClassificationType| -> Decimal {
        summarizable
            .iter()
            .filter(|t| t.amount_decimal() > Decimal::ZERO && t.income_classification() == wanted)
            .map(|t| t.amount_decimal())
            .sum()
    };
    let classified_expense = |wanted: ClassificationType| -> Decimal {
        summarizable
            .iter()
            .filter(|t| t.amount_decimal() < Decimal::ZERO && t.expense_classification() == wanted)
            .map(|t| t.amount_decimal().abs())
            .sum()
    };

    MonthlySummary {
        income,
        expenses,
        balance: income - expenses,
        has_transactions: !summarizable.is_empty(),
        income_breakdown: IncomeBreakdown {
            expected: classified_income(ClassificationType::Expected),
            unexpected: classified_income(ClassificationType::Unexpected),
        },
        expense_breakdown: ExpenseBreakdown {
            fixed: classified_expense(ClassificationType::Expected),
            variable: classified_expense(ClassificationType::Unexpected),
        },
    }
}

/// Sums for the two dedicated non-cashflow buckets: positive amounts tagged
/// non_cashflow_income, absolute negative amounts tagged non_cashflow_expense.
pub fn non_cashflow_totals(non_cashflow: &[Transaction]) -> NonCashflowTotals {
    let income: Decimal = non_cashflow
        .iter()
        .filter(|t| t.category == NON_CASHFLOW_INCOME_CATEGORY)
        .map(|t| t.amount_decimal())
        .filter(|amount| *amount > Decimal::ZERO)
        .sum();

    let expense: Decimal = non_cashflow
        .iter()
        .filter(|t| t.category == NON_CASHFLOW_EXPENSE_CATEGORY)
        .map(|t| t.amount_decimal())
        .filter(|amount| *amount < Decimal::ZERO)
        .map(|amount| amount.abs())
        .sum();

    NonCashflowTotals { income, expense }
}

/// Absolute spend in one category; always non-negative. Non-cashflow rows
/// never count, whatever their category string claims.
pub fn spending_by_category(cashflow: &[Transaction], category: &str) -> Decimal {
    cashflow
        .iter()
        .filter(|t| !t.is_non_cashflow && t.category == category)
        .map(|t| t.amount_decimal())
        .filter(|amount| *amount < Decimal::ZERO)
        .map(|amount| amount.abs())
        .sum()
}

/// Week-of-month for a calendar day: `ceil(day / 7)`.
///
/// Weeks run 1..=5; days 29-31 land in week 5. The sparkline series clamps
/// week 5 into its fourth bucket so both views share one formula.
pub fn week_of_month(day: u32) -> u32 {
    day.div_ceil(7)
}

/// Buckets transactions into week-of-month groups with signed totals.
/// Transactions without a parseable date are skipped.
pub fn group_by_week(transactions: &[Transaction]) -> BTreeMap<u32, WeekGroup> {
    let mut weeks: BTreeMap<u32, WeekGroup> = BTreeMap::new();

    for transaction in transactions {
        let Some(date) = transaction.date_naive() else {
            continue;
        };
        let group = weeks.entry(week_of_month(date.day())).or_default();
        group.total_amount += transaction.amount_decimal();
        group.transactions.push(transaction.clone());
    }

    weeks
}

/// Direction of money a sparkline series tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparklineSeries {
    Income,
    Expense,
}

/// Fixed four-bucket weekly series for the dashboard sparklines.
pub fn weekly_totals(
    transactions: &[Transaction],
    series: SparklineSeries,
) -> Vec<Decimal> {
    let mut totals = vec![Decimal::ZERO; SPARKLINE_WEEK_BUCKETS];

    for transaction in transactions {
        let Some(date) = transaction.date_naive() else {
            continue;
        };
        let bucket = week_of_month(date.day()).min(SPARKLINE_WEEK_BUCKETS as u32) as usize - 1;
        let amount = transaction.amount_decimal();
        match series {
            SparklineSeries::Income if amount > Decimal::ZERO => totals[bucket] += amount,
            SparklineSeries::Expense if amount < Decimal::ZERO => totals[bucket] += amount.abs(),
            _ => {}
        }
    }

    totals
}

/// Rounded percent change between two months, zero-division guarded:
/// a previous of zero (or less) reports 0 / Same.
pub fn month_over_month_change(current: Decimal, previous: Decimal) -> MonthChange {
    if previous <= Decimal::ZERO {
        return MonthChange {
            change_percent: 0,
            change_direction: ChangeDirection::Same,
        };
    }

    let change_percent = (((current - previous) / previous) * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .unwrap_or(0);
    let change_direction = if change_percent > 0 {
        ChangeDirection::Up
    } else if change_percent < 0 {
        ChangeDirection::Down
    } else {
        ChangeDirection::Same
    };

    MonthChange {
        change_percent,
        change_direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budgets::Budget;
    use crate::reports::reports_model::BudgetProgress;
    use rust_decimal_macros::dec;

    fn tx(amount: &str, category: &str, date: &str) -> Transaction {
        let is_non_cashflow = matches!(
            category,
            "non_cashflow_income" | "non_cashflow_expense"
        );
        Transaction {
            id: format!("{}-{}", category, date),
            date: date.to_string(),
            description: String::new(),
            amount: amount.to_string(),
            currency: "AED".to_string(),
            category: category.to_string(),
            month: date.get(..7).unwrap_or("2024-06").to_string(),
            income_type: "not_applicable".to_string(),
            expense_type: "not_applicable".to_string(),
            is_non_cashflow,
            source_id: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn typed_tx(amount: &str, category: &str, income_type: &str, expense_type: &str) -> Transaction {
        let mut transaction = tx(amount, category, "2024-06-10");
        transaction.income_type = income_type.to_string();
        transaction.expense_type = expense_type.to_string();
        transaction
    }

    #[test]
    fn single_month_summary_scenario() {
        let transactions = vec![
            typed_tx("1000", "income", "expected", "not_applicable"),
            typed_tx("-200", "groceries", "not_applicable", "expected"),
            tx("-50", "non_cashflow_expense", "2024-06-20"),
        ];

        let partition = partition_cashflow(transactions);
        let summary = compute_summary(
            &partition.cashflow,
            &ClassificationFilter::All,
            &ClassificationFilter::All,
        );

        assert_eq!(summary.income, dec!(1000));
        assert_eq!(summary.expenses, dec!(200));
        assert_eq!(summary.balance, dec!(800));
        assert_eq!(non_cashflow_totals(&partition.non_cashflow).expense, dec!(50));
        assert_eq!(spending_by_category(&partition.cashflow, "groceries"), dec!(200));
    }

    #[test]
    fn totals_keep_full_precision() {
        let transactions = vec![
            typed_tx("100.004", "income", "expected", "not_applicable"),
            typed_tx("-0.006", "dining", "not_applicable", "unexpected"),
        ];
        let summary = compute_summary(
            &transactions,
            &ClassificationFilter::All,
            &ClassificationFilter::All,
        );

        // The engine never rounds; display rounding happens in the
        // view models.
        assert_eq!(summary.income, dec!(100.004));
        assert_eq!(summary.expenses, dec!(0.006));
        assert_eq!(spending_by_category(&transactions, "dining"), dec!(0.006));
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let transactions = vec![
            typed_tx("123.45", "income", "expected", "not_applicable"),
            typed_tx("-67.89", "dining", "not_applicable", "unexpected"),
            typed_tx("-900", "housing", "not_applicable", "expected"),
        ];
        let summary = compute_summary(
            &transactions,
            &ClassificationFilter::All,
            &ClassificationFilter::All,
        );
        assert_eq!(summary.balance, summary.income - summary.expenses);
    }

    #[test]
    fn non_cashflow_never_counts_toward_summary() {
        let transactions = vec![
            tx("5000", "non_cashflow_income", "2024-06-02"),
            tx("-300", "non_cashflow_expense", "2024-06-03"),
            typed_tx("100", "income", "expected", "not_applicable"),
        ];

        for income_filter in [
            ClassificationFilter::All,
            ClassificationFilter::Only(ClassificationType::Expected),
            ClassificationFilter::Only(ClassificationType::Unexpected),
        ] {
            let summary =
                compute_summary(&transactions, &income_filter, &ClassificationFilter::All);
            assert!(summary.income <= dec!(100));
            assert_eq!(summary.expenses, dec!(0));
        }
    }

    #[test]
    fn zero_amount_is_excluded_from_income() {
        let transactions = vec![tx("0", "other", "2024-06-05")];
        let summary = compute_summary(
            &transactions,
            &ClassificationFilter::All,
            &ClassificationFilter::All,
        );
        assert_eq!(summary.income, dec!(0));
        assert_eq!(summary.expenses, dec!(0));
        assert!(summary.has_transactions);
    }

    #[test]
    fn breakdowns_ignore_active_filters() {
        let transactions = vec![
            typed_tx("1000", "income", "expected", "not_applicable"),
            typed_tx("250", "income", "unexpected", "not_applicable"),
            typed_tx("-400", "housing", "not_applicable", "expected"),
            typed_tx("-150", "dining", "not_applicable", "unexpected"),
        ];

        let summary = compute_summary(
            &transactions,
            &ClassificationFilter::Only(ClassificationType::Unexpected),
            &ClassificationFilter::Only(ClassificationType::Expected),
        );

        // Headline numbers reflect the filters...
        assert_eq!(summary.income, dec!(250));
        assert_eq!(summary.expenses, dec!(400));
        // ...but the breakdowns always show the true totals.
        assert_eq!(summary.income_breakdown.expected, dec!(1000));
        assert_eq!(summary.income_breakdown.unexpected, dec!(250));
        assert_eq!(summary.expense_breakdown.fixed, dec!(400));
        assert_eq!(summary.expense_breakdown.variable, dec!(150));
    }

    #[test]
    fn filter_for_month_respects_month_and_account() {
        let mut in_month = tx("-10", "other", "2024-06-01");
        in_month.source_id = Some("acct-1".to_string());
        let mut other_account = tx("-20", "other", "2024-06-02");
        other_account.source_id = Some("acct-2".to_string());
        let other_month = tx("-30", "other", "2024-05-01");

        let all = vec![in_month.clone(), other_account, other_month];

        assert_eq!(filter_for_month(&all, "2024-06", &AccountFilter::All).len(), 2);
        let scoped = filter_for_month(
            &all,
            "2024-06",
            &AccountFilter::Source("acct-1".to_string()),
        );
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, in_month.id);
    }

    #[test]
    fn spending_by_category_is_non_negative() {
        let transactions = vec![
            tx("500", "groceries", "2024-06-01"),
            tx("-200", "groceries", "2024-06-02"),
        ];
        // Positive amounts in an expense category contribute nothing.
        assert_eq!(spending_by_category(&transactions, "groceries"), dec!(200));
        assert_eq!(spending_by_category(&transactions, "missing"), dec!(0));
    }

    #[test]
    fn week_formula_boundaries() {
        assert_eq!(week_of_month(1), 1);
        assert_eq!(week_of_month(7), 1);
        assert_eq!(week_of_month(8), 2);
        assert_eq!(week_of_month(28), 4);
        assert_eq!(week_of_month(29), 5);
        assert_eq!(week_of_month(31), 5);
    }

    #[test]
    fn group_by_week_accumulates_signed_totals() {
        let transactions = vec![
            tx("-100", "groceries", "2024-06-03"),
            tx("-50", "groceries", "2024-06-05"),
            tx("-25", "groceries", "2024-06-30"),
            tx("-5", "groceries", "not-a-date"),
        ];

        let weeks = group_by_week(&transactions);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[&1].total_amount, dec!(-150));
        assert_eq!(weeks[&1].transactions.len(), 2);
        assert_eq!(weeks[&5].total_amount, dec!(-25));
    }

    #[test]
    fn sparkline_clamps_week_five_into_last_bucket() {
        let transactions = vec![
            tx("-100", "groceries", "2024-06-22"),
            tx("-40", "groceries", "2024-06-29"),
            tx("-2", "groceries", "2024-06-30"),
        ];

        let totals = weekly_totals(&transactions, SparklineSeries::Expense);
        assert_eq!(totals, vec![dec!(0), dec!(0), dec!(0), dec!(142)]);
    }

    #[test]
    fn sparkline_series_split_by_direction() {
        let transactions = vec![
            tx("300", "income", "2024-06-01"),
            tx("-120", "dining", "2024-06-02"),
        ];

        assert_eq!(
            weekly_totals(&transactions, SparklineSeries::Income),
            vec![dec!(300), dec!(0), dec!(0), dec!(0)]
        );
        assert_eq!(
            weekly_totals(&transactions, SparklineSeries::Expense),
            vec![dec!(120), dec!(0), dec!(0), dec!(0)]
        );
    }

    #[test]
    fn month_over_month_guards_zero_division() {
        let change = month_over_month_change(dec!(100), dec!(0));
        assert_eq!(change.change_percent, 0);
        assert_eq!(change.change_direction, ChangeDirection::Same);
    }

    #[test]
    fn month_over_month_up_and_down() {
        let up = month_over_month_change(dec!(150), dec!(100));
        assert_eq!(up.change_percent, 50);
        assert_eq!(up.change_direction, ChangeDirection::Up);

        let down = month_over_month_change(dec!(50), dec!(100));
        assert_eq!(down.change_percent, -50);
        assert_eq!(down.change_direction, ChangeDirection::Down);

        let same = month_over_month_change(dec!(100), dec!(100));
        assert_eq!(same.change_direction, ChangeDirection::Same);
    }

    fn budget(amount: &str) -> Budget {
        Budget {
            id: "b1".to_string(),
            category: "groceries".to_string(),
            month: "2024-06".to_string(),
            amount: amount.to_string(),
            currency: "AED".to_string(),
            color: None,
            icon: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn percentage_clamps_at_one_hundred_when_over_budget() {
        let progress = BudgetProgress::for_budget(&budget("150"), dec!(200));
        assert_eq!(progress.percent_used, dec!(100));
        assert!(progress.is_over_budget);
        assert_eq!(progress.remaining_amount, dec!(-50));
    }

    #[test]
    fn zero_budget_reports_zero_percent() {
        let progress = BudgetProgress::for_budget(&budget("0"), dec!(75));
        assert_eq!(progress.percent_used, dec!(0));
        assert!(!progress.is_over_budget);
        assert_eq!(progress.remaining_amount, dec!(-75));
    }

    #[test]
    fn under_budget_progress() {
        let progress = BudgetProgress::for_budget(&budget("200"), dec!(50));
        assert_eq!(progress.percent_used, dec!(25));
        assert!(!progress.is_over_budget);
        assert_eq!(progress.remaining_amount, dec!(150));
    }
}
