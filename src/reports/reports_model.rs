use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::budgets::Budget;
use crate::categories::ClassificationType;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::transactions::Transaction;

/// Scope of a report: every account, or a single transaction source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    All,
    Source(String),
}

impl AccountFilter {
    pub fn matches(&self, source_id: Option<&str>) -> bool {
        match self {
            AccountFilter::All => true,
            AccountFilter::Source(wanted) => source_id == Some(wanted.as_str()),
        }
    }
}

/// Filter on the expected/unexpected sub-classification.
///
/// Affects the headline income/expense numbers only; breakdowns are always
/// computed from the full cashflow set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationFilter {
    All,
    Only(ClassificationType),
}

impl ClassificationFilter {
    pub fn matches(&self, classification: ClassificationType) -> bool {
        match self {
            ClassificationFilter::All => true,
            ClassificationFilter::Only(wanted) => classification == *wanted,
        }
    }
}

/// Income split by expected/unexpected, independent of the active filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub expected: Decimal,
    pub unexpected: Decimal,
}

/// Expense split; expected maps to "fixed" and unexpected to "variable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub fixed: Decimal,
    pub variable: Decimal,
}

/// Headline numbers for one month of cashflow transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub has_transactions: bool,
    pub income_breakdown: IncomeBreakdown,
    pub expense_breakdown: ExpenseBreakdown,
}

impl MonthlySummary {
    /// Display copy with money fields rounded; the balance is recomputed
    /// from the rounded parts so it still equals income minus expenses.
    pub fn rounded(self) -> Self {
        let income = self.income.round_dp(DISPLAY_DECIMAL_PRECISION);
        let expenses = self.expenses.round_dp(DISPLAY_DECIMAL_PRECISION);
        MonthlySummary {
            income,
            expenses,
            balance: income - expenses,
            has_transactions: self.has_transactions,
            income_breakdown: IncomeBreakdown {
                expected: self.income_breakdown.expected.round_dp(DISPLAY_DECIMAL_PRECISION),
                unexpected: self
                    .income_breakdown
                    .unexpected
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
            },
            expense_breakdown: ExpenseBreakdown {
                fixed: self.expense_breakdown.fixed.round_dp(DISPLAY_DECIMAL_PRECISION),
                variable: self
                    .expense_breakdown
                    .variable
                    .round_dp(DISPLAY_DECIMAL_PRECISION),
            },
        }
    }
}

/// Split of a month's transactions into summary-relevant cashflow and the
/// excluded non-cashflow remainder.
#[derive(Debug, Clone, Default)]
pub struct CashflowPartition {
    pub cashflow: Vec<Transaction>,
    pub non_cashflow: Vec<Transaction>,
}

/// Totals for the two dedicated non-cashflow buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NonCashflowTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl NonCashflowTotals {
    pub fn rounded(self) -> Self {
        NonCashflowTotals {
            income: self.income.round_dp(DISPLAY_DECIMAL_PRECISION),
            expense: self.expense.round_dp(DISPLAY_DECIMAL_PRECISION),
        }
    }
}

/// One week-of-month bucket: signed running total plus the transactions.
/// Display derives "spent" (absolute) vs "income" (signed) from context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeekGroup {
    pub total_amount: Decimal,
    pub transactions: Vec<Transaction>,
}

/// Direction of a month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthChange {
    pub change_percent: i64,
    pub change_direction: ChangeDirection,
}

/// Spent-vs-budgeted for one category in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: String,
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    /// Clamped to [0, 100]; zero when nothing is budgeted.
    pub percent_used: Decimal,
    /// budgeted - spent; negative means over budget (displayed as the
    /// absolute overage).
    pub remaining_amount: Decimal,
    pub is_over_budget: bool,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl BudgetProgress {
    pub fn for_budget(budget: &Budget, spent: Decimal) -> Self {
        let budgeted = budget.amount_decimal();
        let spent = spent.round_dp(DISPLAY_DECIMAL_PRECISION);
        let percent_used = if budgeted > Decimal::ZERO {
            ((spent / budgeted) * Decimal::ONE_HUNDRED)
                .min(Decimal::ONE_HUNDRED)
                .max(Decimal::ZERO)
                .round_dp(DISPLAY_DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };

        BudgetProgress {
            budget_id: budget.id.clone(),
            category: budget.category.clone(),
            budgeted,
            spent,
            percent_used,
            remaining_amount: budgeted - spent,
            is_over_budget: budgeted > Decimal::ZERO && spent > budgeted,
            currency: budget.currency.clone(),
            color: budget.color.clone(),
            icon: budget.icon.clone(),
        }
    }
}

/// One budgeted category with its weekly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    #[serde(flatten)]
    pub progress: BudgetProgress,
    pub weeks: BTreeMap<u32, WeekGroup>,
}

/// The two non-cashflow buckets with their weekly breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NonCashflowReport {
    pub totals: NonCashflowTotals,
    pub income_weeks: BTreeMap<u32, WeekGroup>,
    pub expense_weeks: BTreeMap<u32, WeekGroup>,
}

/// Immutable view model for one month's dashboard. Recomputed fresh after
/// every mutation; callers never patch it incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub month: String,
    pub currency: String,
    pub summary: MonthlySummary,
    /// Sorted by spent amount, highest first.
    pub categories: Vec<CategoryReport>,
    pub non_cashflow: NonCashflowReport,
    pub weekly_income: Vec<Decimal>,
    pub weekly_expenses: Vec<Decimal>,
    pub weekly_net: Vec<Decimal>,
}

/// One month of a category's spending history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHistoryEntry {
    pub month: String,
    pub spent: Decimal,
    pub budget: Decimal,
    #[serde(flatten)]
    pub change: MonthChange,
}

/// Income/expense totals for one month of the trends report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Signed per-category totals for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryReport {
    pub total_by_category: BTreeMap<String, Decimal>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
}
