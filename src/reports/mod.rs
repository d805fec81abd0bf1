pub mod reports_engine;
pub mod reports_model;
pub mod reports_service;
pub mod reports_traits;

pub use reports_engine::{
    compute_summary, filter_for_month, group_by_week, month_over_month_change, non_cashflow_totals,
    partition_cashflow, spending_by_category, week_of_month, weekly_totals, SparklineSeries,
};
pub use reports_model::{
    AccountFilter, BudgetProgress, CashflowPartition, CategoryHistoryEntry, CategoryReport,
    CategorySummaryReport, ChangeDirection, ClassificationFilter, ExpenseBreakdown,
    IncomeBreakdown, MonthChange, MonthlyReport, MonthlySummary, NonCashflowReport,
    NonCashflowTotals, TrendEntry, WeekGroup,
};
pub use reports_service::{recent_month_keys, ReportsService};
pub use reports_traits::ReportsServiceTrait;
