use crate::errors::Result;
use crate::reports::reports_model::{
    AccountFilter, CategoryHistoryEntry, CategorySummaryReport, ClassificationFilter,
    MonthlyReport, TrendEntry,
};

/// Trait for the aggregation/reporting service.
///
/// All methods are read-only over the stores. After any mutation elsewhere
/// (reclassify, fund change, budget edit) callers request a fresh report;
/// cross-cutting sums depend on the full transaction set, so nothing here is
/// patched incrementally.
pub trait ReportsServiceTrait: Send + Sync {
    fn get_monthly_report(
        &self,
        month: &str,
        account: &AccountFilter,
        income_filter: &ClassificationFilter,
        expense_filter: &ClassificationFilter,
    ) -> Result<MonthlyReport>;

    /// Spending history for one category over the given month keys
    /// (newest first), with month-over-month changes.
    fn get_category_history(
        &self,
        category: &str,
        months: &[String],
    ) -> Result<Vec<CategoryHistoryEntry>>;

    /// Income/expense totals per month over an optional month-key range,
    /// sorted by month ascending.
    fn get_trends(
        &self,
        start_month: Option<&str>,
        end_month: Option<&str>,
    ) -> Result<Vec<TrendEntry>>;

    /// Signed totals per category for one month.
    fn get_summary_by_category(
        &self,
        month: &str,
        account: &AccountFilter,
    ) -> Result<CategorySummaryReport>;
}
