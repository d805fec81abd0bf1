/// Default currency code for records created without one
pub const DEFAULT_CURRENCY: &str = "AED";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Reserved category for income transactions
pub const INCOME_CATEGORY: &str = "income";

/// Reserved category for non-cashflow income (excluded from summaries)
pub const NON_CASHFLOW_INCOME_CATEGORY: &str = "non_cashflow_income";

/// Reserved category for non-cashflow expenses (excluded from summaries)
pub const NON_CASHFLOW_EXPENSE_CATEGORY: &str = "non_cashflow_expense";

/// Number of fixed buckets in the weekly sparkline series
pub const SPARKLINE_WEEK_BUCKETS: usize = 4;
