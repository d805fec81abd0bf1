use serde::{Deserialize, Serialize};

use crate::constants::{
    INCOME_CATEGORY, NON_CASHFLOW_EXPENSE_CATEGORY, NON_CASHFLOW_INCOME_CATEGORY,
};

/// Which way money moves for a transaction in a given category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomicDirection {
    Income,
    Expense,
}

/// Structured view of a category tag.
///
/// The category string and the non-cashflow flag are not independent: the two
/// reserved non-cashflow tags imply exclusion from every summary. Parsing the
/// tag into this enum makes that coupling structural instead of a convention
/// checked at each call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
    Income,
    Expense(String),
    NonCashflowIncome,
    NonCashflowExpense,
}

impl CategoryKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            INCOME_CATEGORY => CategoryKind::Income,
            NON_CASHFLOW_INCOME_CATEGORY => CategoryKind::NonCashflowIncome,
            NON_CASHFLOW_EXPENSE_CATEGORY => CategoryKind::NonCashflowExpense,
            tag => CategoryKind::Expense(tag.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryKind::Income => INCOME_CATEGORY,
            CategoryKind::Expense(tag) => tag,
            CategoryKind::NonCashflowIncome => NON_CASHFLOW_INCOME_CATEGORY,
            CategoryKind::NonCashflowExpense => NON_CASHFLOW_EXPENSE_CATEGORY,
        }
    }

    pub fn is_non_cashflow(&self) -> bool {
        matches!(
            self,
            CategoryKind::NonCashflowIncome | CategoryKind::NonCashflowExpense
        )
    }

    pub fn direction(&self) -> EconomicDirection {
        match self {
            CategoryKind::Income | CategoryKind::NonCashflowIncome => EconomicDirection::Income,
            CategoryKind::Expense(_) | CategoryKind::NonCashflowExpense => {
                EconomicDirection::Expense
            }
        }
    }
}

/// Sub-classification used for breakdown reporting, independent of category.
///
/// Income transactions use expected/unexpected directly; expense breakdowns
/// map expected to "fixed" and unexpected to "variable" for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationType {
    Expected,
    Unexpected,
    NotApplicable,
}

impl ClassificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationType::Expected => "expected",
            ClassificationType::Unexpected => "unexpected",
            ClassificationType::NotApplicable => "not_applicable",
        }
    }

    /// Lenient parse: unknown values degrade to `NotApplicable` rather than
    /// failing, so one malformed row cannot blank out a whole month.
    pub fn from_str_lenient(value: &str) -> Self {
        match value {
            "expected" => ClassificationType::Expected,
            "unexpected" => ClassificationType::Unexpected,
            _ => ClassificationType::NotApplicable,
        }
    }
}

impl Default for ClassificationType {
    fn default() -> Self {
        ClassificationType::NotApplicable
    }
}
