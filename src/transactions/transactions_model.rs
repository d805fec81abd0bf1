use chrono::NaiveDate;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::categories::{CategoryKind, ClassificationType};
use crate::transactions::TransactionError;

/// A single bank/CSV transaction.
///
/// The amount sign carries the economic direction: positive is income,
/// negative is an expense, zero is treated as expense-like. Amounts and dates
/// are stored as text; the accessor methods parse leniently so one malformed
/// row degrades to zero contribution instead of failing a whole month.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub month: String,
    pub income_type: String,
    pub expense_type: String,
    pub is_non_cashflow: bool,
    pub source_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Transaction {
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn category_kind(&self) -> CategoryKind {
        CategoryKind::from_name(&self.category)
    }

    pub fn income_classification(&self) -> ClassificationType {
        ClassificationType::from_str_lenient(&self.income_type)
    }

    pub fn expense_classification(&self) -> ClassificationType {
        ClassificationType::from_str_lenient(&self.expense_type)
    }
}

/// Input model for creating a new transaction
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub date: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub category: String,
    pub month: String,
    pub income_type: String,
    pub expense_type: String,
    pub is_non_cashflow: bool,
    pub source_id: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.category.trim().is_empty() {
            return Err(TransactionError::InvalidData(
                "Category cannot be empty".to_string(),
            ));
        }
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(TransactionError::InvalidData(
                "Invalid date format. Expected YYYY-MM-DD".to_string(),
            ));
        }
        if NaiveDate::parse_from_str(&format!("{}-01", self.month), "%Y-%m-%d").is_err() {
            return Err(TransactionError::InvalidData(
                "Invalid month key. Expected YYYY-MM".to_string(),
            ));
        }
        // The category string and the non-cashflow flag must stay in sync.
        let kind = CategoryKind::from_name(self.category.trim());
        if kind.is_non_cashflow() != self.is_non_cashflow {
            return Err(TransactionError::InvalidData(format!(
                "is_non_cashflow must be {} for category '{}'",
                kind.is_non_cashflow(),
                self.category
            )));
        }
        Ok(())
    }
}

/// Filters for listing transactions
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    pub month: Option<String>,
    pub category: Option<String>,
    pub source_id: Option<String>,
}

impl TransactionFilters {
    pub fn for_month(month: &str) -> Self {
        TransactionFilters {
            month: Some(month.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_transaction() -> NewTransaction {
        NewTransaction {
            id: None,
            date: "2024-06-15".to_string(),
            description: "Lunch".to_string(),
            amount: "-42.50".to_string(),
            currency: "AED".to_string(),
            category: "dining".to_string(),
            month: "2024-06".to_string(),
            income_type: "not_applicable".to_string(),
            expense_type: "expected".to_string(),
            is_non_cashflow: false,
            source_id: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert!(new_transaction().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_category() {
        let mut tx = new_transaction();
        tx.category = "  ".to_string();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn validate_rejects_category_flag_mismatch() {
        let mut tx = new_transaction();
        tx.category = "non_cashflow_expense".to_string();
        tx.is_non_cashflow = false;
        assert!(tx.validate().is_err());

        tx.is_non_cashflow = true;
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn malformed_amount_degrades_to_zero() {
        let tx = Transaction {
            id: "1".to_string(),
            date: "not-a-date".to_string(),
            description: String::new(),
            amount: "oops".to_string(),
            currency: "AED".to_string(),
            category: "other".to_string(),
            month: "2024-06".to_string(),
            income_type: "not_applicable".to_string(),
            expense_type: "not_applicable".to_string(),
            is_non_cashflow: false,
            source_id: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(tx.amount_decimal(), dec!(0));
        assert!(tx.date_naive().is_none());
    }
}
