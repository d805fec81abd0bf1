use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetError;

/// Monthly spending ceiling for one category.
///
/// One row is expected per (category, month) pair; duplicates are a
/// data-quality wrinkle the month listing tolerates by keeping one.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub month: String,
    pub amount: String,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Budget {
    /// Budgeted ceiling as a non-negative magnitude; malformed values parse
    /// to zero.
    pub fn amount_decimal(&self) -> Decimal {
        self.amount.parse().unwrap_or(Decimal::ZERO).abs()
    }
}

/// Input for creating/updating a budget
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::budgets)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    pub category: String,
    pub month: String,
    pub amount: String,
    pub currency: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl NewBudget {
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.category.trim().is_empty() {
            return Err(BudgetError::InvalidData(
                "Category cannot be empty".to_string(),
            ));
        }
        match self.amount.parse::<Decimal>() {
            Ok(value) if value >= Decimal::ZERO => Ok(()),
            Ok(_) => Err(BudgetError::InvalidData(
                "Budget amount must be non-negative".to_string(),
            )),
            Err(_) => Err(BudgetError::InvalidData(format!(
                "Budget amount is not a number: {}",
                self.amount
            ))),
        }
    }
}
