use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A savings goal with a target and the amount saved so far.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: String,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub currency: String,
    pub target_date: Option<String>,
    pub is_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl FinancialGoal {
    pub fn target_amount_decimal(&self) -> Decimal {
        self.target_amount.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn current_amount_decimal(&self) -> Decimal {
        self.current_amount.parse().unwrap_or(Decimal::ZERO)
    }
}

/// Input for creating a new goal
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub id: Option<String>,
    pub name: String,
    pub target_amount: String,
    pub current_amount: String,
    pub currency: String,
    pub target_date: Option<String>,
    pub is_completed: bool,
}
