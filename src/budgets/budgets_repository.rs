use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::budgets::budgets_model::{Budget, NewBudget};
use crate::budgets::budgets_traits::BudgetRepositoryTrait;
use crate::budgets::BudgetError;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::budgets;
use crate::schema::budgets::dsl::*;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        BudgetRepository { pool }
    }
}

impl BudgetRepositoryTrait for BudgetRepository {
    fn list_for_month(&self, month_key: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(budgets
            .filter(month.eq(month_key.to_string()))
            .order(created_at.asc())
            .load::<Budget>(&mut conn)?)
    }

    fn get_by_id(&self, budget_id: &str) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;
        budgets
            .find(budget_id)
            .first::<Budget>(&mut conn)
            .optional()?
            .ok_or_else(|| BudgetError::NotFound(budget_id.to_string()).into())
    }

    fn create(&self, mut new_budget: NewBudget) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        new_budget.validate().map_err(crate::errors::Error::Budget)?;
        new_budget.id = Some(Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        Ok(diesel::insert_into(budgets::table)
            .values((&new_budget, created_at.eq(now.clone()), updated_at.eq(now)))
            .returning(budgets::all_columns)
            .get_result(&mut conn)?)
    }

    fn update(&self, mut budget: Budget) -> Result<Budget> {
        let mut conn = get_connection(&self.pool)?;

        budget.updated_at = Utc::now().to_rfc3339();
        let budget_id = budget.id.clone();

        diesel::update(budgets.find(budget_id.clone()))
            .set(&budget)
            .execute(&mut conn)?;

        Ok(budgets.find(budget_id).first(&mut conn)?)
    }

    fn delete(&self, budget_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(budgets.find(budget_id.to_string())).execute(&mut conn)?)
    }
}
