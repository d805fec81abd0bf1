use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::budgets::budgets_model::{Budget, NewBudget};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::errors::Result;

pub struct BudgetService<T: BudgetRepositoryTrait> {
    budget_repo: Arc<T>,
}

impl<T: BudgetRepositoryTrait> BudgetService<T> {
    pub fn new(budget_repo: Arc<T>) -> Self {
        BudgetService { budget_repo }
    }
}

/// Collapses duplicate (category, month) rows, keeping the last one seen.
/// Rows arrive ordered by creation time, so the most recent duplicate wins.
pub(crate) fn dedupe_by_category(month_budgets: Vec<Budget>) -> Vec<Budget> {
    let mut unique: HashMap<String, Budget> = HashMap::new();
    for budget in month_budgets {
        unique.insert(budget.category.clone(), budget);
    }
    let mut deduped: Vec<Budget> = unique.into_values().collect();
    deduped.sort_by(|a, b| a.category.cmp(&b.category));
    deduped
}

#[async_trait]
impl<T: BudgetRepositoryTrait + Send + Sync> BudgetServiceTrait for BudgetService<T> {
    fn get_budgets_for_month(&self, month: &str) -> Result<Vec<Budget>> {
        let month_budgets = self.budget_repo.list_for_month(month)?;
        Ok(dedupe_by_category(month_budgets))
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.budget_repo.create(new_budget)
    }

    async fn update_budget(&self, budget: Budget) -> Result<Budget> {
        self.budget_repo.update(budget)
    }

    async fn delete_budget(&self, budget_id: &str) -> Result<usize> {
        self.budget_repo.delete(budget_id)
    }
}
