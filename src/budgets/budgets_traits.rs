use async_trait::async_trait;

use crate::budgets::budgets_model::{Budget, NewBudget};
use crate::errors::Result;

/// Trait for budget repository operations
pub trait BudgetRepositoryTrait: Send + Sync {
    fn list_for_month(&self, month: &str) -> Result<Vec<Budget>>;
    fn get_by_id(&self, budget_id: &str) -> Result<Budget>;
    fn create(&self, new_budget: NewBudget) -> Result<Budget>;
    fn update(&self, budget: Budget) -> Result<Budget>;
    fn delete(&self, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Budgets for a month, one per category (duplicates collapsed).
    fn get_budgets_for_month(&self, month: &str) -> Result<Vec<Budget>>;
    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;
    async fn update_budget(&self, budget: Budget) -> Result<Budget>;
    /// Deleting a budget never cascades to transactions; they keep their
    /// category string and simply lose the ceiling to compare against.
    async fn delete_budget(&self, budget_id: &str) -> Result<usize>;
}
