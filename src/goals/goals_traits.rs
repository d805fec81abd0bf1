use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{FinancialGoal, NewGoal};

/// Trait for goal repository operations
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<FinancialGoal>>;
    fn get_by_id(&self, goal_id: &str) -> Result<FinancialGoal>;
    fn insert_new_goal(&self, new_goal: NewGoal) -> Result<FinancialGoal>;
    fn update_goal(&self, goal_update: FinancialGoal) -> Result<FinancialGoal>;
    fn delete_goal(&self, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<FinancialGoal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<FinancialGoal>;
    async fn update_goal(&self, updated_goal_data: FinancialGoal) -> Result<FinancialGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Adds a strictly positive amount to the goal's saved funds.
    async fn add_funds(&self, goal_id: &str, amount: Decimal) -> Result<FinancialGoal>;
    /// Removes a strictly positive amount, clamping the saved funds at zero.
    async fn remove_funds(&self, goal_id: &str, amount: Decimal) -> Result<FinancialGoal>;
}
