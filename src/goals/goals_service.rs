use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::errors::{Result, ValidationError};
use crate::goals::goals_model::{FinancialGoal, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

/// New saved amount after adding funds.
pub fn apply_add_funds(current: Decimal, amount: Decimal) -> Result<Decimal> {
    validate_fund_amount(amount)?;
    Ok(current + amount)
}

/// New saved amount after removing funds; never goes below zero.
pub fn apply_remove_funds(current: Decimal, amount: Decimal) -> Result<Decimal> {
    validate_fund_amount(amount)?;
    Ok((current - amount).max(Decimal::ZERO))
}

fn validate_fund_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(
            "Fund amount must be a positive number".to_string(),
        )
        .into());
    }
    Ok(())
}

pub struct GoalService<T: GoalRepositoryTrait> {
    goal_repo: Arc<T>,
}

impl<T: GoalRepositoryTrait> GoalService<T> {
    pub fn new(goal_repo: Arc<T>) -> Self {
        GoalService { goal_repo }
    }
}

#[async_trait]
impl<T: GoalRepositoryTrait + Send + Sync> GoalServiceTrait for GoalService<T> {
    fn get_goals(&self) -> Result<Vec<FinancialGoal>> {
        self.goal_repo.load_goals()
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<FinancialGoal> {
        self.goal_repo.insert_new_goal(new_goal)
    }

    async fn update_goal(&self, updated_goal_data: FinancialGoal) -> Result<FinancialGoal> {
        self.goal_repo.update_goal(updated_goal_data)
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        self.goal_repo.delete_goal(goal_id)
    }

    async fn add_funds(&self, goal_id: &str, amount: Decimal) -> Result<FinancialGoal> {
        let mut goal = self.goal_repo.get_by_id(goal_id)?;
        let new_amount = apply_add_funds(goal.current_amount_decimal(), amount)?;
        goal.current_amount = new_amount.to_string();
        self.goal_repo.update_goal(goal)
    }

    async fn remove_funds(&self, goal_id: &str, amount: Decimal) -> Result<FinancialGoal> {
        let mut goal = self.goal_repo.get_by_id(goal_id)?;
        let new_amount = apply_remove_funds(goal.current_amount_decimal(), amount)?;
        goal.current_amount = new_amount.to_string();
        self.goal_repo.update_goal(goal)
    }
}
