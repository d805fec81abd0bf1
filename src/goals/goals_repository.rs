use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::goals::goals_model::{FinancialGoal, NewGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::goals::GoalError;
use crate::schema::goals;
use crate::schema::goals::dsl::*;

pub struct GoalRepository {
    pool: Arc<DbPool>,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        GoalRepository { pool }
    }
}

impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<FinancialGoal>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(goals.load::<FinancialGoal>(&mut conn)?)
    }

    fn get_by_id(&self, goal_id: &str) -> Result<FinancialGoal> {
        let mut conn = get_connection(&self.pool)?;
        goals
            .find(goal_id)
            .first::<FinancialGoal>(&mut conn)
            .optional()?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()).into())
    }

    fn insert_new_goal(&self, mut new_goal: NewGoal) -> Result<FinancialGoal> {
        let mut conn = get_connection(&self.pool)?;

        new_goal.id = Some(Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        Ok(diesel::insert_into(goals::table)
            .values((&new_goal, created_at.eq(now.clone()), updated_at.eq(now)))
            .returning(goals::all_columns)
            .get_result(&mut conn)?)
    }

    fn update_goal(&self, mut goal_update: FinancialGoal) -> Result<FinancialGoal> {
        let mut conn = get_connection(&self.pool)?;

        goal_update.updated_at = Utc::now().to_rfc3339();
        let goal_id = goal_update.id.clone();

        diesel::update(goals.find(goal_id.clone()))
            .set(&goal_update)
            .execute(&mut conn)?;

        Ok(goals.find(goal_id).first(&mut conn)?)
    }

    fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(goals.find(goal_id.to_string())).execute(&mut conn)?)
    }
}
