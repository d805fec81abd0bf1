use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilters};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;
use crate::transactions::TransactionError;

pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        TransactionRepository { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn list(&self, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table.into_boxed();
        if let Some(ref month_key) = filters.month {
            query = query.filter(month.eq(month_key.clone()));
        }
        if let Some(ref category_tag) = filters.category {
            query = query.filter(category.eq(category_tag.clone()));
        }
        if let Some(ref source) = filters.source_id {
            query = query.filter(source_id.eq(source.clone()));
        }

        Ok(query
            .order(date.desc())
            .load::<Transaction>(&mut conn)?)
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;
        transactions
            .find(transaction_id)
            .first::<Transaction>(&mut conn)
            .optional()?
            .ok_or_else(|| TransactionError::NotFound(transaction_id.to_string()).into())
    }

    fn create(&self, mut new_transaction: NewTransaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        new_transaction.validate().map_err(crate::errors::Error::Transaction)?;
        new_transaction.id = Some(Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        Ok(diesel::insert_into(transactions::table)
            .values((
                &new_transaction,
                created_at.eq(now.clone()),
                updated_at.eq(now),
            ))
            .returning(transactions::all_columns)
            .get_result(&mut conn)?)
    }

    fn update(&self, mut transaction: Transaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        transaction.updated_at = Utc::now().to_rfc3339();
        let transaction_id = transaction.id.clone();

        diesel::update(transactions.find(transaction_id.clone()))
            .set(&transaction)
            .execute(&mut conn)?;

        Ok(transactions.find(transaction_id).first(&mut conn)?)
    }

    fn delete(&self, transaction_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(transactions.find(transaction_id.to_string())).execute(&mut conn)?)
    }
}
