use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::transaction_sources;
use crate::schema::transaction_sources::dsl::*;
use crate::sources::sources_model::{NewTransactionSource, TransactionSource};
use crate::sources::sources_traits::SourceRepositoryTrait;
use crate::sources::SourceError;

pub struct SourceRepository {
    pool: Arc<DbPool>,
}

impl SourceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SourceRepository { pool }
    }
}

impl SourceRepositoryTrait for SourceRepository {
    fn list(&self) -> Result<Vec<TransactionSource>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(transaction_sources
            .order(name.asc())
            .load::<TransactionSource>(&mut conn)?)
    }

    fn get_by_id(&self, source_id: &str) -> Result<TransactionSource> {
        let mut conn = get_connection(&self.pool)?;
        transaction_sources
            .find(source_id)
            .first::<TransactionSource>(&mut conn)
            .optional()?
            .ok_or_else(|| SourceError::NotFound(source_id.to_string()).into())
    }

    fn create(&self, mut new_source: NewTransactionSource) -> Result<TransactionSource> {
        let mut conn = get_connection(&self.pool)?;

        if new_source.name.trim().is_empty() {
            return Err(SourceError::InvalidData("Source name cannot be empty".to_string()).into());
        }
        new_source.id = Some(Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        Ok(diesel::insert_into(transaction_sources::table)
            .values((&new_source, created_at.eq(now.clone()), updated_at.eq(now)))
            .returning(transaction_sources::all_columns)
            .get_result(&mut conn)?)
    }

    fn update(&self, mut source: TransactionSource) -> Result<TransactionSource> {
        let mut conn = get_connection(&self.pool)?;

        source.updated_at = Utc::now().to_rfc3339();
        let source_id = source.id.clone();

        diesel::update(transaction_sources.find(source_id.clone()))
            .set(&source)
            .execute(&mut conn)?;

        Ok(transaction_sources.find(source_id).first(&mut conn)?)
    }

    fn delete(&self, source_id: &str) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::delete(transaction_sources.find(source_id.to_string())).execute(&mut conn)?)
    }
}
