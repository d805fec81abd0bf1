use async_trait::async_trait;

use crate::errors::Result;
use crate::sources::sources_model::{NewTransactionSource, TransactionSource};

/// Trait for transaction source repository operations
pub trait SourceRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<TransactionSource>>;
    fn get_by_id(&self, source_id: &str) -> Result<TransactionSource>;
    fn create(&self, new_source: NewTransactionSource) -> Result<TransactionSource>;
    fn update(&self, source: TransactionSource) -> Result<TransactionSource>;
    fn delete(&self, source_id: &str) -> Result<usize>;
}

/// Trait for transaction source service operations
#[async_trait]
pub trait SourceServiceTrait: Send + Sync {
    fn get_sources(&self) -> Result<Vec<TransactionSource>>;
    async fn create_source(&self, new_source: NewTransactionSource) -> Result<TransactionSource>;
    async fn update_source(&self, source: TransactionSource) -> Result<TransactionSource>;
    async fn delete_source(&self, source_id: &str) -> Result<usize>;
}
