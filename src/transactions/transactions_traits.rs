use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilters};

/// Trait for transaction repository operations
pub trait TransactionRepositoryTrait: Send + Sync {
    fn list(&self, filters: &TransactionFilters) -> Result<Vec<Transaction>>;
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    fn update(&self, transaction: Transaction) -> Result<Transaction>;
    fn delete(&self, transaction_id: &str) -> Result<usize>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, filters: &TransactionFilters) -> Result<Vec<Transaction>>;
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize>;
    async fn reclassify(&self, transaction_id: &str, new_category: &str) -> Result<Transaction>;
    async fn flag_non_cashflow(&self, transaction_id: &str) -> Result<Transaction>;
}
