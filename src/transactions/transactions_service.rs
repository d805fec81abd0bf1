use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::categories::{CategoryKind, ClassificationType, EconomicDirection};
use crate::errors::{Result, ValidationError};
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionFilters};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};

/// Computes the record a reclassification would produce, without persisting.
///
/// Moving a transaction between income-type and expense-type categories (or
/// in/out of the non-cashflow buckets) must keep three fields consistent:
/// the amount sign follows the new category's economic direction, the
/// expected/unexpected sub-classifications reset to not_applicable unless the
/// target is the income category (which defaults to expected), and the
/// non-cashflow flag follows the category tag.
pub fn apply_reclassification(
    transaction: &Transaction,
    new_category: &str,
) -> Result<Transaction> {
    let tag = new_category.trim();
    if tag.is_empty() {
        return Err(ValidationError::InvalidInput(
            "Category cannot be empty".to_string(),
        )
        .into());
    }

    let kind = CategoryKind::from_name(tag);
    let magnitude = transaction.amount_decimal().abs();

    let mut updated = transaction.clone();
    updated.category = tag.to_string();
    updated.amount = match kind.direction() {
        EconomicDirection::Income => magnitude,
        EconomicDirection::Expense => -magnitude,
    }
    .to_string();
    updated.is_non_cashflow = kind.is_non_cashflow();

    updated.income_type = if kind == CategoryKind::Income {
        match transaction.income_classification() {
            ClassificationType::NotApplicable => ClassificationType::Expected,
            keep => keep,
        }
    } else {
        ClassificationType::NotApplicable
    }
    .as_str()
    .to_string();
    updated.expense_type = ClassificationType::NotApplicable.as_str().to_string();

    Ok(updated)
}

pub struct TransactionService<T: TransactionRepositoryTrait> {
    transaction_repo: Arc<T>,
}

impl<T: TransactionRepositoryTrait> TransactionService<T> {
    pub fn new(transaction_repo: Arc<T>) -> Self {
        TransactionService { transaction_repo }
    }
}

#[async_trait]
impl<T: TransactionRepositoryTrait + Send + Sync> TransactionServiceTrait
    for TransactionService<T>
{
    fn get_transactions(&self, filters: &TransactionFilters) -> Result<Vec<Transaction>> {
        self.transaction_repo.list(filters)
    }

    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        self.transaction_repo.create(new_transaction)
    }

    async fn update_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        self.transaction_repo.update(transaction)
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<usize> {
        self.transaction_repo.delete(transaction_id)
    }

    async fn reclassify(&self, transaction_id: &str, new_category: &str) -> Result<Transaction> {
        let transaction = self.transaction_repo.get_by_id(transaction_id)?;
        let updated = apply_reclassification(&transaction, new_category)?;
        debug!(
            "Reclassifying transaction {} from '{}' to '{}'",
            transaction_id, transaction.category, updated.category
        );
        self.transaction_repo.update(updated)
    }

    async fn flag_non_cashflow(&self, transaction_id: &str) -> Result<Transaction> {
        let transaction = self.transaction_repo.get_by_id(transaction_id)?;
        // Positive amounts become non-cashflow income, everything else
        // (zero included) is expense-like.
        let target = if transaction.amount_decimal() > rust_decimal::Decimal::ZERO {
            crate::constants::NON_CASHFLOW_INCOME_CATEGORY
        } else {
            crate::constants::NON_CASHFLOW_EXPENSE_CATEGORY
        };
        let updated = apply_reclassification(&transaction, target)?;
        self.transaction_repo.update(updated)
    }
}
