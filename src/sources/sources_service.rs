use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;
use crate::sources::sources_model::{NewTransactionSource, TransactionSource};
use crate::sources::sources_traits::{SourceRepositoryTrait, SourceServiceTrait};

pub struct SourceService<T: SourceRepositoryTrait> {
    source_repo: Arc<T>,
}

impl<T: SourceRepositoryTrait> SourceService<T> {
    pub fn new(source_repo: Arc<T>) -> Self {
        SourceService { source_repo }
    }
}

#[async_trait]
impl<T: SourceRepositoryTrait + Send + Sync> SourceServiceTrait for SourceService<T> {
    fn get_sources(&self) -> Result<Vec<TransactionSource>> {
        self.source_repo.list()
    }

    async fn create_source(&self, new_source: NewTransactionSource) -> Result<TransactionSource> {
        self.source_repo.create(new_source)
    }

    async fn update_source(&self, source: TransactionSource) -> Result<TransactionSource> {
        self.source_repo.update(source)
    }

    async fn delete_source(&self, source_id: &str) -> Result<usize> {
        self.source_repo.delete(source_id)
    }
}
