pub mod sources_errors;
pub mod sources_model;
pub mod sources_repository;
pub mod sources_service;
pub mod sources_traits;

pub use sources_errors::SourceError;
pub use sources_model::{NewTransactionSource, SourceType, TransactionSource};
pub use sources_repository::SourceRepository;
pub use sources_service::SourceService;
pub use sources_traits::{SourceRepositoryTrait, SourceServiceTrait};
