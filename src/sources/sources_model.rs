use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Where a batch of transactions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Csv,
    Bank,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Csv => "csv",
            SourceType::Bank => "bank",
        }
    }

    pub fn from_str_lenient(value: &str) -> Self {
        match value {
            "bank" => SourceType::Bank,
            _ => SourceType::Csv,
        }
    }
}

/// An account or CSV upload transactions belong to.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transaction_sources)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TransactionSource {
    pub id: String,
    pub name: String,
    pub source_type: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TransactionSource {
    pub fn source_type_kind(&self) -> SourceType {
        SourceType::from_str_lenient(&self.source_type)
    }
}

/// Input for registering a new source
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transaction_sources)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionSource {
    pub id: Option<String>,
    pub name: String,
    pub source_type: String,
    pub status: String,
}
