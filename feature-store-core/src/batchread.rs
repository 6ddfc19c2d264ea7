//! Shapes exchanged with the batched primary-key read executor. The wire
//! protocol and execution engine behind the trait are not part of this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

pub const DEFAULT_DATA_RETURN_TYPE: &str = "default";

/// Equality filter on a primary-key column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFilter {
    pub column: String,
    pub value: Box<RawValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadColumn {
    pub column: String,
    pub data_return_type: String,
}

/// One batched primary-key read against a single table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReadParams {
    pub db: String,
    pub table: String,
    pub filters: Vec<ReadFilter>,
    pub read_columns: Vec<ReadColumn>,
    /// Routes the result back to the owning feature group.
    pub operation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResultBody {
    pub operation_id: String,
    /// Column name to raw value; absent when the row was not found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<HashMap<String, Box<RawValue>>>,
}

/// Per-group outcome of one batch read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReadResult {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub body: GroupResultBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReadResponse {
    pub result: Vec<GroupReadResult>,
}

/// Error surfaced by the executor, carrying the store's status code and raw
/// message text for the error translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReadError {
    pub code: i32,
    pub message: String,
}

impl Display for BatchReadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "batch read failed with code {}: {}", self.code, self.message)
    }
}

impl std::error::Error for BatchReadError {}

/// Executor for batched primary-key reads. `validate` is a cheap pre-check;
/// when it fails, `execute` must not be called for those params.
#[async_trait]
pub trait BatchReadExecutor: Send + Sync {
    fn validate(&self, params: &[BatchReadParams]) -> anyhow::Result<()>;

    async fn execute(
        &self,
        params: &[BatchReadParams],
    ) -> Result<BatchReadResponse, BatchReadError>;
}
