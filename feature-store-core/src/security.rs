use anyhow::Result;
use async_trait::async_trait;

/// External API-key store. Any error is treated as "feature store not
/// shared" by the handler; the detail only ends up in debug logs.
#[async_trait]
pub trait ApiKeyValidator: Send + Sync {
    async fn validate_api_key(&self, api_key: &str, feature_store_names: &[String]) -> Result<()>;
}
