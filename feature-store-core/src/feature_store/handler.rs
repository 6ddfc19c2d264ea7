use super::read_params::build_batch_read_params;
use super::response_builder::{
    build_feature_metadata, build_feature_values, check_batch_response, fill_passed_features,
};
use super::translate::translate_store_error;
use super::validate::{validate_passed_features, validate_primary_key};
use crate::batchread::BatchReadExecutor;
use crate::config::SecurityConfig;
use crate::error::{RestError, RestErrorKind};
use crate::metadata::{FeatureViewMetadata, MetadataCache};
use crate::model::{FeatureStoreRequest, FeatureStoreResponse};
use crate::security::ApiKeyValidator;
use std::sync::Arc;
use tracing::debug;

/// Serves one feature-vector request end to end: validate against view
/// metadata, authorize, batch-read per feature group, reassemble.
///
/// Holds no per-request state; collaborators are injected and shared.
pub struct FeatureStoreHandler {
    metadata_cache: Arc<dyn MetadataCache>,
    api_key_validator: Arc<dyn ApiKeyValidator>,
    batch_reader: Arc<dyn BatchReadExecutor>,
    security: SecurityConfig,
}

impl FeatureStoreHandler {
    pub fn new(
        metadata_cache: Arc<dyn MetadataCache>,
        api_key_validator: Arc<dyn ApiKeyValidator>,
        batch_reader: Arc<dyn BatchReadExecutor>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            metadata_cache,
            api_key_validator,
            batch_reader,
            security,
        }
    }

    /// Validate -> Authenticate -> Execute for one request.
    pub async fn handle(
        &self,
        api_key: &str,
        request: &FeatureStoreRequest,
    ) -> Result<FeatureStoreResponse, RestError> {
        self.validate(request).await?;
        self.authenticate(api_key, request).await?;
        self.execute(request).await
    }

    pub async fn validate(&self, request: &FeatureStoreRequest) -> Result<(), RestError> {
        let metadata = self.metadata(request).await?;
        debug!(
            feature_view = %request.feature_view_name,
            version = request.feature_view_version,
            "validating feature store request"
        );
        validate_primary_key(&request.entries, &metadata.prefix_features_lookup)?;
        validate_passed_features(
            request.passed_features.as_ref(),
            &metadata.prefix_features_lookup,
        )?;
        Ok(())
    }

    pub async fn authenticate(
        &self,
        api_key: &str,
        request: &FeatureStoreRequest,
    ) -> Result<(), RestError> {
        if !self.security.api_key.use_api_keys {
            return Ok(());
        }
        let metadata = self.metadata(request).await?;
        if let Err(err) = self
            .api_key_validator
            .validate_api_key(api_key, &metadata.feature_store_names)
            .await
        {
            // The validator's detail stays in logs; clients get one canonical
            // denial regardless of cause.
            debug!("API key rejected: {:#}", err);
            return Err(RestErrorKind::FeatureStoreNotShared.into());
        }
        Ok(())
    }

    pub async fn execute(
        &self,
        request: &FeatureStoreRequest,
    ) -> Result<FeatureStoreResponse, RestError> {
        let metadata = self.metadata(request).await?;
        let read_params = build_batch_read_params(&metadata, &request.entries);
        if let Err(err) = self.batch_reader.validate(&read_params) {
            // A rejected descriptor is attributed to the caller's input.
            return Err(translate_store_error(400, &format!("{:#}", err)));
        }
        let batch_response = match self.batch_reader.execute(&read_params).await {
            Ok(response) => response,
            Err(err) => return Err(translate_store_error(err.code, &err.message)),
        };
        debug!(?batch_response, "batch read response");
        check_batch_response(&batch_response)?;
        let (mut feature_values, status) =
            build_feature_values(batch_response, &request.entries, &metadata);
        fill_passed_features(
            &mut feature_values,
            request.passed_features.as_ref(),
            &metadata,
        );
        let metadata_echo = request
            .metadata_options
            .as_ref()
            .map(|options| build_feature_metadata(&metadata, options));
        Ok(FeatureStoreResponse {
            features: feature_values,
            status,
            metadata: metadata_echo,
        })
    }

    async fn metadata(
        &self,
        request: &FeatureStoreRequest,
    ) -> Result<Arc<FeatureViewMetadata>, RestError> {
        self.metadata_cache
            .get(
                &request.feature_store_name,
                &request.feature_view_name,
                request.feature_view_version,
            )
            .await
    }
}
