//! Feature-view metadata consumed by the request handler. The cache that
//! populates and refreshes these snapshots lives outside this crate; per
//! request the handler only ever reads one immutable snapshot.

use crate::error::RestError;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMetadata {
    pub name: String,
    pub prefix: String,
    pub offline_type: String,
    pub feature_store_name: String,
    pub feature_group_name: String,
    pub feature_group_version: i32,
    /// Global index of this feature in the served vector.
    pub index: usize,
}

impl FeatureMetadata {
    /// Name as it appears in requests: join prefix + bare column name.
    pub fn prefixed_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFeature {
    pub name: String,
    pub prefix: String,
    pub offline_type: String,
}

/// Features of a single feature group (one backing table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGroupFeatures {
    pub feature_store_name: String,
    pub feature_group_name: String,
    pub feature_group_version: i32,
    pub features: Vec<GroupFeature>,
}

/// Operation id of a batch read against one feature group. Deterministic, so
/// per-group results can be routed back to the feature-index mapping without
/// re-resolving the group.
pub fn feature_group_operation_id(group: &FeatureGroupFeatures) -> String {
    format!(
        "{}|{}|{}",
        group.feature_store_name, group.feature_group_name, group.feature_group_version
    )
}

/// Index key for a column returned under an operation id.
pub fn feature_index_key_by_operation(operation_id: &str, column: &str) -> String {
    format!("{}|{}", operation_id, column)
}

/// Index key derived from a feature's own group identity. Resolves to the
/// same key as [`feature_index_key_by_operation`] for that group's reads.
pub fn feature_index_key(feature: &FeatureMetadata) -> String {
    format!(
        "{}|{}|{}|{}",
        feature.feature_store_name,
        feature.feature_group_name,
        feature.feature_group_version,
        feature.name
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureViewMetadata {
    pub num_features: usize,
    /// Prefixed feature name -> feature metadata. Keys unique per view.
    pub prefix_features_lookup: FxHashMap<String, FeatureMetadata>,
    /// Group-qualified index key -> global index. Dense over [0, num_features).
    pub feature_index_lookup: FxHashMap<String, usize>,
    pub feature_group_features: Vec<FeatureGroupFeatures>,
    /// Data sources the view depends on, checked by access authorization.
    pub feature_store_names: Vec<String>,
}

impl FeatureViewMetadata {
    /// Build the lookup tables from the ordered group list, assigning global
    /// indices in group order then feature order.
    pub fn new(
        feature_group_features: Vec<FeatureGroupFeatures>,
        feature_store_names: Vec<String>,
    ) -> Self {
        let mut prefix_features_lookup = FxHashMap::default();
        let mut feature_index_lookup = FxHashMap::default();
        let mut index = 0usize;
        for group in &feature_group_features {
            for feature in &group.features {
                let feature_metadata = FeatureMetadata {
                    name: feature.name.clone(),
                    prefix: feature.prefix.clone(),
                    offline_type: feature.offline_type.clone(),
                    feature_store_name: group.feature_store_name.clone(),
                    feature_group_name: group.feature_group_name.clone(),
                    feature_group_version: group.feature_group_version,
                    index,
                };
                feature_index_lookup.insert(feature_index_key(&feature_metadata), index);
                prefix_features_lookup.insert(feature_metadata.prefixed_name(), feature_metadata);
                index += 1;
            }
        }
        Self {
            num_features: index,
            prefix_features_lookup,
            feature_index_lookup,
            feature_group_features,
            feature_store_names,
        }
    }
}

/// Read side of the shared feature-view metadata cache. Not-found and stale
/// conditions surface as [`RestError`]s and propagate to the client unchanged.
#[async_trait]
pub trait MetadataCache: Send + Sync {
    async fn get(
        &self,
        feature_store_name: &str,
        feature_view_name: &str,
        feature_view_version: i32,
    ) -> Result<Arc<FeatureViewMetadata>, RestError>;
}
