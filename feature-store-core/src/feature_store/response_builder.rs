use super::translate::translate_store_error;
use crate::batchread::BatchReadResponse;
use crate::error::RestError;
use crate::metadata::{
    FeatureViewMetadata, feature_index_key, feature_index_key_by_operation,
};
use crate::model::{FeatureMetadataEntry, FeatureStatus, MetadataRequest};
use serde_json::value::RawValue;
use std::collections::HashMap;
use tracing::error;

/// Abort before assembling anything when a group failed outright. 404 is not
/// a failure here, only a missing row.
pub(super) fn check_batch_response(response: &BatchReadResponse) -> Result<(), RestError> {
    for group_result in &response.result {
        if group_result.code != 200 && group_result.code != 404 {
            return Err(translate_store_error(
                group_result.code,
                group_result.message.as_deref().unwrap_or_default(),
            ));
        }
    }
    Ok(())
}

/// Scatter per-group results into one vector indexed by the view's global
/// feature ordering, then echo primary-key values back from the request.
///
/// The status scan is last-write-wins in the executor's result order: a
/// missing group followed by an erroring one reports ERROR, the reverse
/// reports MISSING. Kept as-is for compatibility with existing clients.
pub(super) fn build_feature_values(
    response: BatchReadResponse,
    entries: &HashMap<String, Box<RawValue>>,
    metadata: &FeatureViewMetadata,
) -> (Vec<Option<Box<RawValue>>>, FeatureStatus) {
    let mut feature_values: Vec<Option<Box<RawValue>>> = vec![None; metadata.num_features];
    let mut status = FeatureStatus::Complete;
    for group_result in response.result {
        if group_result.code == 404 {
            status = FeatureStatus::Missing;
        } else if group_result.code != 200 {
            status = FeatureStatus::Error;
        }
        let Some(data) = group_result.body.data else {
            continue;
        };
        for (column, value) in data {
            let index_key =
                feature_index_key_by_operation(&group_result.body.operation_id, &column);
            match metadata.feature_index_lookup.get(&index_key) {
                Some(&index) => feature_values[index] = Some(value),
                None => {
                    // Descriptor/metadata desynchronization, not a user error.
                    error!(
                        "feature index lookup has no entry for key '{}'",
                        index_key
                    );
                    panic!("Index cannot be found by the key '{}'", index_key);
                }
            }
        }
    }
    // Primary-key columns became equality filters and were never fetched;
    // repopulate them from the request.
    for (feature_name, value) in entries {
        if let Some(feature) = metadata.prefix_features_lookup.get(feature_name) {
            let index_key = feature_index_key(feature);
            if let Some(&index) = metadata.feature_index_lookup.get(&index_key) {
                feature_values[index] = Some(value.clone());
            }
        }
    }
    (feature_values, status)
}

/// Passed features are applied last and overwrite unconditionally.
pub(super) fn fill_passed_features(
    feature_values: &mut [Option<Box<RawValue>>],
    passed_features: Option<&HashMap<String, Box<RawValue>>>,
    metadata: &FeatureViewMetadata,
) {
    let Some(passed_features) = passed_features else {
        return;
    };
    for (feature_name, value) in passed_features {
        if let Some(feature) = metadata.prefix_features_lookup.get(feature_name) {
            let index_key = feature_index_key(feature);
            if let Some(&index) = metadata.feature_index_lookup.get(&index_key) {
                feature_values[index] = Some(value.clone());
            }
        }
    }
}

pub(super) fn build_feature_metadata(
    metadata: &FeatureViewMetadata,
    options: &MetadataRequest,
) -> Vec<FeatureMetadataEntry> {
    let mut entries = vec![FeatureMetadataEntry::default(); metadata.num_features];
    for (feature_key, feature) in &metadata.prefix_features_lookup {
        let slot = &mut entries[feature.index];
        if options.feature_name {
            slot.name = Some(feature_key.clone());
        }
        if options.feature_type {
            slot.feature_type = Some(feature.offline_type.clone());
        }
    }
    entries
}
