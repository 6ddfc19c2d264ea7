use crate::batchread::{
    BatchReadParams, DEFAULT_DATA_RETURN_TYPE, ReadColumn, ReadFilter,
};
use crate::metadata::{FeatureViewMetadata, feature_group_operation_id};
use serde_json::value::RawValue;
use std::collections::HashMap;
use tracing::debug;

/// Decompose a view into one batched read per feature group, in the order of
/// the metadata's group list. Features matched by a request entry become
/// equality filters and are echoed from the request instead of being fetched;
/// everything else becomes a read column.
pub(super) fn build_batch_read_params(
    metadata: &FeatureViewMetadata,
    entries: &HashMap<String, Box<RawValue>>,
) -> Vec<BatchReadParams> {
    let mut batch_read_params = Vec::with_capacity(metadata.feature_group_features.len());
    for group in &metadata.feature_group_features {
        let table = format!("{}_{}", group.feature_group_name, group.feature_group_version);
        let mut filters = Vec::new();
        let mut read_columns = Vec::new();
        for feature in &group.features {
            let prefixed_name = format!("{}{}", feature.prefix, feature.name);
            if let Some(value) = entries.get(&prefixed_name) {
                debug!("Add to filter: {}", feature.name);
                filters.push(ReadFilter {
                    column: feature.name.clone(),
                    value: value.clone(),
                });
            } else {
                debug!("Add to column: {}", feature.name);
                read_columns.push(ReadColumn {
                    column: feature.name.clone(),
                    data_return_type: DEFAULT_DATA_RETURN_TYPE.to_string(),
                });
            }
        }
        batch_read_params.push(BatchReadParams {
            db: group.feature_store_name.clone(),
            table,
            filters,
            read_columns,
            operation_id: feature_group_operation_id(group),
        });
    }
    batch_read_params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FeatureGroupFeatures, GroupFeature};
    use serde_json::value::RawValue;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    fn single_group_view() -> FeatureViewMetadata {
        FeatureViewMetadata::new(
            vec![FeatureGroupFeatures {
                feature_store_name: "fs_prod".to_string(),
                feature_group_name: "fg1".to_string(),
                feature_group_version: 2,
                features: vec![
                    GroupFeature {
                        name: "id1".to_string(),
                        prefix: String::new(),
                        offline_type: "bigint".to_string(),
                    },
                    GroupFeature {
                        name: "f1".to_string(),
                        prefix: String::new(),
                        offline_type: "int".to_string(),
                    },
                ],
            }],
            vec!["fs_prod".to_string()],
        )
    }

    #[test]
    fn single_group_splits_filters_and_columns() {
        let view = single_group_view();
        let mut entries = HashMap::new();
        entries.insert("id1".to_string(), raw("\"12\""));
        let params = build_batch_read_params(&view, &entries);

        assert_eq!(params.len(), 1);
        let param = &params[0];
        assert_eq!(param.db, "fs_prod");
        assert_eq!(param.table, "fg1_2");
        assert_eq!(param.operation_id, "fs_prod|fg1|2");
        assert_eq!(param.filters.len(), 1);
        assert_eq!(param.filters[0].column, "id1");
        assert_eq!(param.filters[0].value.get(), "\"12\"");
        assert_eq!(param.read_columns.len(), 1);
        assert_eq!(param.read_columns[0].column, "f1");
        assert_eq!(param.read_columns[0].data_return_type, "default");
    }

    #[test]
    fn prefixed_entry_matches_by_prefixed_name() {
        let view = FeatureViewMetadata::new(
            vec![FeatureGroupFeatures {
                feature_store_name: "fs_prod".to_string(),
                feature_group_name: "fg2".to_string(),
                feature_group_version: 1,
                features: vec![GroupFeature {
                    name: "id1".to_string(),
                    prefix: "fg2_".to_string(),
                    offline_type: "date".to_string(),
                }],
            }],
            vec!["fs_prod".to_string()],
        );
        let mut entries = HashMap::new();
        entries.insert("fg2_id1".to_string(), raw("\"2022-01-09\""));
        let params = build_batch_read_params(&view, &entries);
        // Filter carries the bare column name, not the prefixed request key.
        assert_eq!(params[0].filters[0].column, "id1");
        assert!(params[0].read_columns.is_empty());
    }

    #[test]
    fn every_group_gets_a_descriptor_even_when_fully_filtered() {
        let view = single_group_view();
        let mut entries = HashMap::new();
        entries.insert("id1".to_string(), raw("1"));
        entries.insert("f1".to_string(), raw("2"));
        let params = build_batch_read_params(&view, &entries);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].filters.len(), 2);
        assert!(params[0].read_columns.is_empty());
    }
}
