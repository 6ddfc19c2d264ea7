use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::HashMap;

/// One feature-vector lookup against a feature view. Feature values are kept
/// as raw JSON so heterogeneous types pass through without re-encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreRequest {
    pub feature_store_name: String,
    pub feature_view_name: String,
    pub feature_view_version: i32,
    /// Primary-key column name to raw JSON value.
    pub entries: HashMap<String, Box<RawValue>>,
    /// Client-supplied overrides, applied on top of fetched values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_features: Option<HashMap<String, Box<RawValue>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_options: Option<MetadataRequest>,
}

/// Echo flags for the optional per-feature metadata array in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRequest {
    #[serde(default)]
    pub feature_name: bool,
    #[serde(default)]
    pub feature_type: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureStatus {
    Complete,
    Missing,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMetadataEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
}

/// Assembled feature vector, indexed by the view's global feature ordering.
/// Unfilled slots serialize as null.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStoreResponse {
    pub features: Vec<Option<Box<RawValue>>>,
    pub status: FeatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<FeatureMetadataEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::value::RawValue;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    #[test]
    fn response_round_trip_preserves_null_slots() {
        let response = FeatureStoreResponse {
            features: vec![Some(raw("12")), None, Some(raw("\"abc\""))],
            status: FeatureStatus::Missing,
            metadata: None,
        };
        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: FeatureStoreResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.status, FeatureStatus::Missing);
        let slots: Vec<Option<&str>> = decoded
            .features
            .iter()
            .map(|slot| slot.as_deref().map(RawValue::get))
            .collect();
        assert_eq!(slots, vec![Some("12"), None, Some("\"abc\"")]);
        assert!(decoded.metadata.is_none());
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&FeatureStatus::Complete).unwrap(),
            "\"COMPLETE\""
        );
        assert_eq!(
            serde_json::from_str::<FeatureStatus>("\"ERROR\"").unwrap(),
            FeatureStatus::Error
        );
    }

    #[test]
    fn request_parses_optional_fields_as_absent() {
        let body = r#"{
            "featureStoreName": "fs_prod",
            "featureViewName": "sample_view",
            "featureViewVersion": 1,
            "entries": {"id1": "12"}
        }"#;
        let request: FeatureStoreRequest = serde_json::from_str(body).unwrap();
        assert!(request.passed_features.is_none());
        assert!(request.metadata_options.is_none());
        assert_eq!(request.entries["id1"].get(), "\"12\"");
    }
}
