use crate::error::{RestError, RestErrorKind};
use crate::metadata::FeatureMetadata;
use rustc_hash::FxHashMap;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// JSON value category used for request-side type compatibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum JsonType {
    Number,
    String,
    Boolean,
    Nil,
    Other,
}

impl Display for JsonType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Number => "NUMBER",
            JsonType::String => "STRING",
            JsonType::Boolean => "BOOLEAN",
            JsonType::Nil => "NIL",
            JsonType::Other => "OTHER",
        };
        write!(f, "{}", name)
    }
}

/// Expected JSON category for an offline catalog type. Numeric subtypes all
/// collapse to NUMBER; precision and range are the backing store's problem.
pub(super) fn offline_type_to_json_type(offline_type: &str) -> JsonType {
    match offline_type {
        "boolean" => JsonType::Boolean,
        "tinyint" | "int" | "smallint" | "bigint" | "float" | "double" | "decimal"
        | "timestamp" => JsonType::Number,
        "date" | "string" | "binary" => JsonType::String,
        _ => JsonType::Other,
    }
}

pub(super) fn json_value_type(value: &str) -> Result<JsonType, serde_json::Error> {
    let parsed: serde_json::Value = serde_json::from_str(value)?;
    let json_type = match parsed {
        serde_json::Value::Number(_) => JsonType::Number,
        serde_json::Value::String(_) => JsonType::String,
        serde_json::Value::Bool(_) => JsonType::Boolean,
        serde_json::Value::Null => JsonType::Nil,
        _ => JsonType::Other,
    };
    Ok(json_type)
}

pub(super) fn validate_primary_key(
    entries: &HashMap<String, Box<RawValue>>,
    features: &FxHashMap<String, FeatureMetadata>,
) -> Result<(), RestError> {
    // Type checks on primary-key values are delegated to the backing store.
    if entries.is_empty() {
        return Err(RestErrorKind::IncorrectPrimaryKey.into());
    }
    for feature_name in entries.keys() {
        if !features.contains_key(feature_name) {
            return Err(RestErrorKind::FeatureNotExist.with_message(format!(
                "Provided primary key `{}` does not exist in the feature view.",
                feature_name
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_passed_features(
    passed_features: Option<&HashMap<String, Box<RawValue>>>,
    features: &FxHashMap<String, FeatureMetadata>,
) -> Result<(), RestError> {
    let Some(passed_features) = passed_features else {
        return Ok(());
    };
    for (feature_name, value) in passed_features {
        let Some(feature) = features.get(feature_name) else {
            return Err(RestErrorKind::FeatureNotExist.with_message(format!(
                "Feature `{}` does not exist in the feature view.",
                feature_name
            )));
        };
        validate_feature_type(value.get(), &feature.offline_type)?;
    }
    Ok(())
}

/// Check one raw JSON value against a feature's offline type. Takes the raw
/// text so a value that never went through a JSON parser still gets the
/// malformed-input error rather than a type mismatch.
pub(super) fn validate_feature_type(value: &str, offline_type: &str) -> Result<(), RestError> {
    let got = json_value_type(value).map_err(|err| {
        RestErrorKind::IncorrectFeatureValue.with_message(format!(
            "Provided value {} is not in correct JSON format. {}",
            value, err
        ))
    })?;
    let expected = offline_type_to_json_type(offline_type);
    if got != expected {
        return Err(RestErrorKind::WrongDataType.with_message(format!(
            "Got: '{}', expected: '{}' (offline type: {})",
            got, expected, offline_type
        )));
    }
    Ok(())
}
