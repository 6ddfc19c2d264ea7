use crate::error::{RestError, RestErrorKind};
use regex::Regex;
use std::sync::LazyLock;

const TYPE_MISMATCH_PHRASE: &str = "Wrong data type.";

// "primay" is the store's own spelling; these phrases are wire fixtures.
const PRIMARY_KEY_PHRASES: [&str; 3] = [
    "Wrong number of primary-key columns.",
    "Wrong primay-key column.",
    "Column does not exist.",
];

static TYPE_MISMATCH_DETAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Expecting (\w+)\. Column: (\w+)").expect("valid literal regex"));

/// Map a backing-store status code and raw message to the REST taxonomy.
/// All knowledge of the store's message wording is confined to this module.
pub(super) fn translate_store_error(code: i32, message: &str) -> RestError {
    if message.contains(TYPE_MISMATCH_PHRASE) {
        if let Some(captures) = TYPE_MISMATCH_DETAIL.captures(message) {
            let data_type = &captures[1];
            let column = &captures[2];
            RestErrorKind::WrongDataType.with_message(format!(
                "Primary key '{}' should be in '{}' format.",
                column, data_type
            ))
        } else {
            RestErrorKind::WrongDataType.into()
        }
    } else if PRIMARY_KEY_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
    {
        RestErrorKind::IncorrectPrimaryKey.with_message(message)
    } else if code == 400 {
        RestErrorKind::ReadFromDbFailBadInput.with_message(message)
    } else {
        RestErrorKind::ReadFromDbFail.into()
    }
}
