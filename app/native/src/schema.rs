//! JSON Schema generation for the Snapclip configuration.

use crate::config::SnapclipConfig;

/// Generates a JSON Schema for the Snapclip configuration.
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(SnapclipConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!(
                "https://raw.githubusercontent.com/snapclip/snapclip/main/snapclip.schema.json"
            ),
        );
    }

    schema
}

/// Generates a pretty-printed JSON Schema string.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}
