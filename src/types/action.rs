use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request envelope: `{"action": ..., "params": {...}}`.
///
/// One variant per supported provider operation. An unknown action tag is a
/// deserialization failure, so dispatch never sees an action it cannot
/// handle. Text-style actions forward their params verbatim; the image
/// upload actions carry typed params because their URL fields are replaced
/// with fetched payloads before the provider call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", content = "params", rename_all = "kebab-case")]
pub enum Action {
    Completion(Value),
    Chat(Value),
    Edit(Value),
    Image(Value),
    ImageEdit(ImageEditParams),
    ImageVariation(ImageVariationParams),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageEditParams {
    /// URL of the image to edit.
    pub image: String,
    /// Optional URL of the mask image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(
        default,
        rename = "responseFormat",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageVariationParams {
    /// URL of the source image.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(
        default,
        rename = "responseFormat",
        skip_serializing_if = "Option::is_none"
    )]
    pub response_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}
