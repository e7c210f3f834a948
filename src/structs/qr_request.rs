use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::content::ContentInput;
use crate::models::style::{ExportFormat, StyleConfig};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrRequest {
    pub content: ContentInput,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub format: ExportFormat,
    #[validate(range(min = 64, max = 2048, message = "Size must be between 64 and 2048 pixels"))]
    pub size: Option<u32>,
}

#[derive(Serialize)]
pub struct PayloadResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: String,
}
