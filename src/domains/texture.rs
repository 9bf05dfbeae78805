use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion status reported by the session's texture download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureStatus {
    Pending,
    Finished,
    NotFound,
    Aborted,
    Timeout,
}

impl TextureStatus {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            TextureStatus::NotFound | TextureStatus::Aborted | TextureStatus::Timeout
        )
    }
}

impl fmt::Display for TextureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TextureStatus::Pending => "Pending",
            TextureStatus::Finished => "Finished",
            TextureStatus::NotFound => "NotFound",
            TextureStatus::Aborted => "Aborted",
            TextureStatus::Timeout => "Timeout",
        };
        f.write_str(name)
    }
}

/// Decoder output exactly as the session hands it over: rows run
/// bottom-to-top and each pixel is four bytes in blue, green, red, alpha
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    #[serde(with = "crate::domains::base64_bytes")]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureJob {
    pub asset_id: Uuid,
    pub status: TextureStatus,
    #[serde(default)]
    pub image: Option<RawImage>,
}

/// Where a texture job is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStage {
    Decoding,
    Encoding,
    Persisted,
    Archiving,
    Completed,
    Failed,
}
