use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

pub mod denylist;
pub mod error;
pub mod guard;
pub mod messages;
pub mod metadata;
pub mod report;

pub use denylist::GPS_TAG_DENYLIST;
pub use guard::{GpsGuard, Outcome};
pub use metadata::{Decoded, MetadataDecoder};

/// MIME prefix of uploads the guard inspects.
pub const IMAGE_MIME_PREFIX: &str = "image/";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Reject images whose metadata could not be decoded instead of letting them through.
    pub fail_closed_on_decode_error: bool,
    /// Spread batch inspection over the rayon thread pool.
    pub parallel: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            fail_closed_on_decode_error: false,
            parallel: true,
        }
    }
}

/// An uploaded file as handed over by the upload pipeline.
///
/// Field names match the pipeline's upload array (`type`, `tmp_name`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "tmp_name")]
    pub tmp_path: PathBuf,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadCandidate {
    pub fn new(mime_type: impl Into<String>, tmp_path: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            mime_type: mime_type.into(),
            tmp_path: tmp_path.into(),
            size: 0,
            error: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with(IMAGE_MIME_PREFIX)
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Decoded metadata: tag name to display value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataTagSet {
    tags: BTreeMap<String, String>,
}

impl MetadataTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first value seen for a tag name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataTagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
