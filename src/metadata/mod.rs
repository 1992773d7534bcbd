use std::{path::Path, sync::Arc};

use crate::{MetadataTagSet, error::Result};

#[cfg(feature = "exif")]
pub mod exif;

/// What a decoder found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Tags(MetadataTagSet),
    /// The file's format carries no metadata container this decoder reads.
    NoMetadata,
}

/// Capability that turns a file into a tag-name to value mapping.
///
/// "No metadata" is an ordinary outcome; `Err` is reserved for files that
/// should have been readable but were not.
pub trait MetadataDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Decoded>;
}

impl<D: MetadataDecoder + ?Sized> MetadataDecoder for Arc<D> {
    fn decode(&self, path: &Path) -> Result<Decoded> {
        (**self).decode(path)
    }
}

/// The decoder compiled into this build, if any.
#[cfg(feature = "exif")]
pub fn default_decoder() -> Option<Arc<dyn MetadataDecoder>> {
    Some(Arc::new(self::exif::ExifDecoder::new()))
}

#[cfg(not(feature = "exif"))]
pub fn default_decoder() -> Option<Arc<dyn MetadataDecoder>> {
    None
}

/// Image containers able to carry an EXIF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Jpeg,
    Tiff,
    Png,
    WebP,
    Heif,
}

impl Container {
    /// Bytes needed by [`Container::sniff`].
    pub const HEADER_LEN: usize = 12;

    pub fn sniff(header: &[u8]) -> Option<Self> {
        const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

        if header.starts_with(&[0xFF, 0xD8]) {
            Some(Container::Jpeg)
        } else if header.starts_with(b"II*\0") || header.starts_with(b"MM\0*") {
            Some(Container::Tiff)
        } else if header.starts_with(PNG_SIGNATURE) {
            Some(Container::Png)
        } else if header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP" {
            Some(Container::WebP)
        } else if header.len() >= 8 && &header[4..8] == b"ftyp" {
            Some(Container::Heif)
        } else {
            None
        }
    }
}
