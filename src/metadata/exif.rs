use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use log::{debug, warn};

use crate::{
    MetadataTagSet,
    error::{GuardError, Result},
    metadata::{Container, Decoded, MetadataDecoder},
};

/// Reads EXIF blocks from JPEG, TIFF, PNG, WebP and HEIF files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifDecoder;

impl ExifDecoder {
    pub fn new() -> Self {
        Self
    }

    fn read_header<R: Read>(reader: &mut R) -> Result<Vec<u8>> {
        let mut header = Vec::with_capacity(Container::HEADER_LEN);
        reader
            .by_ref()
            .take(Container::HEADER_LEN as u64)
            .read_to_end(&mut header)?;
        Ok(header)
    }

    fn collect_tags(exif: &exif::Exif) -> MetadataTagSet {
        let mut tags = MetadataTagSet::new();

        for field in exif.fields() {
            let tag_name = format!("{}", field.tag);
            let value = field.display_value().to_string();
            tags.insert(tag_name, value);
        }

        tags
    }
}

impl MetadataDecoder for ExifDecoder {
    fn decode(&self, path: &Path) -> Result<Decoded> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let header = Self::read_header(&mut reader)?;
        let Some(container) = Container::sniff(&header) else {
            debug!("{}: not an EXIF-capable container", path.display());
            return Ok(Decoded::NoMetadata);
        };
        reader.seek(SeekFrom::Start(0))?;

        // Skip broken fields so the readable ones (GPS included) still get checked.
        let mut exif_reader = exif::Reader::new();
        exif_reader.continue_on_error(true);

        let parsed = exif_reader.read_from_container(&mut reader).or_else(|e| {
            e.distill_partial_result(|errors| {
                for error in &errors {
                    warn!("{}: skipped malformed EXIF field: {}", path.display(), error);
                }
            })
        });

        match parsed {
            Ok(exif) => {
                let tags = Self::collect_tags(&exif);
                debug!("{}: {:?} with {} EXIF tags", path.display(), container, tags.len());
                Ok(Decoded::Tags(tags))
            }
            Err(exif::Error::NotFound(_)) => {
                debug!("{}: {:?} without EXIF block", path.display(), container);
                Ok(Decoded::NoMetadata)
            }
            Err(exif::Error::Io(e)) => Err(GuardError::Io(e)),
            Err(e) => Err(GuardError::Decode(e.to_string())),
        }
    }
}
