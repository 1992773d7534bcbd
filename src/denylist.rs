use crate::MetadataTagSet;

/// EXIF tag names that reject an upload when present.
///
/// The order here is the order in which offending tags are reported.
pub const GPS_TAG_DENYLIST: &[&str] = &[
    "GPSAltitude",
    "GPSAltitudeRef",
    "GPSImgDirection",
    "GPSImgDirectionRef",
    "GPSLatitude",
    "GPSLatitudeRef",
    "GPSLongitude",
    "GPSLongitudeRef",
];

const GPS_PREFIX: &str = "GPS";

/// Denylisted tags present in `tags`, in denylist order.
pub fn matching_tags(tags: &MetadataTagSet) -> Vec<&'static str> {
    GPS_TAG_DENYLIST
        .iter()
        .copied()
        .filter(|name| tags.contains(name))
        .collect()
}

/// Human-readable field name: `GPSLatitude` becomes `Latitude`.
pub fn strip_gps_prefix(tag: &str) -> &str {
    tag.strip_prefix(GPS_PREFIX).unwrap_or(tag)
}
