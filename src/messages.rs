//! User-facing rejection messages.
//!
//! Templates are plain English source strings. A [`Translate`] implementation
//! maps them to the user's language before `%s` is substituted, so existing
//! translations keyed by these exact strings keep working.

use std::borrow::Cow;

pub const DECODER_UNAVAILABLE: &str =
    "The image may contain GPS data, but it can't be checked because EXIF support is not available.";

pub const GPS_DATA_FOUND: &str = "Image contains GPS data: %s";

pub const DECODE_FAILED: &str = "Image could not be inspected for GPS data: %s";

const PLACEHOLDER: &str = "%s";

pub trait Translate: Send + Sync {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str>;
}

/// Returns every message as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// Translates `template` and substitutes the first `%s` with `argument`.
pub fn format_message(translator: &dyn Translate, template: &str, argument: &str) -> String {
    translator.translate(template).replacen(PLACEHOLDER, argument, 1)
}

pub fn gps_data_found(translator: &dyn Translate, tags: &[&str]) -> String {
    format_message(translator, GPS_DATA_FOUND, &tags.join(" "))
}

pub fn decoder_unavailable(translator: &dyn Translate) -> String {
    translator.translate(DECODER_UNAVAILABLE).into_owned()
}

pub fn decode_failed(translator: &dyn Translate, reason: &str) -> String {
    format_message(translator, DECODE_FAILED, reason)
}
