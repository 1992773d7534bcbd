use std::{fmt, sync::Arc};

use log::{debug, info, warn};
use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{
    GuardConfig, UploadCandidate,
    denylist::matching_tags,
    messages::{self, Translate, Untranslated},
    metadata::{Decoded, MetadataDecoder, default_decoder},
};

/// Result of inspecting one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NotAnImage,
    /// No metadata decoder is available, so the image cannot be checked.
    DecoderUnavailable,
    NoMetadataContainer,
    DecodeFailed { reason: String, fail_closed: bool },
    /// Denylisted tags found, in denylist order.
    GpsTagsPresent(Vec<&'static str>),
    Clean,
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::NotAnImage => "not_an_image",
            Outcome::DecoderUnavailable => "decoder_unavailable",
            Outcome::NoMetadataContainer => "no_metadata",
            Outcome::DecodeFailed { .. } => "decode_failed",
            Outcome::GpsTagsPresent(_) => "gps_tags_present",
            Outcome::Clean => "clean",
        }
    }

    pub fn is_rejected(&self) -> bool {
        match self {
            Outcome::DecoderUnavailable | Outcome::GpsTagsPresent(_) => true,
            Outcome::DecodeFailed { fail_closed, .. } => *fail_closed,
            Outcome::NotAnImage | Outcome::NoMetadataContainer | Outcome::Clean => false,
        }
    }

    /// The message to surface to the uploader, or `None` when the upload may proceed.
    pub fn rejection_message(&self, translator: &dyn Translate) -> Option<String> {
        match self {
            Outcome::DecoderUnavailable => Some(messages::decoder_unavailable(translator)),
            Outcome::GpsTagsPresent(tags) => Some(messages::gps_data_found(translator, tags)),
            Outcome::DecodeFailed {
                reason,
                fail_closed: true,
            } => Some(messages::decode_failed(translator, reason)),
            _ => None,
        }
    }
}

/// Upload filter rejecting images that carry GPS location tags.
#[derive(Clone)]
pub struct GpsGuard {
    decoder: Option<Arc<dyn MetadataDecoder>>,
    translator: Arc<dyn Translate>,
    config: GuardConfig,
}

impl GpsGuard {
    /// A guard using the decoder compiled into this build.
    pub fn new() -> Self {
        Self {
            decoder: default_decoder(),
            translator: Arc::new(Untranslated),
            config: GuardConfig::default(),
        }
    }

    pub fn with_decoder<D: MetadataDecoder + 'static>(mut self, decoder: D) -> Self {
        self.decoder = Some(Arc::new(decoder));
        self
    }

    pub fn without_decoder(mut self) -> Self {
        self.decoder = None;
        self
    }

    pub fn with_translator<T: Translate + 'static>(mut self, translator: T) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn translator(&self) -> &dyn Translate {
        self.translator.as_ref()
    }

    pub fn has_decoder(&self) -> bool {
        self.decoder.is_some()
    }

    pub fn assess(&self, candidate: &UploadCandidate) -> Outcome {
        if !candidate.is_image() {
            return Outcome::NotAnImage;
        }

        let label = label(candidate);

        let Some(ref decoder) = self.decoder else {
            warn!("{}: no metadata decoder available, cannot check for GPS data", label);
            return Outcome::DecoderUnavailable;
        };

        match decoder.decode(&candidate.tmp_path) {
            Ok(Decoded::NoMetadata) => Outcome::NoMetadataContainer,
            Ok(Decoded::Tags(tags)) => {
                let found = matching_tags(&tags);
                debug!("{}: {} tags decoded, {} denylisted", label, tags.len(), found.len());

                if found.is_empty() {
                    Outcome::Clean
                } else {
                    Outcome::GpsTagsPresent(found)
                }
            }
            Err(e) => {
                let fail_closed = self.config.fail_closed_on_decode_error;
                warn!(
                    "{}: metadata could not be decoded ({}), {}",
                    label,
                    e,
                    if fail_closed { "rejecting" } else { "letting through" }
                );
                Outcome::DecodeFailed {
                    reason: e.to_string(),
                    fail_closed,
                }
            }
        }
    }

    /// Sets `error` on the candidate when it must be rejected; otherwise returns it untouched.
    pub fn inspect(&self, mut candidate: UploadCandidate) -> UploadCandidate {
        let outcome = self.assess(&candidate);

        if let Some(message) = outcome.rejection_message(self.translator()) {
            info!("Rejecting upload {}: {}", label(&candidate), message);
            candidate.error = Some(message);
        }

        candidate
    }

    pub fn assess_all(&self, candidates: &[UploadCandidate]) -> Vec<Outcome> {
        if self.config.parallel {
            candidates.par_iter().map(|c| self.assess(c)).collect()
        } else {
            candidates.iter().map(|c| self.assess(c)).collect()
        }
    }

    pub fn inspect_all(&self, candidates: Vec<UploadCandidate>) -> Vec<UploadCandidate> {
        if self.config.parallel {
            candidates.into_par_iter().map(|c| self.inspect(c)).collect()
        } else {
            candidates.into_iter().map(|c| self.inspect(c)).collect()
        }
    }
}

impl Default for GpsGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GpsGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpsGuard")
            .field("has_decoder", &self.has_decoder())
            .field("config", &self.config)
            .finish()
    }
}

fn label(candidate: &UploadCandidate) -> String {
    match candidate.name {
        Some(ref name) => name.clone(),
        None => candidate.tmp_path.display().to_string(),
    }
}
