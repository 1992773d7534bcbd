use serde::Serialize;

use crate::{UploadCandidate, denylist::strip_gps_prefix, guard::Outcome, messages::Translate};

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub scanned: usize,
    pub rejected: usize,
    pub entries: Vec<ScanEntry>,
}

#[derive(Debug, Serialize)]
pub struct ScanEntry {
    pub name: String,
    pub mime_type: String,
    pub outcome: &'static str,
    pub gps_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanEntry {
    fn new(candidate: &UploadCandidate, outcome: &Outcome, translator: &dyn Translate) -> Self {
        let gps_fields = match outcome {
            Outcome::GpsTagsPresent(tags) => tags
                .iter()
                .map(|tag| strip_gps_prefix(tag).to_string())
                .collect(),
            _ => Vec::new(),
        };

        Self {
            name: candidate
                .name
                .clone()
                .unwrap_or_else(|| candidate.tmp_path.display().to_string()),
            mime_type: candidate.mime_type.clone(),
            outcome: outcome.kind(),
            gps_fields,
            error: outcome.rejection_message(translator),
        }
    }
}

impl ScanReport {
    /// Pairs each candidate with the outcome at the same index.
    pub fn new(candidates: &[UploadCandidate], outcomes: &[Outcome], translator: &dyn Translate) -> Self {
        let entries: Vec<ScanEntry> = candidates
            .iter()
            .zip(outcomes)
            .map(|(candidate, outcome)| ScanEntry::new(candidate, outcome, translator))
            .collect();

        Self {
            scanned: entries.len(),
            rejected: entries.iter().filter(|e| e.error.is_some()).count(),
            entries,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
