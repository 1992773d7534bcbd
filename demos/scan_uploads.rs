//! Scan Uploads Example
//!
//! Runs the GPS guard over files as if they had just been uploaded and
//! prints a JSON report. The MIME type is guessed from the file extension.
//!
//! Run with: cargo run --example scan_uploads -- [--fail-closed] <file>...

use std::{env, fs, path::Path};

use forbid_gps::{GpsGuard, GuardConfig, UploadCandidate, report::ScanReport};
use image::ImageFormat;

fn guess_mime_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let fail_closed = args.iter().any(|a| a == "--fail-closed");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    if files.is_empty() {
        println!("Usage: scan_uploads [--fail-closed] <file>...");
        return Ok(());
    }

    let candidates: Vec<UploadCandidate> = files
        .iter()
        .map(|file| {
            let path = Path::new(file.as_str());
            let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            UploadCandidate::new(guess_mime_type(path), path)
                .with_name(file.as_str())
                .with_size(size)
        })
        .collect();

    let guard = GpsGuard::new().with_config(GuardConfig {
        fail_closed_on_decode_error: fail_closed,
        ..GuardConfig::default()
    });

    let outcomes = guard.assess_all(&candidates);
    let report = ScanReport::new(&candidates, &outcomes, guard.translator());
    println!("{}", report.to_json()?);

    if report.rejected > 0 {
        std::process::exit(1);
    }

    Ok(())
}
