use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::output::{format_discount, format_rri};
use crate::scoring::Assessment;

/// Audit summary shown on the auditor portal and printed on certificates.
/// Supplied by the underwriting side; not derived from the upload.
pub const AUDIT_CLEARED: &str = "No manual data overrides detected in last 30 days.";
pub const AUDIT_PENDING: &str = "Pending verification: Track Geometry Index (Zone 4).";

/// Default certificate path for an input file: `scores.csv` ->
/// `scores.certificate.txt` next to it.
pub fn default_certificate_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "risk".to_string());
    input.with_file_name(format!("{}.certificate.txt", stem))
}

/// Render a Safety Risk Certificate as plain text.
///
/// The generation time is a parameter so rendering stays deterministic;
/// [`write_certificate`] stamps the current time.
pub fn render_certificate(
    assessment: &Assessment,
    zone: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        "SAFETY RISK CERTIFICATE".to_string(),
        "Railway Safety Risk Translation Framework".to_string(),
        String::new(),
        format!("Zone:      {}", zone),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        String::new(),
        format!("Safety Risk Index (RRI):    {}", format_rri(assessment.rri)),
        format!(
            "Projected Premium Discount: {}",
            format_discount(assessment.discount)
        ),
        String::new(),
        "Departmental safety profile:".to_string(),
    ];

    if assessment.rows.is_empty() {
        lines.push("  (no departments in upload)".to_string());
    } else {
        for row in &assessment.rows {
            let marker = if row.defaulted { "*" } else { " " };
            lines.push(format!(
                "  {:<24} score {:>6.1}{}  weight {:.2}  contribution {:.3}",
                row.department, row.score, marker, row.weight, row.contribution
            ));
        }
        if assessment.rows.iter().any(|r| r.defaulted) {
            lines.push("  * score not numeric in upload, default substituted".to_string());
        }
    }

    lines.push(String::new());
    lines.push("Audit summary:".to_string());
    lines.push(format!("  [cleared] {}", AUDIT_CLEARED));
    lines.push(format!("  [pending] {}", AUDIT_PENDING));
    lines.push(String::new());

    lines.join("\n")
}

/// Write a certificate for `assessment` atomically.
///
/// Uses atomic-write-file so a crash mid-write never leaves a truncated
/// certificate behind.
pub fn write_certificate(path: &Path, assessment: &Assessment, zone: &str) -> Result<()> {
    let contents = render_certificate(assessment, zone, Utc::now());

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open certificate file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .context("Failed to write certificate")?;
    file.commit()
        .with_context(|| format!("Failed to save certificate at {}", path.display()))?;

    Ok(())
}
