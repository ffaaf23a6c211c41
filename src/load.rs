use anyhow::Result;
use std::path::Path;

use crate::report;
use crate::scoring::{self, Assessment, FALLBACK_SCORE};

/// Read a score table from disk and assess it.
///
/// This is the one pipeline both entry points share: the CLI calls it for
/// one-shot reports and exports, the dashboard calls it on every reload. Each
/// call parses the file fresh; nothing is retained from a previous upload.
///
/// In verbose mode, rows whose score text failed numeric parsing are reported
/// on stderr. The substitution itself is silent by design and never an error.
pub fn load_and_assess(path: &Path, verbose: bool) -> Result<Assessment> {
    let table = report::read_score_file(path)?;

    if verbose {
        crate::warnln!("Loaded {} rows from {}", table.len(), path.display());
    }

    let assessment = scoring::assess(&table);

    if verbose {
        for (row, input) in assessment.rows.iter().zip(&table.rows) {
            if row.defaulted {
                crate::warnln!(
                    "Score {:?} for '{}' is not numeric, using {}",
                    input.score,
                    row.department,
                    FALLBACK_SCORE
                );
            }
        }
        crate::warnln!(
            "RRI {:.3}, discount {}% across {} departments",
            assessment.rri,
            assessment.discount,
            assessment.rows.len()
        );
    }

    Ok(assessment)
}
