use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::{ScoreRow, ScoreTable};

/// Read an uploaded score table from a CSV file.
///
/// The first row is the header row. Headers are trimmed for compatibility
/// with varying export formats, but columns are always resolved by position:
/// column 0 is the department, column 1 is the score. Extra columns are
/// ignored.
///
/// A file with fewer than two header columns, or a data row with fewer than
/// two fields, is rejected here so the scoring engine never sees a malformed
/// table.
pub fn read_score_file(path: &Path) -> Result<ScoreTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open score table at {}", path.display()))?;
    read_score_table(file)
        .with_context(|| format!("Failed to read score table at {}", path.display()))
}

/// Read an uploaded score table from any reader. See [`read_score_file`].
pub fn read_score_table<R: Read>(reader: R) -> Result<ScoreTable> {
    // Flexible mode so short rows reach our own check below and get a
    // row-numbered error instead of a generic length mismatch.
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.len() < 2 {
        anyhow::bail!(
            "Score table needs at least two columns (department, score), found {}",
            headers.len()
        );
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Malformed data row {}", idx + 1))?;
        if record.len() < 2 {
            anyhow::bail!(
                "Data row {}: expected at least two fields (department, score), found {}",
                idx + 1,
                record.len()
            );
        }
        rows.push(ScoreRow {
            department: record[0].to_string(),
            score: record[1].to_string(),
        });
    }

    Ok(ScoreTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(input: &str) -> Result<ScoreTable> {
        read_score_table(Cursor::new(input.to_string()))
    }

    #[test]
    fn test_reads_two_column_table() {
        let table = read("Department,Score\nTrack,80%\nSignaling,90\n").unwrap();
        assert_eq!(table.headers, vec!["Department", "Score"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].department, "Track");
        assert_eq!(table.rows[0].score, "80%");
        assert_eq!(table.rows[1].department, "Signaling");
        assert_eq!(table.rows[1].score, "90");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let table = read(" Department , Score \nTrack,80\n").unwrap();
        assert_eq!(table.headers, vec!["Department", "Score"]);
    }

    #[test]
    fn test_row_values_are_not_trimmed_here() {
        // Cleaning is the engine's job; the reader carries cells verbatim.
        let table = read("Department,Score\n Track ,80\n").unwrap();
        assert_eq!(table.rows[0].department, " Track ");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let table = read("Department,Score,Notes\nTrack,80,audited\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].department, "Track");
        assert_eq!(table.rows[0].score, "80");
    }

    #[test]
    fn test_header_only_table_is_valid() {
        let table = read("Department,Score\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_single_column_table_is_rejected() {
        let err = read("Department\nTrack\n").unwrap_err();
        assert!(err.to_string().contains("at least two columns"));
    }

    #[test]
    fn test_short_data_row_is_rejected_with_row_number() {
        let err = read("Department,Score\nTrack,80\nSignaling\n").unwrap_err();
        assert!(err.to_string().contains("Data row 2"));
    }

    #[test]
    fn test_columns_are_positional_regardless_of_header_names() {
        // Header names do not matter; only position does.
        let table = read("Score,Department\nTrack,80\n").unwrap();
        assert_eq!(table.rows[0].department, "Track");
        assert_eq!(table.rows[0].score, "80");
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = read_score_file(Path::new("/nonexistent/scores.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/scores.csv"));
    }
}
