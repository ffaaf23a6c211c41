use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::Assessment;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the RRI for display, always 3 decimals.
pub fn format_rri(rri: f64) -> String {
    format!("{:.3}", rri)
}

/// Format the discount percentage. Two decimals with at most one trailing
/// zero trimmed: 3.6 -> "3.6%", 3.65 -> "3.65%", 0 -> "0.0%".
pub fn format_discount(discount: f64) -> String {
    let s = format!("{:.2}", discount);
    let trimmed = s.strip_suffix('0').unwrap_or(&s);
    format!("{}%", trimmed)
}

/// Format the two headline metrics of an assessment.
pub fn format_metrics(assessment: &Assessment, use_colors: bool) -> String {
    let rri = format_rri(assessment.rri);
    let discount = format_discount(assessment.discount);

    if use_colors {
        format!(
            "{} {}\n{} {}",
            "Safety Risk Index (RRI):".cyan(),
            rri.bold(),
            "Projected Premium Discount:".cyan(),
            discount.bold()
        )
    } else {
        format!(
            "Safety Risk Index (RRI): {}\nProjected Premium Discount: {}",
            rri, discount
        )
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a department name to fit available width, accounting for Unicode
fn truncate_department(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the annotated rows as a table with columns:
/// index, department, score, weight, contribution.
///
/// Defaulted scores carry a `*` marker, explained in a footer line. Rows are
/// shown in upload order; there is no sorting or aggregation.
pub fn format_assessment_table(assessment: &Assessment, use_colors: bool) -> String {
    if assessment.rows.is_empty() {
        return "No departments in upload.".to_string();
    }

    // Fixed numeric columns; the department column absorbs the rest.
    let fixed_width = 4 + 2 + 7 + 2 + 6 + 2 + 12;
    let department_width = match get_terminal_width() {
        Some(w) if w > fixed_width + 10 => (w - fixed_width).min(40),
        Some(_) => 20,
        None => 40,
    };

    let mut lines = Vec::new();
    let header = format!(
        "{:>4}  {:<dep$}  {:>7}  {:>6}  {:>12}",
        "#",
        "Department",
        "Score",
        "Weight",
        "Contribution",
        dep = department_width
    );
    if use_colors {
        lines.push(header.bold().to_string());
    } else {
        lines.push(header);
    }

    let mut any_defaulted = false;
    for (idx, row) in assessment.rows.iter().enumerate() {
        let index = format!("{:>3}.", idx + 1);
        let department = truncate_department(&row.department, department_width);
        let marker = if row.defaulted {
            any_defaulted = true;
            "*"
        } else {
            ""
        };
        let score = format!("{:.1}{}", row.score, marker);
        let weight = format!("{:.2}", row.weight);
        let contribution = format!("{:.3}", row.contribution);

        if use_colors {
            lines.push(format!(
                "{}  {:<dep$}  {:>7}  {:>6}  {:>12}",
                index.dimmed(),
                department,
                score.bold(),
                weight,
                contribution,
                dep = department_width
            ));
        } else {
            lines.push(format!(
                "{}  {:<dep$}  {:>7}  {:>6}  {:>12}",
                index,
                department,
                score,
                weight,
                contribution,
                dep = department_width
            ));
        }
    }

    if any_defaulted {
        let footer = format!(
            "   * score not numeric, {} substituted",
            crate::scoring::engine::FALLBACK_SCORE
        );
        if use_colors {
            lines.push(footer.dimmed().to_string());
        } else {
            lines.push(footer);
        }
    }

    lines.join("\n")
}

/// Format the annotated rows as tab-separated values for scripting.
/// Columns: department, score, weight, contribution (no headers, no colors).
pub fn format_tsv(assessment: &Assessment) -> String {
    assessment
        .rows
        .iter()
        .map(|row| {
            format!(
                "{}\t{:.1}\t{:.2}\t{:.3}",
                row.department, row.score, row.weight, row.contribution
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize the full assessment as pretty JSON for downstream tooling.
pub fn format_json(assessment: &Assessment) -> Result<String> {
    Ok(serde_json::to_string_pretty(assessment)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{ScoreRow, ScoreTable};
    use crate::scoring::assess;

    fn sample_assessment() -> Assessment {
        assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: vec![
                ScoreRow {
                    department: "Track".to_string(),
                    score: "80%".to_string(),
                },
                ScoreRow {
                    department: "Signaling".to_string(),
                    score: "90".to_string(),
                },
                ScoreRow {
                    department: "Rolling Stock".to_string(),
                    score: "70".to_string(),
                },
                ScoreRow {
                    department: "Maintenance".to_string(),
                    score: "60".to_string(),
                },
            ],
        })
    }

    #[test]
    fn test_format_rri() {
        assert_eq!(format_rri(0.79), "0.790");
        assert_eq!(format_rri(0.0), "0.000");
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(3.6), "3.6%");
        assert_eq!(format_discount(3.65), "3.65%");
        assert_eq!(format_discount(0.0), "0.0%");
        assert_eq!(format_discount(12.0), "12.0%");
    }

    #[test]
    fn test_format_metrics_plain() {
        let metrics = format_metrics(&sample_assessment(), false);
        assert!(metrics.contains("Safety Risk Index (RRI): 0.790"));
        assert!(metrics.contains("Projected Premium Discount: 3.6%"));
    }

    #[test]
    fn test_format_table_contains_rows() {
        let table = format_assessment_table(&sample_assessment(), false);
        assert!(table.contains("Department"));
        assert!(table.contains("Track"));
        assert!(table.contains("80.0"));
        assert!(table.contains("0.40"));
        assert!(table.contains("0.320"));
        assert!(table.contains(" 1."));
        assert!(table.contains(" 4."));
        // No defaulted rows: no footer
        assert!(!table.contains("substituted"));
    }

    #[test]
    fn test_format_table_marks_defaulted_scores() {
        let assessment = assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: vec![ScoreRow {
                department: "Track".to_string(),
                score: "N/A".to_string(),
            }],
        });
        let table = format_assessment_table(&assessment, false);
        assert!(table.contains("70.0*"));
        assert!(table.contains("substituted"));
    }

    #[test]
    fn test_format_table_empty() {
        let assessment = assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: vec![],
        });
        assert_eq!(
            format_assessment_table(&assessment, false),
            "No departments in upload."
        );
    }

    #[test]
    fn test_format_tsv() {
        let tsv = format_tsv(&sample_assessment());
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Track\t80.0\t0.40\t0.320");
        assert_eq!(lines[0].split('\t').count(), 4);
    }

    #[test]
    fn test_format_json_roundtrips() {
        let json = format_json(&sample_assessment()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rri"], 0.79);
        assert_eq!(value["discount"], 3.6);
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["rows"][0]["department"], "Track");
    }

    #[test]
    fn test_truncate_department() {
        assert_eq!(truncate_department("Track", 20), "Track");
        assert_eq!(
            truncate_department("Permanent Way Engineering", 15),
            "Permanent Wa..."
        );
        assert_eq!(truncate_department("Track", 3), "Tra");
    }
}
