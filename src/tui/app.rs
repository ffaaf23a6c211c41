use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::scoring::{AnnotatedRow, Assessment};

const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Which portal the dashboard is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Portal {
    /// Operations dashboard: metrics, departmental table, safety profile.
    Officer,
    /// Underwriting portal: verified source banner and audit summary.
    Auditor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
    Breakdown,
}

pub struct App {
    pub input_path: PathBuf,
    pub zone: String,
    pub assessment: Assessment,
    pub table_state: ratatui::widgets::TableState,
    pub portal: Portal,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub last_reload: Instant,
    pub needs_reload: bool,
    pub pending_export: bool,
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(input_path: PathBuf, zone: String, assessment: Assessment, verbose: bool) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !assessment.rows.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            input_path,
            zone,
            assessment,
            table_state,
            portal: Portal::Officer,
            input_mode: InputMode::Normal,
            flash_message: None,
            last_reload: Instant::now(),
            needs_reload: false,
            pending_export: false,
            should_quit: false,
            verbose,
        }
    }

    /// Replace the assessment after a reload, keeping the selection in range.
    pub fn apply_assessment(&mut self, assessment: Assessment) {
        self.assessment = assessment;
        let len = self.assessment.rows.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    pub fn selected_row(&self) -> Option<&AnnotatedRow> {
        self.table_state
            .selected()
            .and_then(|i| self.assessment.rows.get(i))
    }

    pub fn next_row(&mut self) {
        let len = self.assessment.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.assessment.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn toggle_portal(&mut self) {
        self.portal = match self.portal {
            Portal::Officer => Portal::Auditor,
            Portal::Auditor => Portal::Officer,
        };
    }

    pub fn show_flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    /// Expire the flash message after its display window.
    pub fn update_flash(&mut self) {
        if let Some((_, shown_at)) = &self.flash_message {
            if shown_at.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_breakdown(&mut self) {
        if self.portal == Portal::Officer && self.selected_row().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn dismiss_breakdown(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::{ScoreRow, ScoreTable};
    use crate::scoring::assess;

    fn sample_app(rows: &[(&str, &str)]) -> App {
        let assessment = assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: rows
                .iter()
                .map(|(d, s)| ScoreRow {
                    department: d.to_string(),
                    score: s.to_string(),
                })
                .collect(),
        });
        App::new(
            PathBuf::from("scores.csv"),
            "Northern Railway Zone".to_string(),
            assessment,
            false,
        )
    }

    #[test]
    fn test_new_selects_first_row() {
        let app = sample_app(&[("Track", "80"), ("Signaling", "90")]);
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.selected_row().unwrap().department, "Track");
    }

    #[test]
    fn test_new_with_empty_upload_selects_nothing() {
        let app = sample_app(&[]);
        assert_eq!(app.table_state.selected(), None);
        assert!(app.selected_row().is_none());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = sample_app(&[("Track", "80"), ("Signaling", "90")]);
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(1));
    }

    #[test]
    fn test_toggle_portal() {
        let mut app = sample_app(&[("Track", "80")]);
        assert_eq!(app.portal, Portal::Officer);
        app.toggle_portal();
        assert_eq!(app.portal, Portal::Auditor);
        app.toggle_portal();
        assert_eq!(app.portal, Portal::Officer);
    }

    #[test]
    fn test_apply_assessment_clamps_selection() {
        let mut app = sample_app(&[("Track", "80"), ("Signaling", "90"), ("Maintenance", "60")]);
        app.table_state.select(Some(2));

        let smaller = assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: vec![ScoreRow {
                department: "Track".to_string(),
                score: "80".to_string(),
            }],
        });
        app.apply_assessment(smaller);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_apply_empty_assessment_clears_selection() {
        let mut app = sample_app(&[("Track", "80")]);
        let empty = assess(&ScoreTable {
            headers: vec!["Department".to_string(), "Score".to_string()],
            rows: vec![],
        });
        app.apply_assessment(empty);
        assert_eq!(app.table_state.selected(), None);
    }

    #[test]
    fn test_breakdown_requires_officer_selection() {
        let mut app = sample_app(&[("Track", "80")]);
        app.toggle_portal();
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Normal);

        app.toggle_portal();
        app.show_breakdown();
        assert_eq!(app.input_mode, InputMode::Breakdown);
    }

    #[test]
    fn test_flash_expires() {
        let mut app = sample_app(&[("Track", "80")]);
        app.show_flash("Reloaded".to_string());
        assert!(app.flash_message.is_some());
        // Backdate the flash past its window.
        app.flash_message = Some((
            "Reloaded".to_string(),
            Instant::now() - Duration::from_secs(4),
        ));
        app.update_flash();
        assert!(app.flash_message.is_none());
    }
}
