use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::certificate::{AUDIT_CLEARED, AUDIT_PENDING};
use crate::output::{format_discount, format_rri};
use crate::tui::app::{App, InputMode, Portal};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.portal {
        Portal::Officer => render_officer(frame, chunks[2], app),
        Portal::Auditor => render_auditor(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "Railway Safety Risk Translation Framework";
    let right = format!("Zone: {}", app.zone);
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(theme::TITLE_COLOR).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(theme::MUTED)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Railway Officer", "Insurance Auditor"];
    let selected = match app.portal {
        Portal::Officer => 0,
        Portal::Auditor => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(
            Style::default()
                .fg(theme::TITLE_COLOR)
                .bold()
                .reversed(),
        )
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_officer(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([Constraint::Length(5), Constraint::Fill(1)]).split(area);

    render_metric_cards(frame, chunks[0], app);
    render_department_table(frame, chunks[1], app);
}

fn render_metric_cards(frame: &mut Frame, area: Rect, app: &App) {
    let cards =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let rri = app.assessment.rri;
    let rri_block = Block::bordered().title(" Safety Risk Index (RRI) ");
    let rri_value = Paragraph::new(Line::from(Span::styled(
        format_rri(rri),
        Style::default().fg(theme::rri_color(rri)).bold(),
    )))
    .alignment(Alignment::Center)
    .block(rri_block);
    frame.render_widget(rri_value, cards[0]);

    let discount_block = Block::bordered().title(" Projected Premium Discount ");
    let discount_value = Paragraph::new(Line::from(Span::styled(
        format_discount(app.assessment.discount),
        Style::default().bold(),
    )))
    .alignment(Alignment::Center)
    .block(discount_block);
    frame.render_widget(discount_value, cards[1]);
}

fn render_department_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.assessment.rows.is_empty() {
        let empty_msg = Paragraph::new("No departments in upload")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .assessment
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let index = format!("{}.", idx + 1);
            let marker = if row.defaulted { "*" } else { "" };
            let score_str = format!("{:.1}{}", row.score, marker);
            let score_cell = Line::from(Span::styled(
                score_str,
                Style::default().fg(theme::score_color(row.score)),
            ));
            let profile = safety_bar(row.score, 10);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme::INDEX_COLOR)),
                Cell::from(row.department.clone()),
                Cell::from(score_cell),
                Cell::from(format!("{:.2}", row.weight)),
                Cell::from(format!("{:.3}", row.contribution)),
                Cell::from(profile),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "#",
                "Department",
                "Score",
                "Weight",
                "Contribution",
                "Profile",
            ])
            .style(theme::header_style())
            .bottom_margin(1),
        )
        .row_highlight_style(theme::row_selected());

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_auditor(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(area);

    let banner = Paragraph::new(Line::from(Span::styled(
        format!("Verified data from {}", app.zone),
        Style::default().fg(theme::BANNER_COLOR),
    )))
    .block(Block::bordered().title(" Underwriting Portal "));
    frame.render_widget(banner, chunks[0]);

    let audit_lines = vec![
        Line::from(Span::styled(
            format!("[cleared] {}", AUDIT_CLEARED),
            Style::default().fg(theme::AUDIT_CLEARED_COLOR),
        )),
        Line::from(Span::styled(
            format!("[pending] {}", AUDIT_PENDING),
            Style::default().fg(theme::AUDIT_PENDING_COLOR),
        )),
    ];
    let audit = Paragraph::new(audit_lines).block(Block::bordered().title(" Audit Summary "));
    frame.render_widget(audit, chunks[1]);

    let export = Paragraph::new(Line::from(vec![
        Span::styled("e", Style::default().fg(theme::STATUS_KEY_COLOR)),
        Span::styled(
            ": download certified risk report",
            Style::default().fg(theme::MUTED),
        ),
    ]))
    .block(Block::bordered());
    frame.render_widget(export, chunks[2]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Reload failed") || msg.starts_with("Export failed") {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} departments", app.assessment.rows.len());

        let elapsed = app.last_reload.elapsed();
        let reload_time = if elapsed.as_secs() < 60 {
            format!("loaded {}s ago", elapsed.as_secs())
        } else {
            format!("loaded {}m ago", elapsed.as_secs() / 60)
        };

        let hints: Vec<(&str, &str)> = match app.portal {
            Portal::Officer => vec![
                ("j/k", ":nav "),
                ("b", ":breakdown "),
                ("Tab", ":auditor "),
                ("r", ":reload "),
                ("e", ":export "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Portal::Auditor => vec![
                ("Tab", ":officer "),
                ("r", ":reload "),
                ("e", ":export "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![
            Span::styled(count, Style::default().fg(theme::MUTED)),
            Span::raw(" "),
            Span::styled(reload_time, Style::default().fg(theme::MUTED)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

/// A filled/empty bar for a 0-100 score, like `███████░░░`.
fn safety_bar(score: f64, width: usize) -> Line<'static> {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme::score_color(score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(bar_color),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(theme::BAR_EMPTY),
        ));
    }

    Line::from(spans)
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the contribution breakdown popup for the selected department
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(row) = app.selected_row() else {
        return;
    };

    let popup_area = centered_rect_fixed(46, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(format!(" {} ", row.department));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let share = if app.assessment.rri > 0.0 {
        format!("{:.1}%", (row.contribution / app.assessment.rri) * 100.0)
    } else {
        "-".to_string()
    };

    let mut lines = vec![
        Line::from(format!("Score:        {:.1} / 100", row.score)),
        Line::from(format!("Weight:       {:.2}", row.weight)),
        Line::from(format!("Contribution: {:.3}", row.contribution)),
        Line::from(format!("Share of RRI: {}", share)),
    ];
    if row.defaulted {
        lines.push(Line::from(Span::styled(
            "Score was not numeric; default 70 substituted",
            Style::default().fg(theme::AUDIT_PENDING_COLOR),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc/b: close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(50, 13, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(Color::Cyan).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / Down      ", key_style),
            Span::raw("Move down"),
        ]),
        Line::from(vec![
            Span::styled("k / Up        ", key_style),
            Span::raw("Move up"),
        ]),
        Line::from(vec![
            Span::styled("b             ", key_style),
            Span::raw("Contribution breakdown"),
        ]),
        Line::from(vec![
            Span::styled("Tab           ", key_style),
            Span::raw("Toggle Officer/Auditor portal"),
        ]),
        Line::from(vec![
            Span::styled("r             ", key_style),
            Span::raw("Reload the score table"),
        ]),
        Line::from(vec![
            Span::styled("e             ", key_style),
            Span::raw("Export certified risk report"),
        ]),
        Line::from(vec![
            Span::styled("?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme::MUTED),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}
