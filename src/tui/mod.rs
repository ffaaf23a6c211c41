pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Run the dashboard until the user quits.
///
/// Stderr is held while the TUI owns the terminal so reload diagnostics
/// don't corrupt the display; held messages are flushed after restore.
pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    crate::warnings::hold();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        // A reload parses the file fresh; the previous assessment is
        // discarded entirely.
        if app.needs_reload {
            app.needs_reload = false;
            match crate::load::load_and_assess(&app.input_path, app.verbose) {
                Ok(assessment) => {
                    app.apply_assessment(assessment);
                    app.show_flash(format!("Reloaded {}", app.input_path.display()));
                }
                Err(e) => {
                    app.show_flash(format!("Reload failed: {:#}", e));
                }
            }
            app.last_reload = Instant::now();
        }

        if app.pending_export {
            app.pending_export = false;
            let path = crate::certificate::default_certificate_path(&app.input_path);
            match crate::certificate::write_certificate(&path, &app.assessment, &app.zone) {
                Ok(()) => {
                    app.show_flash(format!("Certificate written to {}", path.display()));
                }
                Err(e) => {
                    app.show_flash(format!("Export failed: {:#}", e));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    ratatui::restore();

    // Flush held warnings now that the terminal is restored
    for msg in crate::warnings::release() {
        eprintln!("{}", msg);
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

            KeyCode::Tab => app.toggle_portal(),

            KeyCode::Char('r') => {
                app.needs_reload = true;
                app.show_flash("Reloading...".to_string());
            }

            KeyCode::Char('e') => {
                app.pending_export = true;
            }

            KeyCode::Char('b') => app.show_breakdown(),

            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
