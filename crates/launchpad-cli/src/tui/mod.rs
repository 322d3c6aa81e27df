//! Interactive TUI wizard: answer the questions, launch, browse and export plans.

pub mod app;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use launchpad_core::synth::{PlanSynthesizer, TemplateSynthesizer};

use crate::config::LaunchpadConfig;
use app::App;

/// Launch the interactive wizard.
pub async fn run_wizard(config: LaunchpadConfig) -> Result<()> {
    let synth: Arc<dyn PlanSynthesizer> = Arc::new(TemplateSynthesizer::new(config.latency));
    tracing::debug!(synthesizer = synth.name(), "starting wizard");

    let _guard = TerminalGuard::enter(
        enable_raw_mode,
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)
        },
        restore_terminal,
    )?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(synth, config);

    let result = run_event_loop(&mut terminal, &mut app).await;
    app.abort_submission();

    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Puts the terminal back when dropped, on every exit path.
///
/// `restore` runs once `enable` has succeeded, even if `setup` then fails.
struct TerminalGuard {
    restore: fn(),
}

impl TerminalGuard {
    fn enter(
        enable: impl FnOnce() -> io::Result<()>,
        setup: impl FnOnce() -> io::Result<()>,
        restore: fn(),
    ) -> io::Result<Self> {
        enable()?;
        let guard = Self { restore };
        setup()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        (self.restore)();
    }
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = app.tick_rate;

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too.
                if key.kind == KeyEventKind::Press {
                    app.status_message = None;
                    app.handle_key(key);
                }
            }
        } else {
            app.ticks = app.ticks.wrapping_add(1);
        }

        app.poll_submission().await?;

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn guard_restores_when_setup_fails() {
        static RESTORES: AtomicUsize = AtomicUsize::new(0);
        fn restore() {
            RESTORES.fetch_add(1, Ordering::SeqCst);
        }

        let result = TerminalGuard::enter(
            || Ok(()),
            || Err(io::Error::other("no alternate screen")),
            restore,
        );

        assert!(result.is_err());
        assert_eq!(RESTORES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_restores_on_drop_only_after_enable() {
        static RESTORES: AtomicUsize = AtomicUsize::new(0);
        fn restore() {
            RESTORES.fetch_add(1, Ordering::SeqCst);
        }

        let failed =
            TerminalGuard::enter(|| Err(io::Error::other("not a tty")), || Ok(()), restore);
        assert!(failed.is_err());
        assert_eq!(RESTORES.load(Ordering::SeqCst), 0);

        let guard = TerminalGuard::enter(|| Ok(()), || Ok(()), restore).unwrap();
        assert_eq!(RESTORES.load(Ordering::SeqCst), 0);
        drop(guard);
        assert_eq!(RESTORES.load(Ordering::SeqCst), 1);
    }
}
