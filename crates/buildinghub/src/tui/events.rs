//! Event handling for the TUI.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use buildinghub_client::ApiClient;
use buildinghub_core::Settings;
use buildinghub_models::Role;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::app::App;
use super::ui;
use super::views::Backend;

/// Result type for TUI operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize the terminal for TUI mode.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI. With `role`, skip the login screen.
pub fn run(settings: Settings, role: Option<Role>) -> Result<()> {
    // Requests run here; the runtime must outlive the app.
    let runtime = Runtime::new()?;

    let mut app = match ApiClient::new(settings.api_url.clone(), settings.timeout) {
        Ok(client) => {
            info!(api_url = %settings.api_url, "TUI starting");
            App::new(Some(Backend::new(client, runtime.handle().clone())))
        }
        Err(e) => {
            warn!(error = %e, "Backend unavailable");
            let mut app = App::new(None);
            app.notices.error(format!("Không thể kết nối máy chủ: {}", e));
            app
        }
    };

    if let Some(role) = role {
        app.sign_in(role);
    }

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    // Drop pages before the runtime so their fetches abort cleanly.
    drop(app);
    runtime.shutdown_timeout(Duration::from_millis(500));

    result
}

/// Main event loop.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
