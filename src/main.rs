//! linkdeck - terminal dashboard for a shared link catalog
//!
//! A Ratatui-based TUI for browsing categorized links, opening them in
//! dashboard panes or the system browser, and curating the catalog through
//! the linkdeck daemon. Pass a route query string as the first argument to
//! restore a session, e.g. `linkdeck 'view=dashboard&active=crm&panes=...'`.

mod app;
mod catalog;
mod config;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkdeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = TuiConfig::load();

    // Initial route: CLI argument, then environment
    let initial_route = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LINKDECK_ROUTE").ok());

    let mut terminal = setup_terminal()?;
    let result = match App::new(&config, initial_route).await {
        Ok(mut app) => run(&mut terminal, &mut app).await,
        Err(err) => Err(err),
    };
    restore_terminal(&mut terminal)?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        // The grid layout depends on the current terminal size
        let size = terminal.size()?;
        app.terminal_size = Some((size.height, size.width));

        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key).await?,
                // Columns are recomputed from the new size on the next draw
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }
    Ok(())
}
