//! Terminal client for the catalog server.
//!
//! ## Usage
//!
//! ```bash
//! library client --endpoint http://127.0.0.1:4000/
//! ```
//!
//! ## Keybindings
//!
//! - `Tab`: Next page
//! - `a` / `b`: Authors / books
//! - `n`: Add book (logged in)
//! - `l`: Login (logged out)
//! - `o`: Logout
//! - `e`: Edit the focused form
//! - `←/→`, `Enter`: Pick a genre on the books page
//! - `r`: Refresh
//! - `q`: Quit

mod api;
mod app;
mod queries;
mod token_store;
mod ui;

pub use api::{AuthorRow, BookAuthor, BookInput, BookRow, CatalogApi, HttpApi};
pub use app::{App, InputMode, Page};
pub use token_store::TokenStore;

use crate::config::ClientSettings;
use crate::error::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

pub fn run_client(api: HttpApi, token_store: TokenStore, settings: &ClientSettings) -> Result<()> {
    let mut app = App::new(
        api,
        token_store,
        Duration::from_secs(settings.error_display_secs),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app<A: CatalogApi>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A>,
) -> io::Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}
