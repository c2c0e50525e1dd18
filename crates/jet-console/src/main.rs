//! jet-console — Appjet operator console.
//!
//! Authenticates against the appjet backend, then browses the static
//! documentation catalog and the live cluster-status document in an
//! expandable terminal tree.

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jet_console::app::{Action, App, Panel, Screen};
use jet_console::docs;
use jet_console::events::{handle_key, AppEvent, DataEvent, EventHandler, SessionEvent};
use jet_console::ui;
use jet_inspect::InspectClient;
use jet_session::SessionStore;

#[derive(Parser)]
#[command(name = "jet-console")]
#[command(about = "Appjet operator console - authenticate and inspect cluster state")]
#[command(version)]
struct Cli {
    /// Appjet backend base URL
    #[arg(long, env = "APPJET_SERVER", default_value = "http://localhost:9999")]
    server: String,

    /// Monitoring refresh interval in seconds
    #[arg(long, default_value = "5")]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so the alternate screen stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("jet_console=info".parse()?))
        .init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &cli).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cli: &Cli,
) -> anyhow::Result<()> {
    let store = SessionStore::new(cli.server.clone());
    let inspect = InspectClient::new(cli.server.clone());
    let mut app = App::new(docs::documentation_tree());
    let mut event_handler = EventHandler::new(Duration::from_millis(100));
    let poll_interval = Duration::from_secs(cli.poll_interval.max(1));
    let mut last_fetch = Instant::now();

    while app.running {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let Some(event) = event_handler.next().await else {
            break;
        };
        match event {
            AppEvent::Key(key) => {
                if let Some(action) = handle_key(&mut app, key) {
                    dispatch(action, &store, &inspect, &event_handler, &mut last_fetch);
                }
            }
            AppEvent::Resize(_, _) => {
                // Redrawn on the next loop pass.
            }
            AppEvent::Tick => {
                let monitoring = app.screen == Screen::Home && app.panel == Panel::Monitoring;
                if monitoring && last_fetch.elapsed() >= poll_interval {
                    if let Some(action) = app.request_fetch() {
                        dispatch(action, &store, &inspect, &event_handler, &mut last_fetch);
                    }
                }
            }
            AppEvent::Session(SessionEvent::LoginComplete { result, view }) => {
                app.apply_login(result, view);
            }
            AppEvent::Session(SessionEvent::LogoutComplete { result, view }) => {
                app.apply_logout(result, view);
            }
            AppEvent::Data(DataEvent::DocumentFetched(result)) => {
                app.apply_fetch(result);
            }
        }
    }

    Ok(())
}

/// Start the background call for an action; its completion comes back
/// through the event channel.
fn dispatch(
    action: Action,
    store: &SessionStore,
    inspect: &InspectClient,
    events: &EventHandler,
    last_fetch: &mut Instant,
) {
    let tx = events.sender();
    match action {
        Action::SubmitLogin { username, password } => {
            let store = store.clone();
            tokio::spawn(async move {
                let result = store.login(&username, &password).await;
                let view = store.view();
                let _ = tx.send(AppEvent::Session(SessionEvent::LoginComplete {
                    result,
                    view,
                }));
            });
        }
        Action::Logout => {
            let store = store.clone();
            tokio::spawn(async move {
                let result = store.logout().await;
                let view = store.view();
                let _ = tx.send(AppEvent::Session(SessionEvent::LogoutComplete {
                    result,
                    view,
                }));
            });
        }
        Action::FetchStatus => {
            *last_fetch = Instant::now();
            let store = store.clone();
            let inspect = inspect.clone();
            tokio::spawn(async move {
                let result = inspect.fetch(&store).await;
                let _ = tx.send(AppEvent::Data(DataEvent::DocumentFetched(result)));
            });
        }
    }
}
