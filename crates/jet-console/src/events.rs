//! Event plumbing for the console.
//!
//! Terminal input, ticks, and completions of spawned network calls all
//! arrive over one channel, so the draw loop stays single-threaded while
//! login, logout, and document fetches run in the background.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use jet_inspect::FetchError;
use jet_session::{AuthError, SessionView};
use jet_tree::TreeModel;
use tokio::sync::mpsc;

use crate::app::{Action, App, Panel, Screen};

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
    /// Periodic tick.
    Tick,
    /// A session call finished.
    Session(SessionEvent),
    /// A data fetch finished.
    Data(DataEvent),
}

/// Completion of a login or logout task.
#[derive(Debug)]
pub enum SessionEvent {
    /// `login` returned; `view` is the session snapshot afterwards.
    LoginComplete {
        /// Outcome of the call.
        result: Result<(), AuthError>,
        /// Session state after the call.
        view: SessionView,
    },
    /// `logout` returned; local state is cleared either way.
    LogoutComplete {
        /// Outcome of the call.
        result: Result<(), AuthError>,
        /// Session state after the call.
        view: SessionView,
    },
}

/// Completion of a status-document fetch.
#[derive(Debug)]
pub enum DataEvent {
    /// The inspect call returned.
    DocumentFetched(Result<TreeModel, FetchError>),
}

/// Polls the terminal and multiplexes it with background completions.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    /// Start the terminal poll task. `tick_rate` bounds input latency and
    /// paces [`AppEvent::Tick`].
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if event_tx.send(AppEvent::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if event_tx.send(AppEvent::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Next event, or `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// A sender for background tasks to report completions on.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }
}

/// Handle a key press. Returns the background work the press kicked off,
/// if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return None;
    }
    match app.screen {
        Screen::Login => handle_login_key(app, key),
        Screen::Home => handle_home_key(app, key),
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            None
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.switch_focus();
            None
        }
        KeyCode::Backspace => {
            app.login.backspace();
            None
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Char(c) => {
            app.login.type_char(c);
            None
        }
        _ => None,
    }
}

fn handle_home_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            None
        }
        KeyCode::Char('d') => app.switch_panel(Panel::Documentation),
        KeyCode::Char('m') => app.switch_panel(Panel::Monitoring),
        KeyCode::Tab => {
            let next = match app.panel {
                Panel::Documentation => Panel::Monitoring,
                Panel::Monitoring => Panel::Documentation,
            };
            app.switch_panel(next)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.toggle_selected();
            None
        }
        KeyCode::Char('r') if app.panel == Panel::Monitoring => app.request_fetch(),
        KeyCode::Char('l') => Some(Action::Logout),
        _ => None,
    }
}
