//! Application state for the Appjet console.

use jet_inspect::FetchError;
use jet_session::{can_enter, AuthError, SessionView};
use jet_status::StatusEntry;
use jet_tree::{outline, DisplayRow, ExpansionState, TreeModel};
use tracing::{error, warn};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Credential prompt; the only screen reachable unauthenticated.
    Login,
    /// Protected home screen.
    Home,
}

/// Which home panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Static documentation browser.
    Documentation,
    /// Live cluster-status viewer.
    Monitoring,
}

/// Which login field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Username input.
    Username,
    /// Password input.
    Password,
}

impl Default for LoginField {
    fn default() -> Self {
        Self::Username
    }
}

/// Work the main loop must start on behalf of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run the login call with these credentials.
    SubmitLogin {
        /// Entered username.
        username: String,
        /// Entered password.
        password: String,
    },
    /// Run the logout call.
    Logout,
    /// Fetch a fresh status document.
    FetchStatus,
}

/// State of the credential prompt.
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Username as typed.
    pub username: String,
    /// Password as typed; rendered masked.
    pub password: String,
    /// Focused field.
    pub focus: LoginField,
    /// A login call is in flight.
    pub pending: bool,
    /// Last failure, shown under the form.
    pub error: Option<String>,
}

impl LoginForm {
    /// Append a character to the focused field.
    pub fn type_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Move focus to the other field.
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// State of the Monitoring panel.
#[derive(Debug, Default)]
pub struct MonitorPanel {
    /// Last successfully fetched document; kept across failed refreshes.
    pub document: Option<TreeModel>,
    /// Expand/collapse state, keyed by path so it survives refreshes.
    pub expansion: ExpansionState,
    /// Derived per-host availability report.
    pub entries: Vec<StatusEntry>,
    /// Selected row in the tree.
    pub selected: usize,
    /// A fetch is in flight.
    pub fetching: bool,
    /// Transient fetch/evaluation failure line.
    pub error: Option<String>,
}

/// Root application state. One instance drives the whole console.
#[derive(Debug)]
pub struct App {
    /// Main loop keeps going while this is set.
    pub running: bool,
    /// Active screen; Home is only reachable through the access gate.
    pub screen: Screen,
    /// Token-free snapshot of the session, for the header line.
    pub session: SessionView,
    /// Credential prompt state.
    pub login: LoginForm,
    /// Active home panel.
    pub panel: Panel,
    /// The static documentation catalog.
    pub docs_tree: TreeModel,
    /// Documentation expand/collapse state.
    pub docs_expansion: ExpansionState,
    /// Selected row on the Documentation panel.
    pub docs_selected: usize,
    /// Monitoring panel state.
    pub monitor: MonitorPanel,
}

impl App {
    /// Fresh console state on the login screen.
    pub fn new(docs_tree: TreeModel) -> Self {
        Self {
            running: true,
            screen: Screen::Login,
            session: SessionView::default(),
            login: LoginForm::default(),
            panel: Panel::Documentation,
            docs_tree,
            docs_expansion: ExpansionState::new(),
            docs_selected: 0,
            monitor: MonitorPanel::default(),
        }
    }

    /// Rows currently visible on the active panel.
    pub fn visible_rows(&self) -> Vec<DisplayRow> {
        match self.panel {
            Panel::Documentation => outline(&self.docs_tree, &self.docs_expansion, &[]),
            Panel::Monitoring => self
                .monitor
                .document
                .as_ref()
                .map(|document| outline(document, &self.monitor.expansion, &[]))
                .unwrap_or_default(),
        }
    }

    /// Selected row index on the active panel.
    pub fn selected(&self) -> usize {
        match self.panel {
            Panel::Documentation => self.docs_selected,
            Panel::Monitoring => self.monitor.selected,
        }
    }

    fn set_selected(&mut self, index: usize) {
        match self.panel {
            Panel::Documentation => self.docs_selected = index,
            Panel::Monitoring => self.monitor.selected = index,
        }
    }

    /// Move the selection up one row.
    pub fn select_previous(&mut self) {
        let index = self.selected().saturating_sub(1);
        self.set_selected(index);
    }

    /// Move the selection down one row.
    pub fn select_next(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        let index = (self.selected() + 1).min(last);
        self.set_selected(index);
    }

    /// Expand or collapse the branch under the cursor. Value rows are
    /// leaves and ignore the toggle.
    pub fn toggle_selected(&mut self) {
        let rows = self.visible_rows();
        let Some(row) = rows.get(self.selected()) else {
            return;
        };
        if row.value.is_some() {
            return;
        }
        let path = row.path.clone();
        match self.panel {
            Panel::Documentation => {
                self.docs_expansion = self.docs_expansion.toggle(&path);
            }
            Panel::Monitoring => {
                self.monitor.expansion = self.monitor.expansion.toggle(&path);
            }
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        if self.selected() > last {
            self.set_selected(last);
        }
    }

    /// Switch the active home panel. Returns the fetch action when the
    /// Monitoring panel needs data.
    pub fn switch_panel(&mut self, panel: Panel) -> Option<Action> {
        self.panel = panel;
        if panel == Panel::Monitoring && !self.monitor.fetching {
            self.monitor.fetching = true;
            return Some(Action::FetchStatus);
        }
        None
    }

    /// Validate the form and produce the login action.
    pub fn submit_login(&mut self) -> Option<Action> {
        if self.login.pending {
            return None;
        }
        if self.login.username.is_empty() {
            self.login.error = Some("username is required".to_string());
            return None;
        }
        self.login.error = None;
        self.login.pending = true;
        Some(Action::SubmitLogin {
            username: self.login.username.clone(),
            password: self.login.password.clone(),
        })
    }

    /// Fold a finished login call back into the state. The home screen is
    /// only entered when the gate passes the resulting session.
    pub fn apply_login(&mut self, result: Result<(), AuthError>, view: SessionView) {
        self.login.pending = false;
        match result {
            Ok(()) if can_enter(&view) => {
                self.session = view;
                self.login = LoginForm::default();
                self.screen = Screen::Home;
            }
            Ok(()) => {
                // Gate refused despite a successful call; stay on login.
                warn!("login call succeeded but the session is not authenticated");
                self.login.error = Some("login did not authenticate".to_string());
            }
            Err(e) => {
                self.login.error = Some(e.to_string());
            }
        }
    }

    /// Request a refresh if none is in flight.
    pub fn request_fetch(&mut self) -> Option<Action> {
        if self.monitor.fetching {
            return None;
        }
        self.monitor.fetching = true;
        Some(Action::FetchStatus)
    }

    /// Fold a finished fetch back into the state. A failure keeps the last
    /// successfully fetched document on screen.
    pub fn apply_fetch(&mut self, result: Result<TreeModel, FetchError>) {
        self.monitor.fetching = false;
        match result {
            Ok(document) => {
                match jet_status::summarize(&document) {
                    Ok(entries) => {
                        self.monitor.entries = entries;
                        self.monitor.error = None;
                    }
                    Err(e) => {
                        // The tree is still browsable; only the report is lost.
                        error!(error = %e, "status document failed evaluation");
                        self.monitor.entries = Vec::new();
                        self.monitor.error = Some(e.to_string());
                    }
                }
                self.monitor.document = Some(document);
                self.clamp_selection();
            }
            Err(e) => {
                error!(error = %e, "status fetch failed");
                self.monitor.error = Some(e.to_string());
            }
        }
    }

    /// Fold a finished logout back into the state: always back to the
    /// login screen with protected data dropped, whatever the result.
    pub fn apply_logout(&mut self, result: Result<(), AuthError>, view: SessionView) {
        if let Err(e) = result {
            warn!(error = %e, "logout did not reach the backend");
        }
        self.session = view;
        self.screen = Screen::Login;
        self.panel = Panel::Documentation;
        self.login = LoginForm::default();
        self.monitor = MonitorPanel::default();
        self.docs_selected = 0;
    }
}
