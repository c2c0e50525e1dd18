//! The session record and its consumer-facing view.

/// The client's record of the current authenticated identity.
///
/// Starts empty and unauthenticated. Only ever replaced as a whole: login
/// installs a fully populated record, logout resets to the default. No
/// code path updates individual fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Session {
    pub display_name: String,
    pub auth_token: String,
    pub is_authenticated: bool,
}

impl Session {
    pub(crate) fn authenticated(display_name: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            auth_token: auth_token.into(),
            is_authenticated: true,
        }
    }
}

/// What consumers outside the authorization boundary may read.
///
/// Carries no token; authorized calls go through
/// [`SessionStore::authorize`](crate::store::SessionStore::authorize)
/// instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Name the operator logged in with.
    pub display_name: String,
    /// Whether the session holds a server-issued token.
    pub is_authenticated: bool,
}
