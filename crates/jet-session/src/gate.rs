//! The access gate in front of protected views.

use crate::session::SessionView;

/// Whether this session may enter protected screens.
///
/// Pure check over the view; the navigation layer routes sessions that
/// fail it back to the login screen before anything protected renders.
pub fn can_enter(session: &SessionView) -> bool {
    session.is_authenticated
}
