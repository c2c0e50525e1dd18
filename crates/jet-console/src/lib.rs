//! Appjet operator console.
//!
//! Terminal front end over the session store and the inspect client: a
//! login screen gating a home screen with two panels, the static
//! documentation browser and the live cluster-status viewer. Both panels
//! render through the same tree outline.

pub mod app;
pub mod docs;
pub mod events;
pub mod ui;
