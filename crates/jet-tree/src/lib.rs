//! Tree model and outline renderer for the Appjet console.
//!
//! Nested data from the backend is classified once at the boundary into a
//! tagged [`TreeModel`], and every recursive consumer (the documentation
//! browser, the live status viewer) walks the same three variants. Which
//! branches are open lives in a path-keyed [`ExpansionState`], so operator
//! state survives a re-fetch of the underlying document.

pub mod expand;
pub mod model;
pub mod outline;

pub use expand::ExpansionState;
pub use model::{PathSegment, TreeModel, TreePath};
pub use outline::{outline, DisplayRow};
