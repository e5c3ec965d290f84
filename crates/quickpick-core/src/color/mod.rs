//! HSV color picking.

pub mod draft;
pub mod session;

pub use draft::{ColorDraft, ColorError};
pub use session::ColorSession;
