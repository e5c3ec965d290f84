//! Selection list engine behind the in-app list screen.

pub mod filter;
pub mod screen;
pub mod selection;

pub use filter::filter_items;
pub use screen::{ListLayout, ListRow, ListScreen, PressOutcome};
pub use selection::{SelectionDraft, shows_select_all, toggle_all, toggle_value};
