//! Date, time and two-stage datetime picking.
//!
//! The datetime flow closes the date overlay before opening the time
//! overlay; [`settle_transition`] sits between the two so the second overlay
//! is never presented while the first is still animating out.

pub mod flow;
pub mod session;
pub mod transition;

pub use flow::{DateTimeFlow, DateTimeMode, FlowError, FlowStage, FlowStep};
pub use session::{DateTimeSession, SessionStep};
pub use transition::settle_transition;
