pub mod controller;
pub mod state;

pub use controller::{FocusSnapshot, FocusTimer};
pub use state::{FocusPhase, FocusSession};
