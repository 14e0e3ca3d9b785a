//! Storage keys. These are part of the on-disk format; never rename them.

pub const MATRIX_TASKS: &str = "eisenhowerTasks";
pub const MATRIX_DRAFTS: &str = "eisenhowerInputs";
pub const TODO_TASKS: &str = "todoListTodos";
pub const NOTES: &str = "notes";
pub const SWOT_POINTS: &str = "swotItems";
pub const SWOT_DRAFTS: &str = "swotInputs";
pub const FOCUS_SESSION: &str = "pomodoroState";
pub const PREFERENCES: &str = "preferences";
