//! Screen-level state. Each widget owns its `Synced` documents and is
//! mounted and dropped with its screen.

pub mod analysis;
pub mod board;
pub mod matrix;
pub mod notes;
pub mod tasks;

pub use analysis::{AnalysisBoard, SwotCategory};
pub use board::{BoardSnapshot, CategoryBoard};
pub use matrix::{MatrixBoard, Quadrant};
pub use notes::{NoteBook, NoteBookSnapshot};
pub use tasks::{TaskFilter, TaskList, TaskListSnapshot, TaskStats};
