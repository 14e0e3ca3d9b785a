use serde::{Deserialize, Serialize};

use crate::records::{Category, Task};
use crate::storage::keys;

use super::board::CategoryBoard;

/// Eisenhower quadrants: urgent/important combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quadrant {
    DoFirst,
    Schedule,
    Delegate,
    Eliminate,
}

impl Category for Quadrant {
    const ALL: &'static [Self] = &[
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];
    const RECORDS_KEY: &'static str = keys::MATRIX_TASKS;
    const DRAFTS_KEY: &'static str = keys::MATRIX_DRAFTS;
}

pub type MatrixBoard = CategoryBoard<Quadrant, Task>;
