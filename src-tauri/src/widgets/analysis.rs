use serde::{Deserialize, Serialize};

use crate::records::{Category, Point};
use crate::storage::keys;

use super::board::CategoryBoard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwotCategory {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl Category for SwotCategory {
    const ALL: &'static [Self] = &[
        SwotCategory::Strengths,
        SwotCategory::Weaknesses,
        SwotCategory::Opportunities,
        SwotCategory::Threats,
    ];
    const RECORDS_KEY: &'static str = keys::SWOT_POINTS;
    const DRAFTS_KEY: &'static str = keys::SWOT_DRAFTS;
}

pub type AnalysisBoard = CategoryBoard<SwotCategory, Point>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore, StoreAdapter};
    use std::sync::Arc;

    #[test]
    fn points_and_drafts_survive_a_remount() {
        let adapter = StoreAdapter::in_memory();
        {
            let mut board = AnalysisBoard::mount(adapter.clone());
            board.set_draft(SwotCategory::Strengths, "strong brand");
            board.add(SwotCategory::Strengths);
            board.set_draft(SwotCategory::Threats, "supply");
        }

        let board = AnalysisBoard::mount(adapter);

        let strengths = board.records(SwotCategory::Strengths);
        assert_eq!(strengths.len(), 1);
        assert_eq!(strengths[0].text, "strong brand");
        assert_eq!(board.draft(SwotCategory::Threats), "supply");
        assert_eq!(board.draft(SwotCategory::Strengths), "");
    }

    #[test]
    fn stored_points_outlive_an_unknown_category() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                keys::SWOT_POINTS,
                r#"{"strengths":[{"id":1,"text":"brand"}],"extra":[]}"#,
            )
            .unwrap();
        let adapter = StoreAdapter::new(store.clone());

        let mut board = AnalysisBoard::mount(adapter.clone());
        assert_eq!(board.total(), 1);
        board.set_draft(SwotCategory::Weaknesses, "cash flow");
        board.add(SwotCategory::Weaknesses);

        let reloaded = AnalysisBoard::mount(adapter);
        assert_eq!(reloaded.records(SwotCategory::Strengths)[0].text, "brand");
        assert_eq!(reloaded.records(SwotCategory::Weaknesses)[0].text, "cash flow");
    }

    #[test]
    fn clear_everything_resets_points_and_drafts() {
        let store = Arc::new(MemoryStore::new());
        let adapter = StoreAdapter::new(store.clone());
        let mut board = AnalysisBoard::mount(adapter.clone());

        board.set_draft(SwotCategory::Strengths, "loyal customers");
        board.add(SwotCategory::Strengths);
        board.set_draft(SwotCategory::Threats, "new competitor");
        board.add(SwotCategory::Threats);
        board.set_draft(SwotCategory::Weaknesses, "unfinished");
        assert_eq!(board.total(), 2);

        board.clear_everything();

        assert_eq!(board.total(), 0);
        assert_eq!(board.draft(SwotCategory::Weaknesses), "");

        let reloaded = AnalysisBoard::mount(adapter);
        assert_eq!(reloaded.total(), 0);
        assert_eq!(reloaded.draft(SwotCategory::Weaknesses), "");
    }

    #[test]
    fn snapshot_uses_category_names() {
        let mut board = AnalysisBoard::mount(StoreAdapter::in_memory());
        board.set_draft(SwotCategory::Opportunities, "export market");
        board.add(SwotCategory::Opportunities);

        let json = serde_json::to_value(board.snapshot()).unwrap();

        assert_eq!(json["total"], 1);
        assert_eq!(json["records"]["opportunities"][0]["text"], "export market");
        assert_eq!(json["drafts"]["strengths"], "");
    }
}
