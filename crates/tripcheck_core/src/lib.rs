//! Core domain logic for the trip checklist.
//! This crate is the single source of truth for item, import/export and
//! bingo board invariants.

pub mod bingo;
pub mod config;
pub mod db;
pub mod defaults;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;

pub use bingo::board::{BingoBoard, BingoView, BoardCell};
pub use bingo::lines::{completed_lines, grid_side, BingoLine, LineKind};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id_alloc::IdAllocator;
pub use model::item::{parse_score_field, ChecklistItem, FieldUpdate, ItemId, ScoreField};
pub use model::score::{normalize_score, Score, ScoreInput};
pub use repo::image_repo::{ImageBlob, ImageStore, MemoryImageStore, SqliteImageStore};
pub use repo::kv_repo::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use repo::{RepoError, RepoResult};
pub use service::checklist_service::{ChecklistService, ChecklistSummary, STORAGE_KEY};
pub use service::image_request::{ImageRequestGuard, ImageRequestToken};
pub use service::score_draft::ScoreDraft;
pub use transfer::export::{ExportDocument, EXPORT_FILE_NAME};
pub use transfer::import::{ImportError, UNTITLED_LABEL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
