//! Core domain logic for the projboard project/task tracker.
//! This crate is the single source of truth for project, roster and board
//! invariants; the CLI only parses input and renders output.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::assignment::MemberAssignmentSet;
pub use model::board::{ClosestDeadline, ProgressSummary, TaskBoard, TaskField};
pub use model::error::{ModelError, ModelResult};
pub use model::member::Member;
pub use model::project::{validate_project_name, MemberRemoval, Project, ProjectId};
pub use model::roster::MemberRoster;
pub use model::task::{Task, TaskId, TaskState};
pub use repo::project_repo::{ProjectStore, SqliteProjectStore, StoreError, StoreResult};
pub use service::factory::{
    parse_member_details, parse_task_details, CommandProjectFactory, MemberDetails,
    ProjectFactory,
};
pub use service::project_collection::{CollectionError, ProjectCollection};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
