//! Project store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist, delete and load whole `Project` aggregates.
//!
//! # Invariants
//! - Load order equals first-save order; re-saving keeps the position.
//! - Read paths reject undecodable documents instead of masking them.
//! - A loaded task never references a member number outside the roster.

use crate::db::DbError;
use crate::model::project::{validate_project_name, Project, ProjectId};
use log::debug;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for project store operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    NotFound(ProjectId),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "project document encoding failed: {err}"),
            Self::NotFound(id) => write!(f, "stored project not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Persistence contract consumed by `ProjectCollection`.
pub trait ProjectStore {
    /// Inserts or replaces one project.
    fn save_project(&self, project: &Project) -> StoreResult<()>;
    /// Removes one project; `NotFound` when nothing was stored under `id`.
    fn delete_project(&self, id: ProjectId) -> StoreResult<()>;
    /// All stored projects in creation order.
    fn load_all_projects(&self) -> StoreResult<Vec<Project>>;
}

impl<S: ProjectStore + ?Sized> ProjectStore for &S {
    fn save_project(&self, project: &Project) -> StoreResult<()> {
        (**self).save_project(project)
    }

    fn delete_project(&self, id: ProjectId) -> StoreResult<()> {
        (**self).delete_project(id)
    }

    fn load_all_projects(&self) -> StoreResult<Vec<Project>> {
        (**self).load_all_projects()
    }
}

/// SQLite-backed project store; one JSON document row per project.
pub struct SqliteProjectStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectStore for SqliteProjectStore<'_> {
    fn save_project(&self, project: &Project) -> StoreResult<()> {
        let document = serde_json::to_string(project)?;
        self.conn.execute(
            "INSERT INTO projects (uuid, name, document)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(uuid) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![project.id.to_string(), project.name(), document],
        )?;
        debug!(
            "event=project_save module=repo status=ok project_id={} bytes={}",
            project.id,
            document.len()
        );
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!("event=project_delete module=repo status=ok project_id={id}");
        Ok(())
    }

    fn load_all_projects(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT uuid, document FROM projects ORDER BY seq ASC;")?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let document: String = row.get("document")?;
            projects.push(parse_project_document(&uuid_text, &document)?);
        }

        Ok(projects)
    }
}

fn parse_project_document(uuid_text: &str, document: &str) -> StoreResult<Project> {
    let project: Project = serde_json::from_str(document).map_err(|err| {
        StoreError::InvalidData(format!("undecodable document for project `{uuid_text}`: {err}"))
    })?;
    validate_project_name(project.name()).map_err(|err| {
        StoreError::InvalidData(format!("project `{uuid_text}` has {err}"))
    })?;
    if project.id.to_string() != uuid_text {
        return Err(StoreError::InvalidData(format!(
            "document id `{}` does not match row uuid `{uuid_text}`",
            project.id
        )));
    }
    check_assignments(uuid_text, &project)?;
    Ok(project)
}

fn check_assignments(uuid_text: &str, project: &Project) -> StoreResult<()> {
    let roster_len = project.num_of_members();
    for (position, task) in project.tasks().iter().enumerate() {
        let dangling = task
            .assigned_members()
            .assigned_index_numbers()
            .find(|&index| index == 0 || index as usize > roster_len);
        if let Some(index) = dangling {
            return Err(StoreError::InvalidData(format!(
                "project `{uuid_text}` task {} is assigned to member {index}, \
                 roster has {roster_len}",
                position + 1
            )));
        }
    }
    Ok(())
}
