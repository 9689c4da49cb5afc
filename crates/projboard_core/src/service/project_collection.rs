//! Ordered collection of all projects.
//!
//! # Responsibility
//! - Own creation, lookup, mutation and deletion of projects by 1-based
//!   position.
//! - Keep the store in step with memory: one store call per change.
//!
//! # Invariants
//! - Store writes happen before the in-memory change; a store failure leaves
//!   the collection untouched.
//! - `modify_item` is all-or-nothing: the mutation runs on a copy which only
//!   replaces the live project after both the mutation and the save succeed.
//! - Positions shift down after a delete; callers re-address by position.

use crate::model::board::ClosestDeadline;
use crate::model::date::format_due_date;
use crate::model::error::ModelError;
use crate::model::project::Project;
use crate::repo::project_repo::{ProjectStore, StoreError};
use crate::service::factory::{CommandProjectFactory, ProjectFactory};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPTY_PLACEHOLDER: &str = " --";

/// Errors from collection-level operations.
#[derive(Debug)]
pub enum CollectionError {
    /// The factory could not build a valid project from the input.
    Construction(ModelError),
    /// Project number outside `[1, len]`.
    IndexOutOfRange { index: usize, len: usize },
    /// A mutation inside a project failed.
    Model(ModelError),
    /// Persistence failed; the in-memory collection was not changed.
    Store(StoreError),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Construction(err) => write!(f, "project not created: {err}"),
            Self::IndexOutOfRange { index, len: 0 } => {
                write!(f, "project number {index} is out of range: there are no projects")
            }
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "project number {index} is out of range: expected 1 to {len}"
            ),
            Self::Model(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Construction(err) | Self::Model(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<StoreError> for CollectionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ModelError> for CollectionError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

/// All projects, backed by a store and a factory.
pub struct ProjectCollection<S: ProjectStore, F: ProjectFactory = CommandProjectFactory> {
    projects: Vec<Project>,
    store: S,
    factory: F,
}

impl<S: ProjectStore> ProjectCollection<S, CommandProjectFactory> {
    /// Loads every stored project using the `create NAME` factory.
    pub fn open(store: S) -> Result<Self, CollectionError> {
        Self::load(store, CommandProjectFactory)
    }
}

impl<S: ProjectStore, F: ProjectFactory> ProjectCollection<S, F> {
    /// Populates the collection from the store, in stored order.
    pub fn load(store: S, factory: F) -> Result<Self, CollectionError> {
        let projects = store.load_all_projects()?;
        info!(
            "event=collection_load module=service status=ok projects={}",
            projects.len()
        );
        Ok(Self {
            projects,
            store,
            factory,
        })
    }

    /// Read-only view of all projects in position order.
    pub fn get_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Builds a project from raw command text, persists it, then appends it.
    ///
    /// Returns the new 1-based project number.
    ///
    /// # Errors
    /// - `Construction` when the factory rejects the input.
    /// - `Store` when persisting fails.
    pub fn add_to_repo(&mut self, raw_input: &str) -> Result<usize, CollectionError> {
        let project = self
            .factory
            .create(raw_input)
            .map_err(CollectionError::Construction)?;
        self.store.save_project(&project)?;
        info!(
            "event=project_create module=service status=ok project_id={}",
            project.id
        );
        self.projects.push(project);
        Ok(self.projects.len())
    }

    /// 1-based positional lookup.
    pub fn get_item(&self, project_number: usize) -> Result<&Project, CollectionError> {
        let position = self.position_of(project_number)?;
        Ok(&self.projects[position])
    }

    /// Applies `mutation` to project `project_number` and persists the result.
    pub fn modify_item<T>(
        &mut self,
        project_number: usize,
        mutation: impl FnOnce(&mut Project) -> Result<T, ModelError>,
    ) -> Result<T, CollectionError> {
        let position = self.position_of(project_number)?;
        let mut updated = self.projects[position].clone();
        let output = mutation(&mut updated)?;
        self.store.save_project(&updated)?;
        self.projects[position] = updated;
        Ok(output)
    }

    /// Deletes the stored project first, then removes it from memory.
    ///
    /// # Errors
    /// - `IndexOutOfRange` for a bad project number.
    /// - `Store` when the stored copy could not be deleted; nothing changes.
    pub fn delete_item(&mut self, project_number: usize) -> Result<Project, CollectionError> {
        let position = self.position_of(project_number)?;
        let id = self.projects[position].id;
        if let Err(err) = self.store.delete_project(id) {
            warn!(
                "event=project_delete module=service status=error project_id={id} error={err}"
            );
            return Err(err.into());
        }
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(self.projects.remove(position))
    }

    /// Per-project blocks of plain lines for the table view.
    pub fn all_projects_details_for_table(&self) -> Vec<Vec<String>> {
        self.projects
            .iter()
            .enumerate()
            .map(|(position, project)| project_table_block(position + 1, project))
            .collect()
    }

    fn position_of(&self, project_number: usize) -> Result<usize, CollectionError> {
        if project_number == 0 || project_number > self.projects.len() {
            return Err(CollectionError::IndexOutOfRange {
                index: project_number,
                len: self.projects.len(),
            });
        }
        Ok(project_number - 1)
    }
}

fn project_table_block(project_number: usize, project: &Project) -> Vec<String> {
    let mut lines = vec![
        format!("Project {project_number}: {}", project.name()),
        "Members: ".to_string(),
    ];

    if project.members().is_empty() {
        lines.push(EMPTY_PLACEHOLDER.to_string());
    } else {
        lines.extend(
            project
                .members()
                .all_member_details()
                .map(|detail| format!(" {detail}")),
        );
        lines.push(String::new());
    }

    match project.tasks().closest_deadline_task() {
        ClosestDeadline::Task { task, .. } => {
            let due = task.due_date().map(format_due_date).unwrap_or_default();
            lines.push(format!("Next Deadline: {due}"));
            lines.push(format!(" - {}", task.details()));
            lines.push(String::new());
        }
        ClosestDeadline::NoDeadline => {
            lines.push("Next Deadline: ".to_string());
            lines.push(EMPTY_PLACEHOLDER.to_string());
        }
    }

    lines.push("Overall Progress: ".to_string());
    if project.tasks().is_empty() {
        lines.push(EMPTY_PLACEHOLDER.to_string());
    } else {
        lines.extend(
            project
                .tasks()
                .overall_progress()
                .lines()
                .into_iter()
                .map(|line| format!(" - {line}")),
        );
    }

    lines
}
