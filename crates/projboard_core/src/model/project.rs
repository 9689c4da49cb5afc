//! Project aggregate: one roster plus one task board under a name.
//!
//! # Responsibility
//! - Be the unit of persistence.
//! - Wire cross-entity rules that need both the roster and the board.
//!
//! # Invariants
//! - `name` passes `validate_project_name`.
//! - Removing a member leaves no stale index number in any task.
//! - Assignments only reference members present in the roster.

use crate::model::board::TaskBoard;
use crate::model::error::{ModelError, ModelResult};
use crate::model::member::Member;
use crate::model::roster::MemberRoster;
use crate::model::task::{Task, TaskState};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier used as the persistence key.
pub type ProjectId = Uuid;

static RESERVED_NAME_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[/\\:*?"<>|\p{Cc}]"#).expect("valid reserved name regex")
});

/// Checks the persisted-name constraint and returns the trimmed name.
///
/// # Errors
/// - `ModelError::InvalidProjectName` when blank or containing any of
///   `/ \ : * ? " < > |` or control characters.
pub fn validate_project_name(name: &str) -> ModelResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || RESERVED_NAME_CHARS_RE.is_match(trimmed) {
        return Err(ModelError::InvalidProjectName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Outcome of a cascading member removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRemoval {
    pub member: Member,
    /// Task numbers the member was assigned to.
    pub tasks_affected: Vec<usize>,
    /// Task numbers reverted from DOING to OPEN.
    pub tasks_reopened: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    name: String,
    #[serde(default)]
    members: MemberRoster,
    #[serde(default)]
    tasks: TaskBoard,
}

impl Project {
    pub fn new(name: &str) -> ModelResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: validate_project_name(name)?,
            members: MemberRoster::new(),
            tasks: TaskBoard::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &MemberRoster {
        &self.members
    }

    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// Board access for edits that cannot break roster consistency.
    pub fn tasks_mut(&mut self) -> &mut TaskBoard {
        &mut self.tasks
    }

    pub fn num_of_members(&self) -> usize {
        self.members.num_of_members()
    }

    pub fn num_of_tasks(&self) -> usize {
        self.tasks.num_of_tasks()
    }

    pub fn add_member(&mut self, member: Member) -> u32 {
        self.members.add_member(member)
    }

    pub fn edit_member(
        &mut self,
        index_number: u32,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> bool {
        self.members.edit_member(index_number, name, phone, email)
    }

    /// Removes a member and cascades the removal into every task.
    ///
    /// Assignment sets drop the member and shift higher index numbers down
    /// in step with the roster renumbering; credit shares are derived from
    /// the remaining assignees; emptied DOING tasks reopen.
    pub fn remove_member(&mut self, index_number: u32) -> ModelResult<MemberRemoval> {
        let member = self.members.remove_member(index_number)?;
        let (tasks_affected, tasks_reopened) = self.tasks.release_member(index_number);
        Ok(MemberRemoval {
            member,
            tasks_affected,
            tasks_reopened,
        })
    }

    pub fn add_task(&mut self, task: Task) -> usize {
        self.tasks.add_task(task)
    }

    pub fn remove_task(&mut self, task_number: usize) -> ModelResult<Task> {
        self.tasks.remove_task(task_number)
    }

    /// Assigns roster member `index_number` to task `task_number`.
    ///
    /// Returns `false` when the member was already assigned.
    pub fn assign_member(&mut self, task_number: usize, index_number: u32) -> ModelResult<bool> {
        let member = self.members.get_member(index_number)?;
        let task = self.tasks.get_task_mut(task_number)?;
        Ok(task.assign_member(member))
    }

    /// Returns `false` when the member was not assigned.
    pub fn unassign_member(&mut self, task_number: usize, index_number: u32) -> ModelResult<bool> {
        let member = self.members.get_member(index_number)?;
        let task = self.tasks.get_task_mut(task_number)?;
        Ok(task.remove_member(member))
    }

    /// Credit earned per member over DONE tasks, in roster order.
    pub fn credit_by_member(&self) -> Vec<(&Member, u32)> {
        let mut earned = vec![0_u32; self.members.num_of_members()];
        for task in self.tasks.iter() {
            if task.state() != TaskState::Done {
                continue;
            }
            for (index_number, share) in task.credit_shares() {
                let position = (index_number as usize).checked_sub(1);
                if let Some(total) = position.and_then(|position| earned.get_mut(position)) {
                    *total += share;
                }
            }
        }
        self.members.iter().zip(earned).collect()
    }
}
