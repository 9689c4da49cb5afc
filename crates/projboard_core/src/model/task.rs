//! Task domain model and state machine.
//!
//! # Responsibility
//! - Hold one unit of work and its member assignments.
//! - Derive credit shares and apply the assignment-driven state rule.
//!
//! # Invariants
//! - Equality compares `(name, priority, credit)` only; containers remove
//!   tasks by position or `TaskId`, never by value.
//! - A DOING task whose assignment set is emptied by a member release
//!   reverts to OPEN. TODO and DONE are left untouched.
//! - Credit shares always sum to `credit` when at least one member is
//!   assigned.

use crate::model::assignment::MemberAssignmentSet;
use crate::model::date::{format_due_date, parse_due_date};
use crate::model::error::{ModelError, ModelResult};
use crate::model::member::Member;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Stable handle for a task inside its board.
pub type TaskId = Uuid;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// No one working on it yet.
    Open,
    /// Acknowledged but not started.
    Todo,
    /// Actively worked on.
    Doing,
    /// Finished. Can still be reopened explicitly.
    Done,
}

impl TaskState {
    pub const ALL: [TaskState; 4] = [Self::Open, Self::Todo, Self::Doing, Self::Done];

    /// Case-insensitive token lookup.
    ///
    /// # Errors
    /// - `ModelError::InvalidState` for anything other than
    ///   `open|todo|doing|done`.
    pub fn parse(token: &str) -> ModelResult<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(ModelError::InvalidState(token.trim().to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }
}

impl Display for TaskState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of work on a project board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    name: String,
    priority: i32,
    due_date: Option<NaiveDate>,
    credit: u32,
    state: TaskState,
    #[serde(default)]
    requirements: Vec<String>,
    #[serde(default)]
    assigned: MemberAssignmentSet,
}

impl Task {
    /// Creates an OPEN task with no requirements and nobody assigned.
    pub fn new(name: impl Into<String>, priority: i32, credit: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            priority,
            due_date: None,
            credit,
            state: TaskState::Open,
            requirements: Vec::new(),
            assigned: MemberAssignmentSet::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    pub fn with_requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn credit(&self) -> u32 {
        self.credit
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn assigned_members(&self) -> &MemberAssignmentSet {
        &self.assigned
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn num_of_task_requirements(&self) -> usize {
        self.requirements.len()
    }

    pub fn set_task_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_task_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn set_task_credit(&mut self, credit: u32) {
        self.credit = credit;
    }

    /// Parses `DD/MM/YYYY` and replaces the due date.
    ///
    /// # Errors
    /// - `ModelError::InvalidDate`; the previous date is kept.
    pub fn set_due_date(&mut self, value: &str) -> ModelResult<()> {
        self.due_date = Some(parse_due_date(value)?);
        Ok(())
    }

    pub fn set_due_date_value(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Case-insensitive state change.
    ///
    /// # Errors
    /// - `ModelError::InvalidState`; the current state is kept.
    pub fn set_task_state(&mut self, token: &str) -> ModelResult<()> {
        self.state = TaskState::parse(token)?;
        Ok(())
    }

    pub fn assign_member(&mut self, member: &Member) -> bool {
        self.assigned.add_member(member)
    }

    pub fn remove_member(&mut self, member: &Member) -> bool {
        self.assigned.remove_member(member)
    }

    /// Applies a roster removal of `index_number` to this task.
    ///
    /// Shifts higher index numbers down by one and reopens a DOING task whose
    /// last assignee was removed. Returns whether the removed member was
    /// assigned here.
    pub fn release_member(&mut self, index_number: u32) -> bool {
        let was_assigned = self.assigned.shift_after_removal(index_number);
        if was_assigned && self.assigned.is_empty() && self.state == TaskState::Doing {
            self.state = TaskState::Open;
        }
        was_assigned
    }

    /// Splits `credit` equally among assignees.
    ///
    /// The remainder goes one unit each to the lowest index numbers, so the
    /// result is deterministic and always sums to `credit`.
    pub fn credit_shares(&self) -> BTreeMap<u32, u32> {
        let assignees = self.assigned.size() as u32;
        if assignees == 0 {
            return BTreeMap::new();
        }
        let base = self.credit / assignees;
        let mut remainder = self.credit % assignees;
        self.assigned
            .assigned_index_numbers()
            .map(|index_number| {
                let bonus = u32::from(remainder > 0);
                remainder -= bonus;
                (index_number, base + bonus)
            })
            .collect()
    }

    /// Fixed-format single-line summary.
    pub fn details(&self) -> String {
        let due = self
            .due_date
            .map(format_due_date)
            .unwrap_or_else(|| "--".to_string());
        format!(
            "{} | Priority: {} | Due: {} | Credit: {} | State: {}",
            self.name, self.priority, due, self.credit, self.state
        )
    }

    /// Details line followed by 1-based requirement lines.
    pub fn task_requirements(&self) -> Vec<String> {
        std::iter::once(self.details())
            .chain(
                self.requirements
                    .iter()
                    .enumerate()
                    .map(|(offset, text)| format!("{}. {}", offset + 1, text)),
            )
            .collect()
    }

    pub fn add_task_requirement(&mut self, requirement: impl Into<String>) {
        self.requirements.push(requirement.into());
    }

    /// Removes the requirement at 1-based `index`.
    ///
    /// # Errors
    /// - `ModelError::IndexOutOfRange` outside `[1, count]`.
    pub fn remove_task_requirement(&mut self, index: usize) -> ModelResult<String> {
        let len = self.requirements.len();
        if index == 0 || index > len {
            return Err(ModelError::out_of_range("requirement", index, len));
        }
        Ok(self.requirements.remove(index - 1))
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.priority == other.priority && self.credit == other.credit
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.priority.hash(state);
        self.credit.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskState};
    use crate::model::error::ModelError;
    use crate::model::member::Member;
    use chrono::NaiveDate;

    fn member(index_number: u32) -> Member {
        let mut member = Member::new(format!("m{index_number}"), "0", "m@example.com");
        member.index_number = index_number;
        member
    }

    #[test]
    fn state_tokens_are_case_insensitive() {
        let mut task = Task::new("Design", 1, 5);
        for token in ["DOING", "doing", "DoInG"] {
            task.set_task_state("open").unwrap();
            task.set_task_state(token).unwrap();
            assert_eq!(task.state(), TaskState::Doing);
        }
    }

    #[test]
    fn unknown_state_token_is_rejected_and_state_kept() {
        let mut task = Task::new("Design", 1, 5).with_state(TaskState::Todo);
        let err = task.set_task_state("bogus").unwrap_err();
        assert_eq!(err, ModelError::InvalidState("bogus".to_string()));
        assert_eq!(task.state(), TaskState::Todo);
    }

    #[test]
    fn invalid_due_date_keeps_previous_value() {
        let mut task = Task::new("Design", 1, 5);
        task.set_due_date("01/05/2024").unwrap();

        let err = task.set_due_date("next tuesday").unwrap_err();
        assert_eq!(err, ModelError::InvalidDate("next tuesday".to_string()));
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn equality_ignores_lifecycle_fields() {
        let mut left = Task::new("Build", 2, 10).with_state(TaskState::Done);
        let right = Task::new("Build", 2, 10);
        left.assign_member(&member(1));
        left.add_task_requirement("ship it");
        assert_eq!(left, right);
        assert_ne!(left.id, right.id);
        assert_ne!(left, Task::new("Build", 3, 10));
    }

    #[test]
    fn releasing_last_assignee_reopens_doing_task_only() {
        for (state, expected) in [
            (TaskState::Doing, TaskState::Open),
            (TaskState::Todo, TaskState::Todo),
            (TaskState::Done, TaskState::Done),
        ] {
            let mut task = Task::new("Build", 1, 4).with_state(state);
            task.assign_member(&member(1));
            assert!(task.release_member(1));
            assert!(task.assigned_members().is_empty());
            assert_eq!(task.state(), expected);
        }
    }

    #[test]
    fn releasing_unassigned_member_keeps_doing_state_of_empty_task() {
        let mut task = Task::new("Build", 1, 4).with_state(TaskState::Doing);
        assert!(!task.release_member(1));
        assert_eq!(task.state(), TaskState::Doing);
    }

    #[test]
    fn credit_remainder_goes_to_lowest_index_numbers() {
        let mut task = Task::new("Build", 1, 10);
        for index in [3, 1, 2] {
            task.assign_member(&member(index));
        }
        let shares: Vec<(u32, u32)> = task.credit_shares().into_iter().collect();
        assert_eq!(shares, vec![(1, 4), (2, 3), (3, 3)]);
        assert_eq!(task.credit_shares().values().sum::<u32>(), 10);
    }

    #[test]
    fn credit_shares_are_empty_without_assignees() {
        assert!(Task::new("Build", 1, 10).credit_shares().is_empty());
    }

    #[test]
    fn details_render_placeholder_without_due_date() {
        let task = Task::new("Write docs", 3, 7);
        assert_eq!(
            task.details(),
            "Write docs | Priority: 3 | Due: -- | Credit: 7 | State: OPEN"
        );
    }

    #[test]
    fn requirements_are_listed_with_one_based_indexes() {
        let mut task = Task::new("Write docs", 3, 7);
        task.set_due_date("10/03/2024").unwrap();
        task.add_task_requirement("outline");
        task.add_task_requirement("draft");

        assert_eq!(
            task.task_requirements(),
            vec![
                "Write docs | Priority: 3 | Due: 10 Mar 2024 | Credit: 7 | State: OPEN".to_string(),
                "1. outline".to_string(),
                "2. draft".to_string(),
            ]
        );

        assert_eq!(task.remove_task_requirement(1).unwrap(), "outline");
        assert_eq!(
            task.remove_task_requirement(2).unwrap_err(),
            ModelError::IndexOutOfRange {
                entity: "requirement",
                index: 2,
                len: 1
            }
        );
        assert!(task.remove_task_requirement(0).is_err());
    }
}
