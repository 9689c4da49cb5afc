//! Ordered task board of one project.
//!
//! # Responsibility
//! - Own task ordering and 1-based task numbers.
//! - Provide aggregate queries (closest deadline, overall progress).
//! - Dispatch field edits to task setters with explicit failures.
//!
//! # Invariants
//! - Removal is by position or `TaskId`, never by `Task` equality.

use crate::model::date::parse_due_date;
use crate::model::error::{ModelError, ModelResult};
use crate::model::task::{Task, TaskId, TaskState};
use serde::{Deserialize, Serialize};

/// Editable task fields, parsed from command tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Priority,
    DueDate,
    Credit,
    State,
}

impl TaskField {
    /// Accepts long names and the one-letter command prefixes.
    ///
    /// # Errors
    /// - `ModelError::InvalidField` for unknown tokens.
    pub fn parse(token: &str) -> ModelResult<Self> {
        let normalized = token.trim().trim_end_matches('/').to_ascii_lowercase();
        match normalized.as_str() {
            "name" | "t" => Ok(Self::Name),
            "priority" | "p" => Ok(Self::Priority),
            "due" | "date" | "d" => Ok(Self::DueDate),
            "credit" | "c" => Ok(Self::Credit),
            "state" | "s" => Ok(Self::State),
            _ => Err(ModelError::InvalidField(token.trim().to_string())),
        }
    }
}

/// Result of the closest-deadline query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosestDeadline<'a> {
    Task { task_number: usize, task: &'a Task },
    NoDeadline,
}

/// Per-state task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub open: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
}

impl ProgressSummary {
    pub fn total(&self) -> usize {
        self.open + self.todo + self.doing + self.done
    }

    pub fn count(&self, state: TaskState) -> usize {
        match state {
            TaskState::Open => self.open,
            TaskState::Todo => self.todo,
            TaskState::Doing => self.doing,
            TaskState::Done => self.done,
        }
    }

    /// Integer percentage, rounded half up. `0` on an empty board.
    pub fn percent(&self, state: TaskState) -> usize {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (self.count(state) * 100 + total / 2) / total
    }

    /// One `STATE: count/total (pct%)` line per state.
    pub fn lines(&self) -> Vec<String> {
        TaskState::ALL
            .iter()
            .map(|&state| {
                format!(
                    "{}: {}/{} ({}%)",
                    state,
                    self.count(state),
                    self.total(),
                    self.percent(state)
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task and returns its 1-based task number.
    pub fn add_task(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    /// Removes the task at 1-based `task_number`.
    pub fn remove_task(&mut self, task_number: usize) -> ModelResult<Task> {
        let position = self.position_of(task_number)?;
        Ok(self.tasks.remove(position))
    }

    /// Removes the task with the given handle.
    pub fn remove_task_by_id(&mut self, id: TaskId) -> ModelResult<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| ModelError::not_found("task", id))?;
        Ok(self.tasks.remove(position))
    }

    pub fn get_task(&self, task_number: usize) -> ModelResult<&Task> {
        let position = self.position_of(task_number)?;
        Ok(&self.tasks[position])
    }

    pub fn get_task_mut(&mut self, task_number: usize) -> ModelResult<&mut Task> {
        let position = self.position_of(task_number)?;
        Ok(&mut self.tasks[position])
    }

    /// Edits one field of the task at `task_number`.
    ///
    /// A due date of `none` or `--` clears the date.
    ///
    /// # Errors
    /// - `IndexOutOfRange` for a bad task number.
    /// - `InvalidField` for an unknown field token.
    /// - `InvalidValue` when a numeric field does not parse.
    /// - `InvalidDate` / `InvalidState` from the task setters.
    pub fn edit_task(&mut self, task_number: usize, field: &str, value: &str) -> ModelResult<()> {
        let field = TaskField::parse(field)?;
        let task = self.get_task_mut(task_number)?;
        let value = value.trim();
        match field {
            TaskField::Name => {
                if value.is_empty() {
                    return Err(ModelError::InvalidValue {
                        field: "name",
                        value: value.to_string(),
                    });
                }
                task.set_task_name(value);
            }
            TaskField::Priority => task.set_task_priority(parse_number("priority", value)?),
            TaskField::Credit => task.set_task_credit(parse_number("credit", value)?),
            TaskField::DueDate => {
                if value.eq_ignore_ascii_case("none") || value == "--" {
                    task.set_due_date_value(None);
                } else {
                    task.set_due_date_value(Some(parse_due_date(value)?));
                }
            }
            TaskField::State => task.set_task_state(value)?,
        }
        Ok(())
    }

    /// Earliest due date across the board; first occurrence wins ties.
    pub fn closest_deadline_task(&self) -> ClosestDeadline<'_> {
        self.tasks
            .iter()
            .enumerate()
            .filter_map(|(position, task)| task.due_date().map(|date| (date, position, task)))
            .min_by_key(|(date, position, _)| (*date, *position))
            .map_or(ClosestDeadline::NoDeadline, |(_, position, task)| {
                ClosestDeadline::Task {
                    task_number: position + 1,
                    task,
                }
            })
    }

    pub fn overall_progress(&self) -> ProgressSummary {
        let mut summary = ProgressSummary::default();
        for task in &self.tasks {
            match task.state() {
                TaskState::Open => summary.open += 1,
                TaskState::Todo => summary.todo += 1,
                TaskState::Doing => summary.doing += 1,
                TaskState::Done => summary.done += 1,
            }
        }
        summary
    }

    /// Applies a roster removal to every task.
    ///
    /// Returns `(task_numbers_affected, task_numbers_reopened)`.
    pub(crate) fn release_member(&mut self, index_number: u32) -> (Vec<usize>, Vec<usize>) {
        let mut affected = Vec::new();
        let mut reopened = Vec::new();
        for (position, task) in self.tasks.iter_mut().enumerate() {
            let before = task.state();
            if task.release_member(index_number) {
                affected.push(position + 1);
                if before != task.state() {
                    reopened.push(position + 1);
                }
            }
        }
        (affected, reopened)
    }

    pub fn num_of_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter()
    }

    fn position_of(&self, task_number: usize) -> ModelResult<usize> {
        if task_number == 0 || task_number > self.tasks.len() {
            return Err(ModelError::out_of_range("task", task_number, self.tasks.len()));
        }
        Ok(task_number - 1)
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> ModelResult<T> {
    value.parse::<T>().map_err(|_| ModelError::InvalidValue {
        field,
        value: value.to_string(),
    })
}
