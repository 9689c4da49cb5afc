//! Command layer: maps parsed CLI commands onto collection operations.
//!
//! # Invariants
//! - Every command touches at most one project and persists it before
//!   returning.
//! - Core failures are turned into category-prefixed messages here; the core
//!   never prints.

use crate::view::{boxed, titled_blocks};
use clap::Subcommand;
use log::info;
use projboard_core::{
    parse_member_details, parse_task_details, CollectionError, ModelError, ProjectCollection,
    ProjectStore,
};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a project
    Create {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// List all projects with members, next deadline and progress
    List,
    /// Delete a project by number
    Delete { project: usize },
    /// Manage project members
    Member {
        #[command(subcommand)]
        action: MemberCommand,
    },
    /// Manage project tasks
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Show credit earned per member from DONE tasks
    Credits { project: usize },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// Add a member: n/NAME [i/PHONE] [e/EMAIL]
    Add {
        project: usize,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        details: Vec<String>,
    },
    /// Replace a member's details: n/NAME [i/PHONE] [e/EMAIL]
    Edit {
        project: usize,
        member: u32,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        details: Vec<String>,
    },
    /// Remove a member and release their task assignments
    Remove { project: usize, member: u32 },
    /// List members
    List { project: usize },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Add a task: t/NAME p/PRIORITY [d/DD/MM/YYYY] [c/CREDIT] [s/STATE] [r/REQ]...
    Add {
        project: usize,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        details: Vec<String>,
    },
    /// Edit one field: name|priority|due|credit|state
    Edit {
        project: usize,
        task: usize,
        field: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        value: Vec<String>,
    },
    /// Remove a task
    Remove { project: usize, task: usize },
    /// List tasks
    List { project: usize },
    /// Assign members to a task
    Assign {
        project: usize,
        task: usize,
        #[arg(required = true, num_args = 1..)]
        members: Vec<u32>,
    },
    /// Unassign members from a task
    Unassign {
        project: usize,
        task: usize,
        #[arg(required = true, num_args = 1..)]
        members: Vec<u32>,
    },
    /// Show a task with its numbered requirements
    Requirements { project: usize, task: usize },
    /// Append a requirement to a task
    AddReq {
        project: usize,
        task: usize,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Remove a requirement by number
    RemoveReq {
        project: usize,
        task: usize,
        requirement: usize,
    },
}

pub type CommandResult = Result<Vec<String>, CollectionError>;

/// Runs one command and returns the lines to print.
pub fn execute<S: ProjectStore>(
    collection: &mut ProjectCollection<S>,
    command: Command,
) -> CommandResult {
    info!(
        "event=command module=cli status=start command={}",
        command_name(&command)
    );
    match command {
        Command::Create { name } => {
            let number = collection.add_to_repo(&format!("create {}", name.join(" ")))?;
            let project = collection.get_item(number)?;
            Ok(vec![format!("Created project {number}: {}", project.name())])
        }
        Command::List => {
            if collection.is_empty() {
                return Ok(vec!["You currently have no projects!".to_string()]);
            }
            Ok(titled_blocks(
                "Here are all the Projects you are managing:",
                &collection.all_projects_details_for_table(),
            ))
        }
        Command::Delete { project } => {
            let removed = collection.delete_item(project)?;
            Ok(vec![format!("Deleted project: {}", removed.name())])
        }
        Command::Member { action } => execute_member(collection, action),
        Command::Task { action } => execute_task(collection, action),
        Command::Credits { project } => {
            let project = collection.get_item(project)?;
            let lines: Vec<String> = project
                .credit_by_member()
                .into_iter()
                .map(|(member, credit)| {
                    format!("{}. {}: {credit}", member.index_number, member.name)
                })
                .collect();
            if lines.is_empty() {
                return Ok(vec![format!("{} has no members yet.", project.name())]);
            }
            Ok(boxed(&lines))
        }
    }
}

fn execute_member<S: ProjectStore>(
    collection: &mut ProjectCollection<S>,
    action: MemberCommand,
) -> CommandResult {
    match action {
        MemberCommand::Add { project, details } => {
            let details =
                parse_member_details(&details.join(" ")).map_err(CollectionError::Model)?;
            let name = details.name.clone();
            let index = collection.modify_item(project, |project| {
                Ok(project.add_member(details.into_member()))
            })?;
            Ok(vec![format!("Added member {index}: {name}")])
        }
        MemberCommand::Edit {
            project,
            member,
            details,
        } => {
            let details =
                parse_member_details(&details.join(" ")).map_err(CollectionError::Model)?;
            let updated = collection.modify_item(project, |project| {
                Ok(project.edit_member(member, details.name, details.phone, details.email))
            })?;
            if updated {
                Ok(vec![format!("Updated member {member}.")])
            } else {
                Ok(vec![format!("No member with index number {member}; nothing changed.")])
            }
        }
        MemberCommand::Remove { project, member } => {
            let removal =
                collection.modify_item(project, |project| project.remove_member(member))?;
            let mut lines = vec![format!("Removed member: {}", removal.member.name)];
            if !removal.tasks_affected.is_empty() {
                lines.push(format!(
                    "Unassigned from tasks: {}",
                    join_numbers(&removal.tasks_affected)
                ));
            }
            if !removal.tasks_reopened.is_empty() {
                lines.push(format!(
                    "Reopened tasks: {}",
                    join_numbers(&removal.tasks_reopened)
                ));
            }
            Ok(lines)
        }
        MemberCommand::List { project } => {
            let project = collection.get_item(project)?;
            let lines: Vec<String> = project.members().all_member_details().collect();
            if lines.is_empty() {
                return Ok(vec![format!("{} has no members yet.", project.name())]);
            }
            Ok(boxed(&lines))
        }
    }
}

fn execute_task<S: ProjectStore>(
    collection: &mut ProjectCollection<S>,
    action: TaskCommand,
) -> CommandResult {
    match action {
        TaskCommand::Add { project, details } => {
            let task = parse_task_details(&details.join(" ")).map_err(CollectionError::Model)?;
            let summary = task.details();
            let number = collection.modify_item(project, |project| Ok(project.add_task(task)))?;
            Ok(vec![format!("Added task {number}: {summary}")])
        }
        TaskCommand::Edit {
            project,
            task,
            field,
            value,
        } => {
            let summary = collection.modify_item(project, |project| {
                project.tasks_mut().edit_task(task, &field, &value.join(" "))?;
                Ok(project.tasks().get_task(task)?.details())
            })?;
            Ok(vec![format!("Updated task {task}: {summary}")])
        }
        TaskCommand::Remove { project, task } => {
            let removed = collection.modify_item(project, |project| project.remove_task(task))?;
            Ok(vec![format!("Removed task: {}", removed.name())])
        }
        TaskCommand::List { project } => {
            let project = collection.get_item(project)?;
            let lines: Vec<String> = project
                .tasks()
                .iter()
                .enumerate()
                .map(|(offset, task)| {
                    let assigned: Vec<u32> =
                        task.assigned_members().assigned_index_numbers().collect();
                    let assigned = if assigned.is_empty() {
                        "--".to_string()
                    } else {
                        join_numbers(&assigned)
                    };
                    format!("{}. {} | Assigned: {assigned}", offset + 1, task.details())
                })
                .collect();
            if lines.is_empty() {
                return Ok(vec![format!("{} has no tasks yet.", project.name())]);
            }
            Ok(boxed(&lines))
        }
        TaskCommand::Assign {
            project,
            task,
            members,
        } => {
            let added = collection.modify_item(project, |project| {
                members
                    .iter()
                    .map(|&member| project.assign_member(task, member))
                    .collect::<Result<Vec<bool>, ModelError>>()
            })?;
            let count = added.into_iter().filter(|&inserted| inserted).count();
            Ok(vec![format!("Assigned {count} new member(s) to task {task}.")])
        }
        TaskCommand::Unassign {
            project,
            task,
            members,
        } => {
            let removed = collection.modify_item(project, |project| {
                members
                    .iter()
                    .map(|&member| project.unassign_member(task, member))
                    .collect::<Result<Vec<bool>, ModelError>>()
            })?;
            let count = removed.into_iter().filter(|&was_assigned| was_assigned).count();
            Ok(vec![format!("Unassigned {count} member(s) from task {task}.")])
        }
        TaskCommand::Requirements { project, task } => {
            let project = collection.get_item(project)?;
            let lines = project
                .tasks()
                .get_task(task)
                .map_err(CollectionError::Model)?
                .task_requirements();
            Ok(boxed(&lines))
        }
        TaskCommand::AddReq {
            project,
            task,
            text,
        } => {
            let text = text.join(" ");
            let count = collection.modify_item(project, |project| {
                let task = project.tasks_mut().get_task_mut(task)?;
                task.add_task_requirement(text);
                Ok(task.num_of_task_requirements())
            })?;
            Ok(vec![format!("Added requirement {count} to task {task}.")])
        }
        TaskCommand::RemoveReq {
            project,
            task,
            requirement,
        } => {
            let removed = collection.modify_item(project, |project| {
                project
                    .tasks_mut()
                    .get_task_mut(task)?
                    .remove_task_requirement(requirement)
            })?;
            Ok(vec![format!("Removed requirement: {removed}")])
        }
    }
}

/// Category-prefixed message for a failed command.
pub fn error_message(err: &CollectionError) -> String {
    let category = match err {
        CollectionError::Construction(_) => "Invalid input",
        CollectionError::IndexOutOfRange { .. } => "No such project",
        CollectionError::Store(_) => "Storage error",
        CollectionError::Model(model) => match model {
            ModelError::NotFound { .. } => "Not found",
            ModelError::IndexOutOfRange { .. } => "Out of range",
            ModelError::InvalidField(_) | ModelError::InvalidValue { .. } => "Invalid field",
            ModelError::InvalidDate(_) => "Invalid date",
            ModelError::InvalidState(_) => "Invalid state",
            ModelError::InvalidProjectName(_) | ModelError::ConstructionFailed(_) => {
                "Invalid input"
            }
        },
    };
    format!("{category}: {err}")
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Create { .. } => "create",
        Command::List => "list",
        Command::Delete { .. } => "delete",
        Command::Member { .. } => "member",
        Command::Task { .. } => "task",
        Command::Credits { .. } => "credits",
    }
}

fn join_numbers<T: ToString>(numbers: &[T]) -> String {
    numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
