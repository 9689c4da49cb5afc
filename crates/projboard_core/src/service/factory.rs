//! Construction of domain objects from raw command text.
//!
//! # Responsibility
//! - Build a `Project` from `create NAME`.
//! - Parse prefixed member (`n/ i/ e/`) and task (`t/ p/ d/ c/ s/ r/`)
//!   details.
//!
//! # Invariants
//! - A prefix is only recognized at the start of input or after whitespace,
//!   and only for the letters the parser understands; any other `x/` stays
//!   part of the surrounding value.
//! - Mandatory fields missing → `ConstructionFailed`; malformed values keep
//!   their specific error kind (`InvalidDate`, `InvalidState`, ...).

use crate::model::board::parse_number;
use crate::model::date::parse_due_date;
use crate::model::error::{ModelError, ModelResult};
use crate::model::member::Member;
use crate::model::project::Project;
use crate::model::task::{Task, TaskState};
use once_cell::sync::Lazy;
use regex::Regex;

static CREATE_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\s*create\s+(\S.*?)\s*$").expect("valid create regex"));
static MEMBER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)([nieNIE])/").expect("valid member prefix regex"));
static TASK_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)([tpdcsrTPDCSR])/").expect("valid task prefix regex"));

const MISSING_DETAIL: &str = "--";

/// Builds projects from raw command text.
pub trait ProjectFactory {
    fn create(&self, raw_input: &str) -> ModelResult<Project>;
}

/// Accepts `create NAME` with a case-insensitive keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProjectFactory;

impl ProjectFactory for CommandProjectFactory {
    fn create(&self, raw_input: &str) -> ModelResult<Project> {
        let name = CREATE_COMMAND_RE
            .captures(raw_input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| {
                ModelError::ConstructionFailed(format!(
                    "expected `create NAME`, got `{}`",
                    raw_input.trim()
                ))
            })?;
        Project::new(name)
    }
}

/// Parsed `n/NAME i/PHONE e/EMAIL` input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl MemberDetails {
    pub fn into_member(self) -> Member {
        Member::new(self.name, self.phone, self.email)
    }
}

/// Parses member details; phone and email default to `--`.
pub fn parse_member_details(input: &str) -> ModelResult<MemberDetails> {
    let mut name = None;
    let mut phone = None;
    let mut email = None;

    for (prefix, value) in split_prefixed(&MEMBER_PREFIX_RE, input)? {
        match prefix {
            'n' => name = Some(value),
            'i' => phone = Some(value),
            'e' => email = Some(value),
            other => return Err(ModelError::InvalidField(format!("{other}/"))),
        }
    }

    let name = name
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ModelError::ConstructionFailed("member name (n/) is required".into()))?;
    Ok(MemberDetails {
        name,
        phone: or_missing(phone),
        email: or_missing(email),
    })
}

/// Parses `t/NAME p/PRIORITY [d/DD/MM/YYYY] [c/CREDIT] [s/STATE] [r/TEXT]...`.
///
/// Credit defaults to `0` and state to OPEN.
pub fn parse_task_details(input: &str) -> ModelResult<Task> {
    let mut name = None;
    let mut priority = None;
    let mut due_date = None;
    let mut credit = 0_u32;
    let mut state = TaskState::Open;
    let mut requirements = Vec::new();

    for (prefix, value) in split_prefixed(&TASK_PREFIX_RE, input)? {
        match prefix {
            't' => name = Some(value),
            'p' => priority = Some(parse_number::<i32>("priority", &value)?),
            'd' => due_date = Some(parse_due_date(&value)?),
            'c' => credit = parse_number::<u32>("credit", &value)?,
            's' => state = TaskState::parse(&value)?,
            'r' => {
                if !value.is_empty() {
                    requirements.push(value);
                }
            }
            other => return Err(ModelError::InvalidField(format!("{other}/"))),
        }
    }

    let name = name
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ModelError::ConstructionFailed("task name (t/) is required".into()))?;
    let priority = priority
        .ok_or_else(|| ModelError::ConstructionFailed("task priority (p/) is required".into()))?;

    Ok(Task::new(name, priority, credit)
        .with_due_date(due_date)
        .with_state(state)
        .with_requirements(requirements))
}

/// Splits `x/value y/value` input into lower-cased prefixes and trimmed values.
fn split_prefixed(prefix_re: &Regex, input: &str) -> ModelResult<Vec<(char, String)>> {
    let markers: Vec<(usize, usize, char)> = prefix_re
        .captures_iter(input)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((whole.start(), whole.end(), letter.to_ascii_lowercase()))
        })
        .collect();

    match markers.first() {
        None if !input.trim().is_empty() => {
            return Err(ModelError::ConstructionFailed(format!(
                "no field prefixes found in `{}`",
                input.trim()
            )));
        }
        Some(&(start, _, _)) if !input[..start].trim().is_empty() => {
            return Err(ModelError::ConstructionFailed(format!(
                "unexpected text before first field: `{}`",
                input[..start].trim()
            )));
        }
        _ => {}
    }

    Ok(markers
        .iter()
        .enumerate()
        .map(|(position, &(_, value_start, prefix))| {
            let value_end = markers
                .get(position + 1)
                .map_or(input.len(), |&(next_start, _, _)| next_start);
            (prefix, input[value_start..value_end].trim().to_string())
        })
        .collect())
}

fn or_missing(value: Option<String>) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| MISSING_DETAIL.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        parse_member_details, parse_task_details, CommandProjectFactory, ProjectFactory,
    };
    use crate::model::error::ModelError;
    use crate::model::task::TaskState;
    use chrono::NaiveDate;

    #[test]
    fn create_command_builds_named_project() {
        let project = CommandProjectFactory.create("create Justice League").unwrap();
        assert_eq!(project.name(), "Justice League");
        assert_eq!(project.num_of_members(), 0);
        assert_eq!(project.num_of_tasks(), 0);

        let project = CommandProjectFactory.create("  CREATE  Avengers  ").unwrap();
        assert_eq!(project.name(), "Avengers");
    }

    #[test]
    fn create_command_rejects_missing_or_invalid_names() {
        assert!(matches!(
            CommandProjectFactory.create("create"),
            Err(ModelError::ConstructionFailed(_))
        ));
        assert!(matches!(
            CommandProjectFactory.create("make Avengers"),
            Err(ModelError::ConstructionFailed(_))
        ));
        assert!(matches!(
            CommandProjectFactory.create("create a/b"),
            Err(ModelError::InvalidProjectName(_))
        ));
    }

    #[test]
    fn member_details_default_optional_fields() {
        let details = parse_member_details("n/Tony Stark e/tony@stark.com").unwrap();
        assert_eq!(details.name, "Tony Stark");
        assert_eq!(details.phone, "--");
        assert_eq!(details.email, "tony@stark.com");

        assert!(matches!(
            parse_member_details("i/123"),
            Err(ModelError::ConstructionFailed(_))
        ));
    }

    #[test]
    fn unknown_letters_stay_inside_values() {
        let details = parse_member_details("n/Tony x/1 e/a/b@stark.com").unwrap();
        assert_eq!(details.name, "Tony x/1");
        assert_eq!(details.email, "a/b@stark.com");

        let task = parse_task_details("t/Fix a/b test p/1 r/handle I/O errors").unwrap();
        assert_eq!(task.name(), "Fix a/b test");
        assert_eq!(task.requirements(), ["handle I/O errors"]);
    }

    #[test]
    fn task_details_parse_all_fields() {
        let task = parse_task_details(
            "t/Build suit p/2 d/10/03/2024 c/40 s/doing r/arc reactor r/repulsors",
        )
        .unwrap();
        assert_eq!(task.name(), "Build suit");
        assert_eq!(task.priority(), 2);
        assert_eq!(task.due_date(), NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(task.credit(), 40);
        assert_eq!(task.state(), TaskState::Doing);
        assert_eq!(task.requirements(), ["arc reactor", "repulsors"]);
    }

    #[test]
    fn task_details_surface_specific_failures() {
        assert!(matches!(
            parse_task_details("p/1"),
            Err(ModelError::ConstructionFailed(_))
        ));
        assert!(matches!(
            parse_task_details("t/x"),
            Err(ModelError::ConstructionFailed(_))
        ));
        assert!(matches!(
            parse_task_details("t/x p/high"),
            Err(ModelError::InvalidValue { field: "priority", .. })
        ));
        assert!(matches!(
            parse_task_details("t/x p/1 d/someday"),
            Err(ModelError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_task_details("t/x p/1 s/later"),
            Err(ModelError::InvalidState(_))
        ));
        assert!(matches!(
            parse_task_details("oops t/x p/1"),
            Err(ModelError::ConstructionFailed(_))
        ));
    }
}
