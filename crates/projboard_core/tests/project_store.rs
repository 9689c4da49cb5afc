use projboard_core::db::open_db_in_memory;
use projboard_core::{
    Member, Project, ProjectStore, SqliteProjectStore, StoreError, Task, TaskState,
};
use uuid::Uuid;

fn sample_project(name: &str) -> Project {
    let mut project = Project::new(name).unwrap();
    project.add_member(Member::new("Alice", "1", "alice@example.com"));
    project.add_member(Member::new("Bob", "2", "bob@example.com"));
    let mut task = Task::new("Plan", 2, 10).with_state(TaskState::Doing);
    task.set_due_date("10/03/2024").unwrap();
    task.add_task_requirement("agenda");
    project.add_task(task);
    project.assign_member(1, 2).unwrap();
    project
}

#[test]
fn save_and_load_keeps_whole_aggregate() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::new(&conn);

    let project = sample_project("Apollo");
    store.save_project(&project).unwrap();

    let loaded = store.load_all_projects().unwrap();
    assert_eq!(loaded.len(), 1);
    let loaded = &loaded[0];
    assert_eq!(loaded.id, project.id);
    assert_eq!(loaded.name(), "Apollo");
    assert_eq!(loaded.members().get_member(2).unwrap().name, "Bob");

    let task = loaded.tasks().get_task(1).unwrap();
    assert_eq!(task.id, project.tasks().get_task(1).unwrap().id);
    assert_eq!(task.state(), TaskState::Doing);
    assert_eq!(task.requirements(), ["agenda"]);
    assert!(task.assigned_members().contains(2));
    assert_eq!(task.due_date(), project.tasks().get_task(1).unwrap().due_date());
}

#[test]
fn resave_updates_in_place_and_keeps_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::new(&conn);

    let mut first = sample_project("First");
    let second = sample_project("Second");
    store.save_project(&first).unwrap();
    store.save_project(&second).unwrap();

    first.add_member(Member::new("Carol", "3", "carol@example.com"));
    store.save_project(&first).unwrap();

    let loaded = store.load_all_projects().unwrap();
    let names: Vec<&str> = loaded.iter().map(Project::name).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(loaded[0].num_of_members(), 3);
}

#[test]
fn delete_removes_row_and_reports_missing_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::new(&conn);

    let project = sample_project("Apollo");
    store.save_project(&project).unwrap();
    store.delete_project(project.id).unwrap();
    assert!(store.load_all_projects().unwrap().is_empty());

    let missing = Uuid::new_v4();
    let err = store.delete_project(missing).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
}

#[test]
fn load_rejects_corrupted_documents() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO projects (uuid, name, document) VALUES (?1, ?2, ?3);",
        [Uuid::new_v4().to_string(), "Broken".to_string(), "{not json".to_string()],
    )
    .unwrap();

    let store = SqliteProjectStore::new(&conn);
    let err = store.load_all_projects().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)), "unexpected error: {err}");
}

#[test]
fn load_rejects_document_with_mismatched_id() {
    let conn = open_db_in_memory().unwrap();
    let project = sample_project("Apollo");
    let document = serde_json::to_string(&project).unwrap();
    conn.execute(
        "INSERT INTO projects (uuid, name, document) VALUES (?1, ?2, ?3);",
        [Uuid::new_v4().to_string(), "Apollo".to_string(), document],
    )
    .unwrap();

    let store = SqliteProjectStore::new(&conn);
    let err = store.load_all_projects().unwrap_err();
    assert!(err.to_string().contains("does not match"), "unexpected error: {err}");
}

fn insert_raw_document(conn: &rusqlite::Connection, project: &Project, document: String) {
    conn.execute(
        "INSERT INTO projects (uuid, name, document) VALUES (?1, ?2, ?3);",
        [project.id.to_string(), project.name().to_string(), document],
    )
    .unwrap();
}

#[test]
fn load_rejects_assignment_to_member_outside_roster() {
    let conn = open_db_in_memory().unwrap();
    let mut project = Project::new("Apollo").unwrap();
    project.add_member(Member::new("Alice", "1", "alice@example.com"));
    project.add_task(Task::new("Plan", 1, 10));
    let mut json = serde_json::to_value(&project).unwrap();
    json["tasks"][0]["assigned"] = serde_json::json!([3]);
    insert_raw_document(&conn, &project, json.to_string());

    let store = SqliteProjectStore::new(&conn);
    let err = store.load_all_projects().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("member 3"), "unexpected error: {err}");
}

#[test]
fn load_rejects_gaps_in_member_numbering() {
    let conn = open_db_in_memory().unwrap();
    let project = sample_project("Apollo");
    let mut json = serde_json::to_value(&project).unwrap();
    json["members"][1]["index_number"] = serde_json::json!(3);
    insert_raw_document(&conn, &project, json.to_string());

    let store = SqliteProjectStore::new(&conn);
    let err = store.load_all_projects().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("index_number"), "unexpected error: {err}");
}

#[test]
fn project_document_uses_expected_wire_fields() {
    let project = sample_project("Apollo");
    let json = serde_json::to_value(&project).unwrap();

    assert_eq!(json["id"], project.id.to_string());
    assert_eq!(json["name"], "Apollo");
    assert_eq!(json["members"][1]["name"], "Bob");
    assert_eq!(json["members"][1]["index_number"], 2);
    assert_eq!(json["tasks"][0]["state"], "DOING");
    assert_eq!(json["tasks"][0]["due_date"], "2024-03-10");
    assert_eq!(json["tasks"][0]["assigned"], serde_json::json!([2]));
}
