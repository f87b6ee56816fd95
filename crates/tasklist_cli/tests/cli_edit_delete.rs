use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{name}"))
}

fn seed_todos(dir: &PathBuf, todos: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join("todos.json"), serde_json::to_string(&todos).unwrap()).unwrap();
}

fn stored_todos(dir: &PathBuf) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join("todos.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn single_todo() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "todo-1",
            "title": "old title",
            "description": "old details",
            "dueDate": "2999-06-01",
            "completed": true,
            "createdAt": 1_700_000_000_000_i64
        }
    ])
}

#[test]
fn edit_command_replaces_content_fields() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-edit");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args([
            "edit",
            "todo-1",
            "new title",
            "--description",
            "new details",
            "--due",
            "2999-07-01",
        ])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run edit command");

    let stored = stored_todos(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    assert_eq!(stored[0]["title"], "new title");
    assert_eq!(stored[0]["description"], "new details");
    assert_eq!(stored[0]["dueDate"], "2999-07-01");
    assert_eq!(stored[0]["completed"], true);
    assert_eq!(stored[0]["createdAt"], 1_700_000_000_000_i64);
}

#[test]
fn edit_command_clears_omitted_optionals() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-edit-clear");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args(["edit", "todo-1", "new title"])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run edit command");

    let stored = stored_todos(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    assert!(stored[0].get("description").is_none());
    assert!(stored[0].get("dueDate").is_none());
}

#[test]
fn edit_command_rejects_missing_id() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-edit-missing");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args(["edit", "todo-2", "new title"])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run edit command");

    std::fs::remove_dir_all(&dir).ok();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn edit_command_rejects_blank_title() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-edit-blank");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args(["edit", "todo-1", "   "])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run edit command");

    let stored = stored_todos(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    assert_eq!(stored[0]["title"], "old title");
}

#[test]
fn delete_command_removes_todo() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-delete");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args(["delete", "todo-1"])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run delete command");

    let stored = stored_todos(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted todo: old title (todo-1)"));
    assert!(stored.as_array().unwrap().is_empty());
}

#[test]
fn delete_command_rejects_missing_id() {
    let exe = env!("CARGO_BIN_EXE_tasklist");
    let dir = temp_dir("cli-delete-missing");
    seed_todos(&dir, single_todo());

    let output = Command::new(exe)
        .args(["delete", "todo-2"])
        .env("TASKLIST_DATA_DIR", &dir)
        .output()
        .expect("failed to run delete command");

    let stored = stored_todos(&dir);
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    assert_eq!(stored.as_array().unwrap().len(), 1);
}
