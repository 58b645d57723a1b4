use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes a config pointing at `<temp>/data/tasks.json` and returns both paths.
fn setup(temp_dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let config_path = temp_dir.path().join("config.toml");
    let data_path = temp_dir.path().join("data").join("tasks.json");

    fs::write(
        &config_path,
        format!("[storage]\npath = \"{}\"\n", data_path.to_string_lossy()),
    )
    .unwrap();

    (config_path, data_path)
}

fn read_tasks(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_list_command_empty() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.arg("list").arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No tasks found"));
}

#[test]
fn test_add_creates_directory_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["add", "Buy", "milk", "--priority", "high", "--due", "2025-01-10"])
        .args(["--tag", "Personal"])
        .arg("--config")
        .arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Created task: Buy milk (ID: 1)"));

    assert_eq!(
        read_tasks(&data_path),
        serde_json::json!([{
            "id": 1,
            "title": "Buy milk",
            "due_date": "2025-01-10",
            "priority": "High",
            "completed": false,
            "tag": "Personal"
        }])
    );

    let expected = r#"[
  {
    "id": 1,
    "title": "Buy milk",
    "due_date": "2025-01-10",
    "priority": "High",
    "completed": false,
    "tag": "Personal"
  }
]"#;
    assert_eq!(fs::read_to_string(&data_path).unwrap(), expected);
}

#[test]
fn test_add_uses_max_plus_one() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(
        &data_path,
        r#"[{"id": 2, "title": "a"}, {"id": 7, "title": "b"}, {"id": 5, "title": "c"}]"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["add", "Next"]).arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("(ID: 8)"));

    let tasks = read_tasks(&data_path);
    let ids: Vec<u64> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 7, 5, 8]);
    assert_eq!(tasks[3]["priority"], "Low");
}

#[test]
fn test_list_sorted_by_priority() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(
        &data_path,
        r#"[
            {"id": 1, "title": "low one", "priority": "Low"},
            {"id": 2, "title": "critical one", "priority": "Critical"},
            {"id": 3, "title": "medium one", "priority": "Medium"},
            {"id": 4, "title": "high one", "priority": "High"}
        ]"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["list", "--sort", "priority"])
        .arg("--config")
        .arg(&config_path);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let order: Vec<&str> = stdout
        .lines()
        .map(|l| l.split(": ").nth(1).unwrap_or(""))
        .collect();
    assert_eq!(
        order,
        vec![
            "critical one (Priority",
            "high one (Priority",
            "medium one (Priority",
            "low one (Priority"
        ]
    );
}

#[test]
fn test_list_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(&data_path, r#"[{"id": 1, "title": "Test task"}]"#).unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["list", "--format", "json"])
        .arg("--config")
        .arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Test task\""))
        .stdout(predicate::str::contains("\"due_date\": null"));
}

#[test]
fn test_corrupt_file_lists_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(&data_path, "{not valid json").unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.arg("list").arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No tasks found"))
        .stderr(predicate::str::contains("not valid JSON").or(predicate::str::contains("corrupt")));
}

#[test]
fn test_missing_title_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(&data_path, r#"[{"id": 1}]"#).unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.arg("list").arg("--config").arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn test_toggle_edit_delete() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);
    fs::create_dir_all(data_path.parent().unwrap()).unwrap();
    fs::write(
        &data_path,
        r#"[{"id": 1, "title": "first", "tag": "Work"}, {"id": 2, "title": "second"}]"#,
    )
    .unwrap();

    cargo_bin_cmd!("taskmaster")
        .args(["toggle", "1", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("marked complete"));
    assert_eq!(read_tasks(&data_path)[0]["completed"], true);

    cargo_bin_cmd!("taskmaster")
        .args(["edit", "1", "--title", "renamed", "--clear-tag", "-p", "critical"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    let tasks = read_tasks(&data_path);
    assert_eq!(tasks[0]["title"], "renamed");
    assert_eq!(tasks[0]["priority"], "Critical");
    assert_eq!(tasks[0]["tag"], serde_json::Value::Null);

    cargo_bin_cmd!("taskmaster")
        .args(["delete", "1", "--config"])
        .arg(&config_path)
        .assert()
        .success();
    let tasks = read_tasks(&data_path);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], 2);
}

#[test]
fn test_unknown_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, _) = setup(&temp_dir);

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["toggle", "42", "--config"]).arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No task with ID 42"));
}

#[test]
fn test_add_rejects_bad_priority() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, data_path) = setup(&temp_dir);

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.args(["add", "Thing", "--priority", "urgent", "--config"])
        .arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown priority"));
    assert!(!data_path.exists());
}

#[test]
fn test_data_flag_overrides_config() {
    let temp_dir = TempDir::new().unwrap();
    let (config_path, configured) = setup(&temp_dir);
    let other = temp_dir.path().join("elsewhere.json");

    cargo_bin_cmd!("taskmaster")
        .args(["add", "Elsewhere", "--config"])
        .arg(&config_path)
        .arg("--data")
        .arg(&other)
        .assert()
        .success();

    assert!(other.exists());
    assert!(!configured.exists());
}

#[test]
fn test_config_command() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, "[general]\ndefault_sort = \"priority\"\n").unwrap();

    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.arg("config").arg("--config").arg(&config_path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("default_sort = \"priority\""))
        .stdout(predicate::str::contains("path = \"data/tasks.json\""));
}

#[test]
fn test_help_command() {
    let mut cmd = cargo_bin_cmd!("taskmaster");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Task Master"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"));
}
