use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_campusd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn campusd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn reselecting_workspace_does_not_reseed() {
    let workspace = temp_dir("campusd-seed");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let login = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    );
    let admin_id = login
        .get("user")
        .and_then(|u| u.get("id"))
        .and_then(|v| v.as_i64())
        .expect("admin id");

    let users = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "users.list",
        json!({ "actorId": admin_id }),
    );
    assert_eq!(
        users.get("users").and_then(|v| v.as_array()).map(|a| a.len()),
        Some(4),
        "one seed user per role"
    );

    // Selecting the same workspace again must be a seeding no-op.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let users_after = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "users.list",
        json!({ "actorId": admin_id }),
    );
    assert_eq!(
        users_after
            .get("users")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(4),
        "second initialize must not reseed"
    );

    // Seeded reference data is present exactly once.
    let courses = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "courses.list",
        json!({ "actorId": admin_id }),
    );
    assert_eq!(
        courses
            .get("courses")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(3)
    );
}

#[test]
fn data_methods_require_a_workspace() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let value = request(
        &mut stdin,
        &mut reader,
        "1",
        "courses.list",
        json!({ "actorId": 1 }),
    );
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("no_workspace")
    );
}
