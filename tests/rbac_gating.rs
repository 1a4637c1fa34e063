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

fn request_err_code(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> String {
    let value = request(stdin, reader, id, method, params);
    assert!(
        !value.get("ok").and_then(|v| v.as_bool()).unwrap_or(true),
        "{} unexpectedly succeeded: {}",
        method,
        value
    );
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .expect("error code")
        .to_string()
}

fn login_id(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    username: &str,
    password: &str,
) -> i64 {
    let login = request_ok(
        stdin,
        reader,
        &format!("login-{username}"),
        "auth.login",
        json!({ "username": username, "password": password }),
    );
    login
        .get("user")
        .and_then(|u| u.get("id"))
        .and_then(|v| v.as_i64())
        .expect("user id")
}

#[test]
fn area_visibility_gates_every_method() {
    let workspace = temp_dir("campusd-rbac-areas");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let lecturer = login_id(&mut stdin, &mut reader, "lecturer1", "lect123");
    let staff = login_id(&mut stdin, &mut reader, "staff1", "staff123");
    let student = login_id(&mut stdin, &mut reader, "student1", "stud123");

    // A role's hidden areas answer forbidden on reads and writes alike.
    let denied: [(&str, i64, &str); 6] = [
        ("courses.list", lecturer, "lecturer has no courses screen"),
        ("users.list", lecturer, "user management is Admin-only"),
        ("exams.list", staff, "staff has no exams screen"),
        ("marks.list", staff, "staff has no marks screen"),
        ("courses.list", student, "student has no courses screen"),
        ("students.list", student, "student has no students screen"),
    ];
    for (i, (method, actor_id, why)) in denied.iter().enumerate() {
        let code = request_err_code(
            &mut stdin,
            &mut reader,
            &format!("deny-{i}"),
            method,
            json!({ "actorId": actor_id }),
        );
        assert_eq!(code, "forbidden", "{why}");
    }

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({ "actorId": student, "name": "Sneak", "code": "SNK", "duration": 1 }),
    );
    assert_eq!(code, "forbidden");

    // Visible areas still answer normally.
    let subjects = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "subjects.list",
        json!({ "actorId": lecturer }),
    );
    assert_eq!(
        subjects
            .get("subjects")
            .and_then(|v| v.as_array())
            .map(|a| a.len()),
        Some(3)
    );
    let marks = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "marks.list",
        json!({ "actorId": student }),
    );
    assert!(marks.get("marks").and_then(|v| v.as_array()).is_some());
}

#[test]
fn delete_requires_the_admin_role() {
    let workspace = temp_dir("campusd-rbac-delete");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let admin = login_id(&mut stdin, &mut reader, "admin", "admin123");
    let lecturer = login_id(&mut stdin, &mut reader, "lecturer1", "lect123");
    let staff = login_id(&mut stdin, &mut reader, "staff1", "staff123");

    // Lecturer can see subjects but cannot delete them.
    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "2",
        "subjects.delete",
        json!({ "actorId": lecturer, "id": 1 }),
    );
    assert_eq!(code, "forbidden");

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "3",
        "students.delete",
        json!({ "actorId": staff, "id": 1 }),
    );
    assert_eq!(code, "forbidden");

    // Nothing was touched: subject 1 is still visible.
    let fetched = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "subjects.get",
        json!({ "actorId": lecturer, "id": 1 }),
    );
    assert_eq!(
        fetched
            .get("subject")
            .and_then(|s| s.get("isActive"))
            .and_then(|v| v.as_bool()),
        Some(true)
    );

    // Admin goes through.
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.delete",
        json!({ "actorId": admin, "id": 3 }),
    );
    assert_eq!(deleted.get("deleted").and_then(|v| v.as_bool()), Some(true));
}

#[test]
fn unknown_or_deactivated_actor_is_rejected() {
    let workspace = temp_dir("campusd-rbac-actor");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "2",
        "courses.list",
        json!({ "actorId": 999 }),
    );
    assert_eq!(code, "forbidden");

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "3",
        "courses.list",
        json!({}),
    );
    assert_eq!(code, "bad_params", "actorId is required on every area method");

    // Deactivating a user cuts off their next request.
    let admin = login_id(&mut stdin, &mut reader, "admin", "admin123");
    let staff = login_id(&mut stdin, &mut reader, "staff1", "staff123");
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "courses.list",
        json!({ "actorId": staff }),
    );
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "users.delete",
        json!({ "actorId": admin, "id": staff }),
    );
    assert_eq!(deleted.get("deleted").and_then(|v| v.as_bool()), Some(true));
    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "6",
        "courses.list",
        json!({ "actorId": staff }),
    );
    assert_eq!(code, "forbidden");
}
