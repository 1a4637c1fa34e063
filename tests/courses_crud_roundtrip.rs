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

fn setup_admin(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    workspace: &std::path::Path,
) -> i64 {
    let _ = request_ok(
        stdin,
        reader,
        "setup-1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let login = request_ok(
        stdin,
        reader,
        "setup-2",
        "auth.login",
        json!({ "username": "admin", "password": "admin123" }),
    );
    login
        .get("user")
        .and_then(|u| u.get("id"))
        .and_then(|v| v.as_i64())
        .expect("admin id")
}

#[test]
fn add_then_get_roundtrip() {
    let workspace = temp_dir("campusd-course-roundtrip");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let admin_id = setup_admin(&mut stdin, &mut reader, &workspace);

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "courses.create",
        json!({
            "actorId": admin_id,
            "name": "Test",
            "code": "TST",
            "duration": 12
        }),
    );
    let course_id = created.get("id").and_then(|v| v.as_i64()).expect("new id");

    let fetched = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.get",
        json!({ "actorId": admin_id, "id": course_id }),
    );
    let course = fetched.get("course").expect("course");
    assert_eq!(course.get("name").and_then(|v| v.as_str()), Some("Test"));
    assert_eq!(course.get("code").and_then(|v| v.as_str()), Some("TST"));
    assert_eq!(course.get("duration").and_then(|v| v.as_i64()), Some(12));
    assert_eq!(course.get("isActive").and_then(|v| v.as_bool()), Some(true));
    // Description was omitted; it reads back empty, not null.
    assert_eq!(course.get("description").and_then(|v| v.as_str()), Some(""));
}

#[test]
fn update_reports_whether_a_row_changed() {
    let workspace = temp_dir("campusd-course-update");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let admin_id = setup_admin(&mut stdin, &mut reader, &workspace);

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "courses.create",
        json!({ "actorId": admin_id, "name": "Old", "code": "OLD", "duration": 6 }),
    );
    let course_id = created.get("id").and_then(|v| v.as_i64()).expect("new id");

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.update",
        json!({
            "actorId": admin_id,
            "id": course_id,
            "name": "New Name",
            "code": "NEW",
            "description": "renamed",
            "duration": 24
        }),
    );
    assert_eq!(updated.get("updated").and_then(|v| v.as_bool()), Some(true));

    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.update",
        json!({
            "actorId": admin_id,
            "id": 9999,
            "name": "Ghost",
            "code": "GHT",
            "duration": 1
        }),
    );
    assert_eq!(missing.get("updated").and_then(|v| v.as_bool()), Some(false));

    let fetched = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "courses.get",
        json!({ "actorId": admin_id, "id": course_id }),
    );
    assert_eq!(
        fetched
            .get("course")
            .and_then(|c| c.get("name"))
            .and_then(|v| v.as_str()),
        Some("New Name")
    );
}

#[test]
fn soft_delete_is_idempotent_and_hides_the_row() {
    let workspace = temp_dir("campusd-course-delete");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let admin_id = setup_admin(&mut stdin, &mut reader, &workspace);

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "courses.create",
        json!({ "actorId": admin_id, "name": "Doomed", "code": "DMD", "duration": 3 }),
    );
    let course_id = created.get("id").and_then(|v| v.as_i64()).expect("new id");

    let first = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.delete",
        json!({ "actorId": admin_id, "id": course_id }),
    );
    assert_eq!(first.get("deleted").and_then(|v| v.as_bool()), Some(true));

    // Deleting an already-inactive row reports "no row affected", not an
    // error.
    let second = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.delete",
        json!({ "actorId": admin_id, "id": course_id }),
    );
    assert_eq!(second.get("deleted").and_then(|v| v.as_bool()), Some(false));

    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "4",
        "courses.get",
        json!({ "actorId": admin_id, "id": course_id }),
    );
    assert_eq!(code, "not_found");

    let listed = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courses.list",
        json!({ "actorId": admin_id }),
    );
    let has_doomed = listed
        .get("courses")
        .and_then(|v| v.as_array())
        .map(|rows| {
            rows.iter()
                .any(|c| c.get("code").and_then(|v| v.as_str()) == Some("DMD"))
        })
        .unwrap_or(false);
    assert!(!has_doomed, "inactive course must not be listed");
}

#[test]
fn duplicate_code_surfaces_as_store_failure() {
    let workspace = temp_dir("campusd-course-dup");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let admin_id = setup_admin(&mut stdin, &mut reader, &workspace);

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "courses.create",
        json!({ "actorId": admin_id, "name": "First", "code": "DUP", "duration": 6 }),
    );
    let code = request_err_code(
        &mut stdin,
        &mut reader,
        "2",
        "courses.create",
        json!({ "actorId": admin_id, "name": "Second", "code": "DUP", "duration": 6 }),
    );
    assert_eq!(code, "db_query_failed");
}
