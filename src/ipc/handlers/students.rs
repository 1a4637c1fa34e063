use chrono::Local;
use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "students.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "students.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "students.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "students.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Students, req)?;

    let students = repo::students::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "students": students })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Students, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::students::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(student) => Ok(ok(&req.id, json!({ "student": student }))),
        None => Err(err(&req.id, "not_found", "student not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Students, req)?;

    let student_number = helpers::str_param(req, "studentNumber")?;
    let first_name = helpers::str_param(req, "firstName")?;
    let last_name = helpers::str_param(req, "lastName")?;
    let email = helpers::str_param(req, "email")?;
    let phone = helpers::opt_text_param(req, "phone");
    let date_of_birth = helpers::date_param(req, "dateOfBirth")?;
    let course_id = helpers::i64_param(req, "courseId")?;
    helpers::require_exists(conn, req, "courses", "Courses", course_id, "course")?;

    // Enrollment defaults to the day the record is created.
    let enrollment_date = match req.params.get("enrollmentDate") {
        Some(_) => helpers::date_param(req, "enrollmentDate")?,
        None => Local::now().format("%Y-%m-%d").to_string(),
    };

    let id = repo::students::add(
        conn,
        &student_number,
        &first_name,
        &last_name,
        &email,
        &phone,
        &date_of_birth,
        course_id,
        &enrollment_date,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Students, req)?;

    let id = helpers::i64_param(req, "id")?;
    let student_number = helpers::str_param(req, "studentNumber")?;
    let first_name = helpers::str_param(req, "firstName")?;
    let last_name = helpers::str_param(req, "lastName")?;
    let email = helpers::str_param(req, "email")?;
    let phone = helpers::opt_text_param(req, "phone");
    let date_of_birth = helpers::date_param(req, "dateOfBirth")?;
    let course_id = helpers::i64_param(req, "courseId")?;
    helpers::require_exists(conn, req, "courses", "Courses", course_id, "course")?;

    let updated = repo::students::update(
        conn,
        id,
        &student_number,
        &first_name,
        &last_name,
        &email,
        &phone,
        &date_of_birth,
        course_id,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Students, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::students::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
