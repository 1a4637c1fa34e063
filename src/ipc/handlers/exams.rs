use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exams.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "exams.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "exams.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "exams.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "exams.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Exams, req)?;

    let exams = repo::exams::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "exams": exams })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Exams, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::exams::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(exam) => Ok(ok(&req.id, json!({ "exam": exam }))),
        None => Err(err(&req.id, "not_found", "exam not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Exams, req)?;

    let name = helpers::str_param(req, "name")?;
    let subject_id = helpers::i64_param(req, "subjectId")?;
    let exam_date = helpers::date_param(req, "examDate")?;
    let (start_time, end_time) = helpers::time_window(req)?;
    let room_id = helpers::i64_param(req, "roomId")?;
    let max_marks = helpers::positive_i64_param(req, "maxMarks")?;
    let description = helpers::opt_text_param(req, "description");
    helpers::require_exists(conn, req, "subjects", "Subjects", subject_id, "subject")?;
    helpers::require_exists(conn, req, "rooms", "Rooms", room_id, "room")?;

    let id = repo::exams::add(
        conn,
        &name,
        subject_id,
        &exam_date,
        &start_time,
        &end_time,
        room_id,
        max_marks,
        &description,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Exams, req)?;

    let id = helpers::i64_param(req, "id")?;
    let name = helpers::str_param(req, "name")?;
    let subject_id = helpers::i64_param(req, "subjectId")?;
    let exam_date = helpers::date_param(req, "examDate")?;
    let (start_time, end_time) = helpers::time_window(req)?;
    let room_id = helpers::i64_param(req, "roomId")?;
    let max_marks = helpers::positive_i64_param(req, "maxMarks")?;
    let description = helpers::opt_text_param(req, "description");
    helpers::require_exists(conn, req, "subjects", "Subjects", subject_id, "subject")?;
    helpers::require_exists(conn, req, "rooms", "Rooms", room_id, "room")?;

    let updated = repo::exams::update(
        conn,
        id,
        &name,
        subject_id,
        &exam_date,
        &start_time,
        &end_time,
        room_id,
        max_marks,
        &description,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Exams, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::exams::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
