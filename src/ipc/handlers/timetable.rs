use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::models::Role;
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "timetable.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "timetable.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "timetable.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "timetable.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "timetable.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn day_of_week_param(req: &Request) -> Result<i64, serde_json::Value> {
    let day = helpers::i64_param(req, "dayOfWeek")?;
    if (0..=6).contains(&day) {
        Ok(day)
    } else {
        Err(helpers::validation(req, format!("dayOfWeek must be 0-6, got {day}")))
    }
}

/// A timetable row must point at an active user holding the Lecturer role.
fn lecturer_param(
    conn: &rusqlite::Connection,
    req: &Request,
) -> Result<i64, serde_json::Value> {
    let lecturer_id = helpers::i64_param(req, "lecturerId")?;
    match repo::users::get(conn, lecturer_id).map_err(|e| helpers::store_failure(req, e))? {
        Some(user) if user.role == Role::Lecturer => Ok(lecturer_id),
        Some(_) => Err(helpers::validation(
            req,
            format!("user {lecturer_id} does not hold the Lecturer role"),
        )),
        None => Err(helpers::validation(req, format!("unknown lecturer id {lecturer_id}"))),
    }
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Timetable, req)?;

    let entries = repo::timetables::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "entries": entries })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Timetable, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::timetables::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(entry) => Ok(ok(&req.id, json!({ "entry": entry }))),
        None => Err(err(&req.id, "not_found", "timetable entry not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Timetable, req)?;

    let subject_id = helpers::i64_param(req, "subjectId")?;
    let room_id = helpers::i64_param(req, "roomId")?;
    let day_of_week = day_of_week_param(req)?;
    let (start_time, end_time) = helpers::time_window(req)?;
    helpers::require_exists(conn, req, "subjects", "Subjects", subject_id, "subject")?;
    helpers::require_exists(conn, req, "rooms", "Rooms", room_id, "room")?;
    let lecturer_id = lecturer_param(conn, req)?;

    let id = repo::timetables::add(
        conn,
        subject_id,
        room_id,
        day_of_week,
        &start_time,
        &end_time,
        lecturer_id,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Timetable, req)?;

    let id = helpers::i64_param(req, "id")?;
    let subject_id = helpers::i64_param(req, "subjectId")?;
    let room_id = helpers::i64_param(req, "roomId")?;
    let day_of_week = day_of_week_param(req)?;
    let (start_time, end_time) = helpers::time_window(req)?;
    helpers::require_exists(conn, req, "subjects", "Subjects", subject_id, "subject")?;
    helpers::require_exists(conn, req, "rooms", "Rooms", room_id, "room")?;
    let lecturer_id = lecturer_param(conn, req)?;

    let updated = repo::timetables::update(
        conn,
        id,
        subject_id,
        room_id,
        day_of_week,
        &start_time,
        &end_time,
        lecturer_id,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Timetable, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::timetables::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
