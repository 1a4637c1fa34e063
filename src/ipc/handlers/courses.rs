use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "courses.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "courses.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "courses.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "courses.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Courses, req)?;

    let courses = repo::courses::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "courses": courses })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Courses, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::courses::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(course) => Ok(ok(&req.id, json!({ "course": course }))),
        None => Err(err(&req.id, "not_found", "course not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Courses, req)?;

    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let description = helpers::opt_text_param(req, "description");
    let duration = helpers::positive_i64_param(req, "duration")?;

    let id = repo::courses::add(conn, &name, &code, &description, duration)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Courses, req)?;

    let id = helpers::i64_param(req, "id")?;
    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let description = helpers::opt_text_param(req, "description");
    let duration = helpers::positive_i64_param(req, "duration")?;

    let updated = repo::courses::update(conn, id, &name, &code, &description, duration)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Courses, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::courses::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
