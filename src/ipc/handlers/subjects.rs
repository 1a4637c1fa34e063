use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "subjects.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "subjects.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "subjects.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "subjects.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Subjects, req)?;

    let subjects = repo::subjects::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "subjects": subjects })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Subjects, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::subjects::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(subject) => Ok(ok(&req.id, json!({ "subject": subject }))),
        None => Err(err(&req.id, "not_found", "subject not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Subjects, req)?;

    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let course_id = helpers::i64_param(req, "courseId")?;
    let credits = helpers::positive_i64_param(req, "credits")?;
    let description = helpers::opt_text_param(req, "description");
    helpers::require_exists(conn, req, "courses", "Courses", course_id, "course")?;

    let id = repo::subjects::add(conn, &name, &code, course_id, credits, &description)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Subjects, req)?;

    let id = helpers::i64_param(req, "id")?;
    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let course_id = helpers::i64_param(req, "courseId")?;
    let credits = helpers::positive_i64_param(req, "credits")?;
    let description = helpers::opt_text_param(req, "description");
    helpers::require_exists(conn, req, "courses", "Courses", course_id, "course")?;

    let updated = repo::subjects::update(conn, id, &name, &code, course_id, credits, &description)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Subjects, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::subjects::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
