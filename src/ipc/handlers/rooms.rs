use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::models::RoomType;
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rooms.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "rooms.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "rooms.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "rooms.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "rooms.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn room_type_param(req: &Request) -> Result<RoomType, serde_json::Value> {
    let code = helpers::i64_param(req, "type")?;
    RoomType::from_i64(code)
        .ok_or_else(|| helpers::validation(req, format!("type must be 1-5, got {code}")))
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Rooms, req)?;

    let rooms = repo::rooms::list(conn).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "rooms": rooms })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Rooms, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::rooms::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(room) => Ok(ok(&req.id, json!({ "room": room }))),
        None => Err(err(&req.id, "not_found", "room not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Rooms, req)?;

    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let room_type = room_type_param(req)?;
    let capacity = helpers::positive_i64_param(req, "capacity")?;
    let location = helpers::opt_text_param(req, "location");
    let equipment = helpers::opt_text_param(req, "equipment");

    let id = repo::rooms::add(conn, &name, &code, room_type, capacity, &location, &equipment)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Rooms, req)?;

    let id = helpers::i64_param(req, "id")?;
    let name = helpers::str_param(req, "name")?;
    let code = helpers::str_param(req, "code")?;
    let room_type = room_type_param(req)?;
    let capacity = helpers::positive_i64_param(req, "capacity")?;
    let location = helpers::opt_text_param(req, "location");
    let equipment = helpers::opt_text_param(req, "equipment");

    let updated = repo::rooms::update(
        conn, id, &name, &code, room_type, capacity, &location, &equipment,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Rooms, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::rooms::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
