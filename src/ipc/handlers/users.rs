use serde_json::json;

use crate::auth;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::models::Role;
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "users.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "users.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "users.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "users.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn role_param(req: &Request, key: &str) -> Result<Role, serde_json::Value> {
    let code = helpers::i64_param(req, key)?;
    Role::from_i64(code)
        .ok_or_else(|| helpers::validation(req, format!("{key} must be 1-4, got {code}")))
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Users, req)?;

    // Optional per-role narrowing for the management screen's filter.
    let users = match helpers::opt_i64_param(req, "role")? {
        Some(code) => {
            let role = Role::from_i64(code)
                .ok_or_else(|| helpers::validation(req, format!("role must be 1-4, got {code}")))?;
            repo::users::list_by_role(conn, role)
        }
        None => repo::users::list(conn),
    }
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "users": users })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Users, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::users::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(user) => Ok(ok(&req.id, json!({ "user": user }))),
        None => Err(err(&req.id, "not_found", "user not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Users, req)?;

    let username = helpers::str_param(req, "username")?;
    let password = helpers::raw_str_param(req, "password")?;
    let full_name = helpers::str_param(req, "fullName")?;
    let email = helpers::str_param(req, "email")?;
    let role = role_param(req, "role")?;

    let hash = auth::hash_password(&password).map_err(|e| helpers::store_failure(req, e))?;
    let id = repo::users::add(conn, &username, &hash, &full_name, &email, role)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Users, req)?;

    let id = helpers::i64_param(req, "id")?;
    let username = helpers::str_param(req, "username")?;
    let full_name = helpers::str_param(req, "fullName")?;
    let email = helpers::str_param(req, "email")?;
    let role = role_param(req, "role")?;

    let updated = repo::users::update(conn, id, &username, &full_name, &email, role)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Users, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    // No self-deletion, Admin included.
    if id == actor.id {
        return Err(err(&req.id, "forbidden", "cannot delete own account", None));
    }

    let deleted = repo::users::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
