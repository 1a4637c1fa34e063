use serde_json::json;

use crate::auth;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::models::Role;
use crate::policy;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(login(state, req).unwrap_or_else(|e| e)),
        "auth.changePassword" => Some(change_password(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

fn login(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let username = helpers::str_param(req, "username")?;
    let password = helpers::raw_str_param(req, "password")?;

    match auth::authenticate(conn, &username, &password) {
        // One undistinguished failure for unknown username and wrong password.
        Ok(None) => Err(err(
            &req.id,
            "invalid_credentials",
            "invalid username or password",
            None,
        )),
        Ok(Some(user)) => {
            tracing::info!(user = %user.username, "login succeeded");
            let menu = policy::visible_areas(user.role);
            Ok(ok(&req.id, json!({ "user": user, "menu": menu })))
        }
        Err(e) => Err(helpers::store_failure(req, e)),
    }
}

/// Self-service for everyone; Admin may reset anyone's password.
fn change_password(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    let user_id = helpers::i64_param(req, "userId")?;
    let new_password = helpers::raw_str_param(req, "newPassword")?;

    if actor.id != user_id && actor.role != Role::Admin {
        return Err(err(
            &req.id,
            "forbidden",
            "may only change your own password",
            None,
        ));
    }

    match auth::change_password(conn, user_id, &new_password) {
        Ok(changed) => Ok(ok(&req.id, json!({ "changed": changed }))),
        Err(e) => Err(helpers::store_failure(req, e)),
    }
}
