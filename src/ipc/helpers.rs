//! Shared param extraction, actor loading and policy gates. Handlers return
//! `Result<Value, Value>` where Err is a ready error response, so `?` short-
//! circuits straight to the reply.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use serde_json::Value;

use crate::error::StoreError;
use crate::models::User;
use crate::policy::{self, Area};
use crate::repo;

use super::error::err;
use super::types::{AppState, Request};

pub fn require_db<'a>(state: &'a AppState, req: &Request) -> Result<&'a Connection, Value> {
    state
        .db
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn store_failure(req: &Request, e: StoreError) -> Value {
    tracing::warn!(method = %req.method, error = %e, "store operation failed");
    err(&req.id, "db_query_failed", e.to_string(), None)
}

pub fn validation(req: &Request, message: impl Into<String>) -> Value {
    err(&req.id, "validation_failed", message, None)
}

/// Loads the acting user named by `params.actorId`. Every area method passes
/// explicit actor context instead of relying on ambient session state, so a
/// deactivated user loses access on their next call.
pub fn require_actor(conn: &Connection, req: &Request) -> Result<User, Value> {
    let actor_id = i64_param(req, "actorId")?;
    match repo::users::get(conn, actor_id) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(err(
            &req.id,
            "forbidden",
            "unknown or inactive acting user",
            None,
        )),
        Err(e) => Err(store_failure(req, e)),
    }
}

pub fn require_area(actor: &User, area: Area, req: &Request) -> Result<(), Value> {
    if policy::can_view(actor.role, area) {
        Ok(())
    } else {
        Err(err(
            &req.id,
            "forbidden",
            format!("role may not access {}", area.as_str()),
            None,
        ))
    }
}

pub fn require_delete(actor: &User, req: &Request) -> Result<(), Value> {
    if policy::can_delete(actor.role) {
        Ok(())
    } else {
        Err(err(&req.id, "forbidden", "delete requires the Admin role", None))
    }
}

/// Required, trimmed, non-empty string param.
pub fn str_param(req: &Request, key: &str) -> Result<String, Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{key} must not be empty"),
            None,
        )),
        None => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

/// Required string param taken verbatim (passwords must not be trimmed).
pub fn raw_str_param(req: &Request, key: &str) -> Result<String, Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{key} must not be empty"),
            None,
        )),
        None => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

/// Optional free-text param; absent becomes the empty string.
pub fn opt_text_param(req: &Request, key: &str) -> String {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub fn i64_param(req: &Request, key: &str) -> Result<i64, Value> {
    match req.params.get(key) {
        Some(v) => v
            .as_i64()
            .ok_or_else(|| err(&req.id, "bad_params", format!("{key} must be an integer"), None)),
        None => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

pub fn opt_i64_param(req: &Request, key: &str) -> Result<Option<i64>, Value> {
    match req.params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            err(&req.id, "bad_params", format!("{key} must be an integer"), None)
        }),
    }
}

pub fn f64_param(req: &Request, key: &str) -> Result<f64, Value> {
    match req.params.get(key) {
        Some(v) => v
            .as_f64()
            .ok_or_else(|| err(&req.id, "bad_params", format!("{key} must be a number"), None)),
        None => Err(err(&req.id, "bad_params", format!("missing {key}"), None)),
    }
}

pub fn positive_i64_param(req: &Request, key: &str) -> Result<i64, Value> {
    let v = i64_param(req, key)?;
    if v > 0 {
        Ok(v)
    } else {
        Err(validation(req, format!("{key} must be positive")))
    }
}

pub fn date_param(req: &Request, key: &str) -> Result<String, Value> {
    let s = str_param(req, key)?;
    if NaiveDate::parse_from_str(&s, "%Y-%m-%d").is_err() {
        return Err(validation(req, format!("{key} must be a YYYY-MM-DD date")));
    }
    Ok(s)
}

fn time_param(req: &Request, key: &str) -> Result<(String, NaiveTime), Value> {
    let s = str_param(req, key)?;
    match NaiveTime::parse_from_str(&s, "%H:%M") {
        Ok(t) => Ok((s, t)),
        Err(_) => Err(validation(req, format!("{key} must be a HH:MM time"))),
    }
}

/// Parses `startTime`/`endTime` and enforces start < end.
pub fn time_window(req: &Request) -> Result<(String, String), Value> {
    let (start_text, start) = time_param(req, "startTime")?;
    let (end_text, end) = time_param(req, "endTime")?;
    if start >= end {
        return Err(validation(req, "startTime must be before endTime"));
    }
    Ok((start_text, end_text))
}

/// Validates a to-be-written foreign key against an active parent row.
pub fn require_exists(
    conn: &Connection,
    req: &Request,
    entity: &'static str,
    table: &str,
    id: i64,
    what: &str,
) -> Result<(), Value> {
    match repo::exists(conn, entity, table, id) {
        Ok(true) => Ok(()),
        Ok(false) => Err(validation(req, format!("unknown {what} id {id}"))),
        Err(e) => Err(store_failure(req, e)),
    }
}
