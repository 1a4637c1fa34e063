use std::path::PathBuf;

use serde_json::json;

use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(health(state, req)),
        "workspace.select" => Some(select(state, req)),
        _ => None,
    }
}

fn health(state: &AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

/// Opens (or creates) the campus database under the given directory. Schema
/// creation and seeding run here; a failure keeps the previous workspace, and
/// the caller must not proceed to login.
fn select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(path) = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match db::open_db(&path) {
        Ok(conn) => {
            tracing::info!(workspace = %path.display(), "workspace opened");
            state.workspace = Some(path.clone());
            state.db = Some(conn);
            ok(
                &req.id,
                json!({ "workspacePath": path.to_string_lossy() }),
            )
        }
        Err(e) => err(&req.id, "db_open_failed", e.to_string(), None),
    }
}
