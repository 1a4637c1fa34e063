use serde_json::json;

use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers;
use crate::ipc::types::{AppState, Request};
use crate::models::Exam;
use crate::policy::Area;
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.list" => Some(list(state, req).unwrap_or_else(|e| e)),
        "marks.get" => Some(get(state, req).unwrap_or_else(|e| e)),
        "marks.create" => Some(create(state, req).unwrap_or_else(|e| e)),
        "marks.update" => Some(update(state, req).unwrap_or_else(|e| e)),
        "marks.delete" => Some(delete(state, req).unwrap_or_else(|e| e)),
        _ => None,
    }
}

/// Loads the owning exam and checks `0 <= obtained <= MaxMarks` before any
/// write. Returns the exam so the caller can derive the stored grade.
fn checked_exam(
    conn: &rusqlite::Connection,
    req: &Request,
    exam_id: i64,
    marks_obtained: f64,
) -> Result<Exam, serde_json::Value> {
    let exam = match repo::exams::get(conn, exam_id).map_err(|e| helpers::store_failure(req, e))? {
        Some(exam) => exam,
        None => return Err(helpers::validation(req, format!("unknown exam id {exam_id}"))),
    };
    if marks_obtained < 0.0 {
        return Err(helpers::validation(req, "marksObtained must not be negative"));
    }
    if marks_obtained > exam.max_marks as f64 {
        return Err(helpers::validation(
            req,
            format!(
                "marksObtained {} exceeds exam maximum {}",
                marks_obtained, exam.max_marks
            ),
        ));
    }
    Ok(exam)
}

fn list(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Marks, req)?;

    let student_id = helpers::opt_i64_param(req, "studentId")?;
    let exam_id = helpers::opt_i64_param(req, "examId")?;
    let marks = repo::marks::list(conn, student_id, exam_id)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "marks": marks })))
}

fn get(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Marks, req)?;
    let id = helpers::i64_param(req, "id")?;

    match repo::marks::get(conn, id).map_err(|e| helpers::store_failure(req, e))? {
        Some(mark) => Ok(ok(&req.id, json!({ "mark": mark }))),
        None => Err(err(&req.id, "not_found", "mark not found", None)),
    }
}

fn create(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Marks, req)?;

    let student_id = helpers::i64_param(req, "studentId")?;
    let exam_id = helpers::i64_param(req, "examId")?;
    let marks_obtained = helpers::f64_param(req, "marksObtained")?;
    let remarks = helpers::opt_text_param(req, "remarks");
    helpers::require_exists(conn, req, "students", "Students", student_id, "student")?;
    let exam = checked_exam(conn, req, exam_id, marks_obtained)?;

    let grade = calc::letter_grade(marks_obtained, exam.max_marks as f64);
    let id = repo::marks::add(
        conn,
        student_id,
        exam_id,
        marks_obtained,
        grade,
        &remarks,
        actor.id,
    )
    .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "id": id, "grade": grade })))
}

fn update(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Marks, req)?;

    let id = helpers::i64_param(req, "id")?;
    let student_id = helpers::i64_param(req, "studentId")?;
    let exam_id = helpers::i64_param(req, "examId")?;
    let marks_obtained = helpers::f64_param(req, "marksObtained")?;
    let remarks = helpers::opt_text_param(req, "remarks");
    helpers::require_exists(conn, req, "students", "Students", student_id, "student")?;
    let exam = checked_exam(conn, req, exam_id, marks_obtained)?;

    let grade = calc::letter_grade(marks_obtained, exam.max_marks as f64);
    let updated = repo::marks::update(conn, id, student_id, exam_id, marks_obtained, grade, &remarks)
        .map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "updated": updated, "grade": grade })))
}

fn delete(state: &AppState, req: &Request) -> Result<serde_json::Value, serde_json::Value> {
    let conn = helpers::require_db(state, req)?;
    let actor = helpers::require_actor(conn, req)?;
    helpers::require_area(&actor, Area::Marks, req)?;
    helpers::require_delete(&actor, req)?;
    let id = helpers::i64_param(req, "id")?;

    let deleted = repo::marks::delete(conn, id).map_err(|e| helpers::store_failure(req, e))?;
    Ok(ok(&req.id, json!({ "deleted": deleted })))
}
