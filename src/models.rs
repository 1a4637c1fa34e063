use serde::{Serialize, Serializer};

/// Role codes match the stored integer values (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Lecturer,
    Staff,
    Student,
}

impl Role {
    pub fn as_i64(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Lecturer => 2,
            Role::Staff => 3,
            Role::Student => 4,
        }
    }

    pub fn from_i64(v: i64) -> Option<Role> {
        match v {
            1 => Some(Role::Admin),
            2 => Some(Role::Lecturer),
            3 => Some(Role::Staff),
            4 => Some(Role::Student),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

/// Room type codes match the stored integer values (1-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    LectureHall,
    Laboratory,
    ComputerLab,
    Library,
    Auditorium,
}

impl RoomType {
    pub fn as_i64(self) -> i64 {
        match self {
            RoomType::LectureHall => 1,
            RoomType::Laboratory => 2,
            RoomType::ComputerLab => 3,
            RoomType::Library => 4,
            RoomType::Auditorium => 5,
        }
    }

    pub fn from_i64(v: i64) -> Option<RoomType> {
        match v {
            1 => Some(RoomType::LectureHall),
            2 => Some(RoomType::Laboratory),
            3 => Some(RoomType::ComputerLab),
            4 => Some(RoomType::Library),
            5 => Some(RoomType::Auditorium),
            _ => None,
        }
    }
}

impl Serialize for RoomType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_i64())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_date: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub duration: i64,
    pub is_active: bool,
    pub created_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub course_id: i64,
    pub credits: i64,
    pub description: String,
    pub is_active: bool,
    pub created_date: String,
    pub course_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub course_id: i64,
    pub enrollment_date: String,
    pub is_active: bool,
    pub course_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub room_type: RoomType,
    pub capacity: i64,
    pub location: String,
    pub equipment: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub subject_id: i64,
    pub exam_date: String,
    pub start_time: String,
    pub end_time: String,
    pub room_id: i64,
    pub max_marks: i64,
    pub description: String,
    pub is_active: bool,
    pub subject_name: String,
    pub room_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub exam_id: i64,
    pub marks_obtained: f64,
    pub grade: String,
    pub remarks: String,
    pub recorded_date: String,
    pub recorded_by: i64,
    pub student_name: String,
    pub exam_name: String,
    pub subject_name: String,
    pub max_marks: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub id: i64,
    pub subject_id: i64,
    pub room_id: i64,
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
    pub lecturer_id: i64,
    pub is_active: bool,
    pub subject_name: String,
    pub room_name: String,
    pub lecturer_name: String,
    pub course_name: String,
}
