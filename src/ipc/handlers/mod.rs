pub mod auth;
pub mod core;
pub mod courses;
pub mod exams;
pub mod marks;
pub mod rooms;
pub mod students;
pub mod subjects;
pub mod timetable;
pub mod users;
