//! Role-based access policy. Both tables are hand-enumerated data, not
//! derived hierarchies: Lecturer and Staff are siblings and neither implies
//! the other.

use serde::{Serialize, Serializer};

use crate::models::Role;

/// The eight management areas a signed-in user may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Courses,
    Subjects,
    Students,
    Exams,
    Marks,
    Timetable,
    Rooms,
    Users,
}

impl Area {
    pub fn as_str(self) -> &'static str {
        match self {
            Area::Courses => "courses",
            Area::Subjects => "subjects",
            Area::Students => "students",
            Area::Exams => "exams",
            Area::Marks => "marks",
            Area::Timetable => "timetable",
            Area::Rooms => "rooms",
            Area::Users => "users",
        }
    }
}

impl Serialize for Area {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// (acting role, required roles it satisfies).
static ACCESS: [(Role, &[Role]); 4] = [
    (
        Role::Admin,
        &[Role::Admin, Role::Lecturer, Role::Staff, Role::Student],
    ),
    (Role::Lecturer, &[Role::Lecturer, Role::Student]),
    (Role::Staff, &[Role::Staff, Role::Student]),
    (Role::Student, &[Role::Student]),
];

/// (role, areas exposed on its dashboard).
static MENU: [(Role, &[Area]); 4] = [
    (
        Role::Admin,
        &[
            Area::Courses,
            Area::Subjects,
            Area::Students,
            Area::Exams,
            Area::Marks,
            Area::Timetable,
            Area::Rooms,
            Area::Users,
        ],
    ),
    (
        Role::Lecturer,
        &[
            Area::Subjects,
            Area::Students,
            Area::Exams,
            Area::Marks,
            Area::Timetable,
        ],
    ),
    (
        Role::Staff,
        &[
            Area::Courses,
            Area::Subjects,
            Area::Students,
            Area::Timetable,
            Area::Rooms,
        ],
    ),
    (Role::Student, &[Area::Timetable, Area::Marks]),
];

pub fn can_access(acting: Role, required: Role) -> bool {
    ACCESS
        .iter()
        .find(|(role, _)| *role == acting)
        .map(|(_, satisfied)| satisfied.contains(&required))
        .unwrap_or(false)
}

pub fn visible_areas(role: Role) -> &'static [Area] {
    MENU.iter()
        .find(|(r, _)| *r == role)
        .map(|(_, areas)| *areas)
        .unwrap_or(&[])
}

pub fn can_view(role: Role, area: Area) -> bool {
    visible_areas(role).contains(&area)
}

/// Deletes are Admin-only regardless of which screen is open.
pub fn can_delete(acting: Role) -> bool {
    can_access(acting, Role::Admin)
}
