//! Course-level permissions granted by enrollment roles.
//!
//! Role names must match the `enrollments.role` check constraint in the
//! migrations.

pub const ROLE_ADMIN: &str = "admin";

pub const ENROLLMENT_TEACHER: &str = "teacher";
pub const ENROLLMENT_TA: &str = "ta";
pub const ENROLLMENT_DESIGNER: &str = "designer";
pub const ENROLLMENT_STUDENT: &str = "student";
pub const ENROLLMENT_OBSERVER: &str = "observer";

/// Permissions checked against a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoursePermission {
    ManageGrades,
    ViewAllGrades,
}

impl CoursePermission {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ManageGrades => "manage_grades",
            Self::ViewAllGrades => "view_all_grades",
        }
    }

    /// Enrollment roles that carry this permission.
    pub fn granted_to(self) -> &'static [&'static str] {
        match self {
            Self::ManageGrades => &[ENROLLMENT_TEACHER, ENROLLMENT_TA],
            Self::ViewAllGrades => &[ENROLLMENT_TEACHER, ENROLLMENT_TA, ENROLLMENT_DESIGNER],
        }
    }
}

/// Returns `true` if any of `roles` grants any of `required`.
pub fn is_authorized<S: AsRef<str>>(roles: &[S], required: &[CoursePermission]) -> bool {
    required.iter().any(|permission| {
        roles
            .iter()
            .any(|role| permission.granted_to().contains(&role.as_ref()))
    })
}
