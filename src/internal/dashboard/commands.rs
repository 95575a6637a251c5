use crate::internal::models::{College, NewCollege, NewStudent, Student};

/// Everything the dashboard can be asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateStudent(NewStudent),
    CreateCollege(NewCollege),
    DeleteStudent { id: String, name: Option<String> },
    ViewStudent { name: String },
    ListStudents,
    FetchStudentsByCollege { college_id: u64 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateStudent(_) => "create_student",
            Command::CreateCollege(_) => "create_college",
            Command::DeleteStudent { .. } => "delete_student",
            Command::ViewStudent { .. } => "view_student",
            Command::ListStudents => "list_students",
            Command::FetchStudentsByCollege { .. } => "fetch_students_by_college",
        }
    }
}

/// What a dispatched command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    StudentSaved(Student),
    CollegeSaved(College),
    /// `false` when the user declined the confirmation.
    StudentDeleted(bool),
    StudentDetails(String),
    Students(Vec<Student>),
    CollegeStudents(usize),
}
