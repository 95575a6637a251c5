// src/internal/dashboard/_dashboard.rs

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::commands::{Command, CommandOutput};
use crate::internal::api::{CollegeApi, StudentApi};
use crate::internal::config::ServiceEndpoints;
use crate::internal::forms::{CollegeForm, FormData, SchemaError, StudentForm, ValidationReport};
use crate::internal::gateway::{GatewayError, Requester};
use crate::internal::models::{College, NewCollege, NewStudent, Student};
use crate::internal::ui::table::{EMPTY_COLLEGE_MESSAGE, EMPTY_MESSAGE};
use crate::internal::ui::{
    Confirm, Level, LoadingIndicator, Notification, Notifier, StudentTable,
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const MISSING_COLLEGE_ID_MESSAGE: &str = "Please enter a college ID";
pub const INVALID_COLLEGE_ID_MESSAGE: &str = "Please enter a valid college ID";
pub const MISSING_STUDENT_ID_MESSAGE: &str = "Please enter a student ID";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("{0}")]
    Invalid(#[from] ValidationReport),

    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// View state the handlers update: the submit button and the results table.
#[derive(Debug, Default)]
pub struct DashboardView {
    pub submit_button: LoadingIndicator,
    pub table: StudentTable,
}

/// Handlers behind the student and college pages. Each one reports its result
/// through the notifier and never retries.
pub struct Dashboard {
    students: StudentApi,
    colleges: CollegeApi,
    student_form: StudentForm,
    college_form: CollegeForm,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn Confirm>,
    notification_duration: Duration,
}

impl Dashboard {
    pub fn new(
        requester: Arc<dyn Requester>,
        endpoints: ServiceEndpoints,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        notification_duration: Duration,
    ) -> Result<Self, SchemaError> {
        Ok(Self {
            students: StudentApi::new(Arc::clone(&requester), endpoints.student),
            colleges: CollegeApi::new(requester, endpoints.college),
            student_form: StudentForm::new()?,
            college_form: CollegeForm::new()?,
            notifier,
            confirm,
            notification_duration,
        })
    }

    pub fn student_form(&self) -> &StudentForm {
        &self.student_form
    }

    pub fn college_form(&self) -> &CollegeForm {
        &self.college_form
    }

    fn notify(&self, level: Level, message: impl Into<String>) {
        self.notifier
            .notify(Notification::new(level, message, self.notification_duration));
    }

    /// Validate the add-student form and submit it. The form is cleared only
    /// after the service accepted the record.
    pub async fn save_student(
        &self,
        form: &mut FormData,
        button: &mut LoadingIndicator,
    ) -> Result<Student, DashboardError> {
        let student = match self.student_form.parse(form) {
            Ok(student) => student,
            Err(report) => return Err(self.reject_form(form, report)),
        };
        form.mark(&ValidationReport::default());

        let saved = self.create_student(student, button).await?;
        form.clear();
        Ok(saved)
    }

    pub async fn create_student(
        &self,
        student: NewStudent,
        button: &mut LoadingIndicator,
    ) -> Result<Student, DashboardError> {
        let _loading = button.start();

        match self.students.save(&student).await {
            Ok(saved) => {
                info!(name = %saved.name, "Student saved");
                self.notify(
                    Level::Success,
                    format!("Student \"{}\" added successfully!", saved.name),
                );
                Ok(saved)
            }
            Err(e) => {
                self.notify(Level::Error, format!("Error adding student: {}", e));
                Err(e.into())
            }
        }
    }

    pub async fn save_college(
        &self,
        form: &mut FormData,
        button: &mut LoadingIndicator,
    ) -> Result<College, DashboardError> {
        let college = match self.college_form.parse(form) {
            Ok(college) => college,
            Err(report) => return Err(self.reject_form(form, report)),
        };
        form.mark(&ValidationReport::default());

        let saved = self.create_college(college, button).await?;
        form.clear();
        Ok(saved)
    }

    pub async fn create_college(
        &self,
        college: NewCollege,
        button: &mut LoadingIndicator,
    ) -> Result<College, DashboardError> {
        let _loading = button.start();

        match self.colleges.save(&college).await {
            Ok(saved) => {
                info!(college = %saved.college_name, "College saved");
                self.notify(
                    Level::Success,
                    format!("College \"{}\" added successfully!", saved.college_name),
                );
                Ok(saved)
            }
            Err(e) => {
                self.notify(Level::Error, format!("Error adding college: {}", e));
                Err(e.into())
            }
        }
    }

    fn reject_form(&self, form: &mut FormData, report: ValidationReport) -> DashboardError {
        warn!("Form rejected: {}", report);
        form.mark(&report);
        self.notify(Level::Error, REQUIRED_FIELDS_MESSAGE);
        DashboardError::Invalid(report)
    }

    /// Delete after confirmation. Returns `Ok(false)` without touching the
    /// network when the user declines.
    pub async fn delete_student(&self, id: &str, name: Option<&str>) -> Result<bool, DashboardError> {
        // A blank id would address the collection route instead of a record.
        let id = id.trim();
        if id.is_empty() {
            self.notify(Level::Warning, MISSING_STUDENT_ID_MESSAGE);
            return Err(DashboardError::MissingInput("id"));
        }

        let target = match name.filter(|n| !n.trim().is_empty()) {
            Some(name) => format!("student \"{}\"", name),
            None => "this student".to_string(),
        };
        if !self
            .confirm
            .confirm(&format!("Are you sure you want to delete {}?", target))
        {
            info!(id, "Delete cancelled");
            return Ok(false);
        }

        match self.students.delete(id).await {
            Ok(()) => {
                self.notify(Level::Success, "Student deleted successfully!");
                Ok(true)
            }
            Err(e) => {
                self.notify(Level::Error, format!("Error deleting student: {}", e));
                Err(e.into())
            }
        }
    }

    /// Look a student up by name and return the details text.
    pub async fn view_student(&self, name: &str) -> Result<String, DashboardError> {
        match self.students.get_by_name(name).await {
            Ok(student) => Ok(student.details()),
            Err(e) => {
                self.notify(
                    Level::Error,
                    format!("Error fetching student details: {}", e),
                );
                Err(e.into())
            }
        }
    }

    pub async fn list_students(&self, table: &mut StudentTable) -> Result<Vec<Student>, DashboardError> {
        table.set_loading();

        match self.students.get_all().await {
            Ok(students) => {
                self.notify(Level::Info, format!("Loaded {} student(s)", students.len()));
                table.show(students.clone(), EMPTY_MESSAGE);
                Ok(students)
            }
            Err(e) => {
                table.show_error();
                self.notify(Level::Error, format!("Error loading students: {}", e));
                Err(e.into())
            }
        }
    }

    /// Fill `table` with the students of one college. An empty college is a
    /// warning, not an error. Returns the number of students shown.
    pub async fn fetch_students_by_college(
        &self,
        college_id: u64,
        table: &mut StudentTable,
    ) -> Result<usize, DashboardError> {
        table.set_loading();

        match self.students.get_by_college_id(college_id).await {
            Ok(items) => {
                let students: Vec<Student> = items.into_iter().map(|item| item.student).collect();
                let count = students.len();
                if count > 0 {
                    self.notify(Level::Success, format!("Found {} student(s)", count));
                } else {
                    self.notify(Level::Warning, "No students found for this college!");
                }
                table.show(students, EMPTY_COLLEGE_MESSAGE);
                Ok(count)
            }
            Err(e) => {
                table.show_error();
                self.notify(Level::Error, format!("Error fetching students: {}", e));
                Err(e.into())
            }
        }
    }

    /// Same as [`Self::fetch_students_by_college`], starting from the raw
    /// college-id input.
    pub async fn fetch_students_from_input(
        &self,
        raw_college_id: &str,
        table: &mut StudentTable,
    ) -> Result<usize, DashboardError> {
        let raw = raw_college_id.trim();
        if raw.is_empty() {
            self.notify(Level::Warning, MISSING_COLLEGE_ID_MESSAGE);
            return Err(DashboardError::MissingInput("collegeId"));
        }
        let college_id = match raw.parse::<u64>() {
            Ok(id) => id,
            Err(_) => {
                self.notify(Level::Warning, INVALID_COLLEGE_ID_MESSAGE);
                return Err(ValidationReport::single("collegeId").into());
            }
        };

        self.fetch_students_by_college(college_id, table).await
    }

    /// Route a command to its handler.
    pub async fn dispatch(
        &self,
        command: Command,
        view: &mut DashboardView,
    ) -> Result<CommandOutput, DashboardError> {
        info!(command = command.name(), "Dispatching command");

        match command {
            Command::CreateStudent(student) => self
                .create_student(student, &mut view.submit_button)
                .await
                .map(CommandOutput::StudentSaved),
            Command::CreateCollege(college) => self
                .create_college(college, &mut view.submit_button)
                .await
                .map(CommandOutput::CollegeSaved),
            Command::DeleteStudent { id, name } => self
                .delete_student(&id, name.as_deref())
                .await
                .map(CommandOutput::StudentDeleted),
            Command::ViewStudent { name } => self
                .view_student(&name)
                .await
                .map(CommandOutput::StudentDetails),
            Command::ListStudents => self
                .list_students(&mut view.table)
                .await
                .map(CommandOutput::Students),
            Command::FetchStudentsByCollege { college_id } => self
                .fetch_students_by_college(college_id, &mut view.table)
                .await
                .map(CommandOutput::CollegeStudents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::forms::student_form::{
        ADDRESS_INPUT, AGE_INPUT, COLLEGE_ID_INPUT, NAME_INPUT,
    };
    use crate::internal::gateway::mock::MockRequester;
    use crate::internal::gateway::Method;
    use crate::internal::ui::{FixedAnswer, NotificationBoard, TableState};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    struct RecordingConfirm {
        answer: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl Confirm for RecordingConfirm {
        fn confirm(&self, prompt: &str) -> bool {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer
        }
    }

    fn dashboard(mock: &MockRequester, answer: bool) -> (Dashboard, Arc<NotificationBoard>) {
        let board = Arc::new(NotificationBoard::new());
        let endpoints =
            ServiceEndpoints::new("http://students.test", "http://colleges.test").unwrap();
        let dashboard = Dashboard::new(
            Arc::new(mock.clone()),
            endpoints,
            board.clone(),
            Arc::new(FixedAnswer(answer)),
            Duration::from_secs(30),
        )
        .unwrap();
        (dashboard, board)
    }

    fn alice_form() -> FormData {
        FormData::new()
            .with(NAME_INPUT, "Alice")
            .with(ADDRESS_INPUT, "1 Main St")
            .with(AGE_INPUT, "20")
            .with(COLLEGE_ID_INPUT, "5")
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let mock = MockRequester::new();
        let (dashboard, board) = dashboard(&mock, true);
        let mut form = alice_form().with(ADDRESS_INPUT, " ");
        let mut button = LoadingIndicator::new("Add Student");

        let err = dashboard.save_student(&mut form, &mut button).await.unwrap_err();

        assert!(matches!(err, DashboardError::Invalid(_)));
        assert_eq!(mock.call_count(), 0);
        assert!(form.is_marked_invalid(ADDRESS_INPUT));
        assert_eq!(form.get(NAME_INPUT), Some("Alice"));
        let banner = board.latest().unwrap();
        assert_eq!(banner.level, Level::Error);
        assert_eq!(banner.message, REQUIRED_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_and_restores_button() {
        let mock = MockRequester::new();
        mock.queue_err(GatewayError::HttpStatus { status: 500 });
        let (dashboard, board) = dashboard(&mock, true);
        let mut form = alice_form();
        let mut button = LoadingIndicator::new("Add Student");

        assert!(dashboard.save_student(&mut form, &mut button).await.is_err());

        assert_eq!(form.get(NAME_INPUT), Some("Alice"));
        assert_eq!(button.label(), "Add Student");
        assert!(!button.is_loading());
        assert_eq!(
            board.latest().unwrap().message,
            "Error adding student: HTTP error! status: 500"
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn delete_prompt_names_the_student() {
        let mock = MockRequester::new();
        let board = Arc::new(NotificationBoard::new());
        let confirm = Arc::new(RecordingConfirm {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        });
        let dashboard = Dashboard::new(
            Arc::new(mock.clone()),
            ServiceEndpoints::new("http://students.test", "http://colleges.test").unwrap(),
            board,
            confirm.clone(),
            Duration::from_secs(3),
        )
        .unwrap();

        assert!(!dashboard.delete_student("7", Some("Alice")).await.unwrap());
        assert!(!dashboard.delete_student("7", None).await.unwrap());

        let prompts = confirm.prompts.lock().unwrap().clone();
        assert_eq!(
            prompts,
            vec![
                "Are you sure you want to delete student \"Alice\"?".to_string(),
                "Are you sure you want to delete this student?".to_string(),
            ]
        );
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_student_id_is_not_deleted() {
        let mock = MockRequester::new();
        let (dashboard, board) = dashboard(&mock, true);

        let err = dashboard.delete_student("  ", Some("Alice")).await.unwrap_err();

        assert!(matches!(err, DashboardError::MissingInput("id")));
        assert_eq!(mock.call_count(), 0);
        let banner = board.latest().unwrap();
        assert_eq!(banner.level, Level::Warning);
        assert_eq!(banner.message, MISSING_STUDENT_ID_MESSAGE);
    }

    #[tokio::test]
    async fn delete_failure_is_reported() {
        let mock = MockRequester::new();
        mock.queue_err(GatewayError::Network("connection refused".to_string()));
        let (dashboard, board) = dashboard(&mock, true);

        assert!(dashboard.delete_student("7", None).await.is_err());
        assert_eq!(
            board.latest().unwrap().message,
            "Error deleting student: Network error: connection refused"
        );
    }

    #[tokio::test]
    async fn fetch_by_college_counts_students() {
        let mock = MockRequester::new();
        mock.queue_ok(json!([
            {"student": {"id": "a", "name": "Ann", "address": "x", "age": "20", "collegeId": "3"}},
            {"student": {"id": "b", "name": "Ben", "address": "y", "age": "21", "collegeId": "3"},
             "college": {"id": 3, "collegeName": "City", "address": "z", "university": "State"}}
        ]));
        let (dashboard, board) = dashboard(&mock, true);
        let mut table = StudentTable::new();

        assert_eq!(dashboard.fetch_students_by_college(3, &mut table).await.unwrap(), 2);
        assert!(matches!(table.state(), TableState::Rows(rows) if rows.len() == 2));
        let banner = board.latest().unwrap();
        assert_eq!(banner.level, Level::Success);
        assert_eq!(banner.message, "Found 2 student(s)");
    }

    #[tokio::test]
    async fn blank_college_id_input_is_a_warning() {
        let mock = MockRequester::new();
        let (dashboard, board) = dashboard(&mock, true);
        let mut table = StudentTable::new();

        let err = dashboard
            .fetch_students_from_input("  ", &mut table)
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::MissingInput("collegeId")));
        assert_eq!(mock.call_count(), 0);
        assert!(!table.is_visible());
        let banner = board.latest().unwrap();
        assert_eq!(banner.level, Level::Warning);
        assert_eq!(banner.message, MISSING_COLLEGE_ID_MESSAGE);
    }

    #[tokio::test]
    async fn non_numeric_college_id_input_is_rejected() {
        let mock = MockRequester::new();
        let (dashboard, board) = dashboard(&mock, true);
        let mut table = StudentTable::new();

        assert!(dashboard
            .fetch_students_from_input("abc", &mut table)
            .await
            .is_err());
        assert_eq!(mock.call_count(), 0);
        assert_eq!(board.latest().unwrap().message, INVALID_COLLEGE_ID_MESSAGE);
    }

    #[tokio::test]
    async fn view_student_returns_details() {
        let mock = MockRequester::new();
        mock.queue_ok(json!({"id": "9", "name": "Carol", "address": "3 Hill Rd", "age": "19", "collegeId": "2"}));
        let (dashboard, board) = dashboard(&mock, true);

        let details = dashboard.view_student("Carol").await.unwrap();
        assert!(details.contains("Name: Carol"));
        assert!(board.active().is_empty());
        assert_eq!(mock.calls()[0].url, "http://students.test/student/name/Carol");
    }

    #[tokio::test]
    async fn dispatch_routes_commands() {
        let mock = MockRequester::new();
        mock.queue_ok(Value::Null);
        mock.queue_ok(json!({"collegeName": "City", "address": "z", "university": "State"}));
        let (dashboard, _board) = dashboard(&mock, true);
        let mut view = DashboardView::default();

        let listed = dashboard
            .dispatch(Command::ListStudents, &mut view)
            .await
            .unwrap();
        assert_eq!(listed, CommandOutput::Students(Vec::new()));
        assert_eq!(view.table.state(), &TableState::Empty(EMPTY_MESSAGE.to_string()));

        let saved = dashboard
            .dispatch(
                Command::CreateCollege(NewCollege {
                    college_name: "City".to_string(),
                    address: "z".to_string(),
                    university: "State".to_string(),
                }),
                &mut view,
            )
            .await
            .unwrap();
        assert!(matches!(saved, CommandOutput::CollegeSaved(ref c) if c.college_name == "City"));

        let calls = mock.calls();
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].url, "http://students.test/student/api/all");
        assert_eq!(calls[1].method, Method::Post);
        assert_eq!(calls[1].url, "http://colleges.test/college/");
    }
}
