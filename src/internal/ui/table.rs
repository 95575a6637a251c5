use crate::internal::models::Student;

pub const COLUMNS: [&str; 5] = ["ID", "Name", "Address", "Age", "College ID"];
pub const LOADING_MESSAGE: &str = "Loading students...";
pub const EMPTY_COLLEGE_MESSAGE: &str = "No students found for this college";
pub const EMPTY_MESSAGE: &str = "No students found";
pub const ERROR_MESSAGE: &str = "Error loading students";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableState {
    #[default]
    Hidden,
    Loading,
    Rows(Vec<Student>),
    /// Nothing to show; carries the message for the single placeholder row.
    Empty(String),
    Error,
}

/// The student results table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentTable {
    state: TableState,
}

impl StudentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != TableState::Hidden
    }

    pub fn set_loading(&mut self) {
        self.state = TableState::Loading;
    }

    /// Show `students`, or a placeholder row with `empty_message`.
    pub fn show(&mut self, students: Vec<Student>, empty_message: &str) {
        self.state = if students.is_empty() {
            TableState::Empty(empty_message.to_string())
        } else {
            TableState::Rows(students)
        };
    }

    pub fn show_error(&mut self) {
        self.state = TableState::Error;
    }

    /// Body rows as cell text. Placeholder states yield one single-cell row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        match &self.state {
            TableState::Hidden => Vec::new(),
            TableState::Loading => vec![vec![LOADING_MESSAGE.to_string()]],
            TableState::Empty(message) => vec![vec![message.clone()]],
            TableState::Error => vec![vec![ERROR_MESSAGE.to_string()]],
            TableState::Rows(students) => students
                .iter()
                .map(|s| {
                    vec![
                        s.id.clone().unwrap_or_default(),
                        s.name.clone(),
                        s.address.clone(),
                        s.age_text(),
                        s.college_id_text(),
                    ]
                })
                .collect(),
        }
    }

    /// Plain-text rendering with aligned columns.
    pub fn render(&self) -> String {
        if !self.is_visible() {
            return String::new();
        }

        let rows = self.rows();
        let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
        for row in rows.iter().filter(|r| r.len() == COLUMNS.len()) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let format_row = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
        let total_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        let mut lines = vec![format_row(&header), "-".repeat(total_width)];
        for row in &rows {
            if row.len() == COLUMNS.len() {
                lines.push(format_row(row));
            } else {
                lines.push(row.join(" "));
            }
        }
        lines.join("\n")
    }
}
