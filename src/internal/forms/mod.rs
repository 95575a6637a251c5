pub mod college_form;
pub mod schema;
pub mod student_form;

pub use college_form::CollegeForm;
pub use schema::{FieldKind, FieldSpec, FormData, FormSchema, SchemaError, ValidationReport};
pub use student_form::StudentForm;
