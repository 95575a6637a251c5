use super::schema::{FieldSpec, FormData, FormSchema, SchemaError, ValidationReport};
use crate::internal::dashboard::Command;
use crate::internal::models::NewStudent;

pub const FORM_ID: &str = "apiStudentForm";
pub const NAME_INPUT: &str = "apiName";
pub const ADDRESS_INPUT: &str = "apiAddress";
pub const AGE_INPUT: &str = "apiAge";
pub const COLLEGE_ID_INPUT: &str = "apiCollegeId";

/// The add-student form.
#[derive(Debug, Clone)]
pub struct StudentForm {
    schema: FormSchema,
}

impl StudentForm {
    pub fn new() -> Result<Self, SchemaError> {
        let schema = FormSchema::new(
            FORM_ID,
            vec![
                FieldSpec::text("name", NAME_INPUT),
                FieldSpec::text("address", ADDRESS_INPUT),
                FieldSpec::integer("age", AGE_INPUT),
                FieldSpec::integer("collegeId", COLLEGE_ID_INPUT),
            ],
        )?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn parse(&self, data: &FormData) -> Result<NewStudent, ValidationReport> {
        let report = self.schema.validate(data);
        if !report.is_valid() {
            return Err(report);
        }

        Ok(NewStudent {
            name: self.schema.text(data, "name"),
            address: self.schema.text(data, "address"),
            age: self.schema.number(data, "age")?,
            college_id: self.schema.number(data, "collegeId")?,
        })
    }

    pub fn command(&self, data: &FormData) -> Result<Command, ValidationReport> {
        self.parse(data).map(Command::CreateStudent)
    }
}
