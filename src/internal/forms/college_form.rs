use super::schema::{FieldSpec, FormData, FormSchema, SchemaError, ValidationReport};
use crate::internal::dashboard::Command;
use crate::internal::models::NewCollege;

pub const FORM_ID: &str = "collegeForm";
pub const NAME_INPUT: &str = "collegeName";
pub const ADDRESS_INPUT: &str = "address";
pub const UNIVERSITY_INPUT: &str = "university";

/// The add-college form.
#[derive(Debug, Clone)]
pub struct CollegeForm {
    schema: FormSchema,
}

impl CollegeForm {
    pub fn new() -> Result<Self, SchemaError> {
        let schema = FormSchema::new(
            FORM_ID,
            vec![
                FieldSpec::text("collegeName", NAME_INPUT),
                FieldSpec::text("address", ADDRESS_INPUT),
                FieldSpec::text("university", UNIVERSITY_INPUT),
            ],
        )?;
        Ok(Self { schema })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn parse(&self, data: &FormData) -> Result<NewCollege, ValidationReport> {
        let report = self.schema.validate(data);
        if !report.is_valid() {
            return Err(report);
        }

        Ok(NewCollege {
            college_name: self.schema.text(data, "collegeName"),
            address: self.schema.text(data, "address"),
            university: self.schema.text(data, "university"),
        })
    }

    pub fn command(&self, data: &FormData) -> Result<Command, ValidationReport> {
        self.parse(data).map(Command::CreateCollege)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_university_is_reported() {
        let form = CollegeForm::new().unwrap();
        let data = FormData::new()
            .with(NAME_INPUT, "City College")
            .with(ADDRESS_INPUT, "10 Campus Way");
        assert_eq!(
            form.parse(&data).unwrap_err(),
            ValidationReport::single(UNIVERSITY_INPUT)
        );
    }

    #[test]
    fn parses_complete_form() {
        let form = CollegeForm::new().unwrap();
        let data = FormData::new()
            .with(NAME_INPUT, "City College")
            .with(ADDRESS_INPUT, "10 Campus Way")
            .with(UNIVERSITY_INPUT, "State University");
        let college = form.parse(&data).unwrap();
        assert_eq!(college.college_name, "City College");
        assert_eq!(college.university, "State University");
    }
}
