use serde::{Deserialize, Serialize};

use super::college::College;
use super::lenient;

/// A student record as returned by the student service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::deserialize_nullable_string")]
    pub address: String,
    /// Records written through the service's form route may leave this blank.
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub college_id: Option<u64>,
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl Student {
    pub fn age_text(&self) -> String {
        self.age.map(|age| age.to_string()).unwrap_or_default()
    }

    pub fn college_id_text(&self) -> String {
        self.college_id.map(|id| id.to_string()).unwrap_or_default()
    }

    /// Multi-line summary shown by the view action.
    pub fn details(&self) -> String {
        format!(
            "Student Details:\n\
             ID: {}\n\
             Name: {}\n\
             Address: {}\n\
             Age: {}\n\
             College ID: {}",
            self.id.as_deref().unwrap_or("-"),
            self.name,
            self.address,
            or_dash(self.age),
            or_dash(self.college_id)
        )
    }
}

/// Payload of a create call. Carries exactly the four record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub address: String,
    pub age: u32,
    pub college_id: u64,
}

/// One element of the students-by-college listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentWithCollege {
    pub student: Student,
    #[serde(default)]
    pub college: Option<College>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_student_encodes_camel_case_numbers() {
        let student = NewStudent {
            name: "Alice".to_string(),
            address: "1 Main St".to_string(),
            age: 20,
            college_id: 5,
        };
        assert_eq!(
            serde_json::to_value(&student).unwrap(),
            json!({"name": "Alice", "address": "1 Main St", "age": 20, "collegeId": 5})
        );
    }

    #[test]
    fn student_accepts_string_encoded_numbers() {
        let student: Student = serde_json::from_value(json!({
            "id": "65f1c0ffee",
            "name": "Bob",
            "address": "2 Side St",
            "age": "21",
            "collegeId": "3"
        }))
        .unwrap();
        assert_eq!(student.id.as_deref(), Some("65f1c0ffee"));
        assert_eq!(student.age, Some(21));
        assert_eq!(student.college_id, Some(3));
    }

    #[test]
    fn numeric_id_becomes_string() {
        let student: Student = serde_json::from_value(json!({
            "id": 1, "name": "Alice", "address": "1 Main St", "age": 20, "collegeId": 5
        }))
        .unwrap();
        assert_eq!(student.id.as_deref(), Some("1"));
    }

    #[test]
    fn missing_or_null_id_is_none() {
        let student: Student = serde_json::from_value(json!({
            "id": null, "name": "Alice", "address": "1 Main St", "age": 20, "collegeId": 5
        }))
        .unwrap();
        assert!(student.id.is_none());
    }

    #[test]
    fn rejects_non_numeric_age() {
        let result = serde_json::from_value::<Student>(json!({
            "name": "Alice", "address": "1 Main St", "age": "twenty", "collegeId": 5
        }));
        assert!(result.unwrap_err().to_string().contains("expected a number"));
    }

    #[test]
    fn rejects_out_of_range_age() {
        let result = serde_json::from_value::<Student>(json!({
            "name": "Alice", "address": "1 Main St", "age": 5_000_000_000u64, "collegeId": 5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn details_lists_every_field() {
        let student = Student {
            id: Some("9".to_string()),
            name: "Carol".to_string(),
            address: "3 Hill Rd".to_string(),
            age: Some(19),
            college_id: Some(2),
        };
        let details = student.details();
        assert!(details.starts_with("Student Details:"));
        assert!(details.contains("ID: 9"));
        assert!(details.contains("Address: 3 Hill Rd"));
        assert!(details.contains("College ID: 2"));
    }

    #[test]
    fn blank_and_null_fields_still_decode() {
        let blank_age: Student = serde_json::from_value(json!({
            "id": "b", "name": "Ben", "address": "y", "age": "", "collegeId": "3"
        }))
        .unwrap();
        assert_eq!(blank_age.age, None);
        assert_eq!(blank_age.college_id, Some(3));

        let nulls: Student = serde_json::from_value(json!({
            "id": "c", "name": "Cy", "address": null, "age": null, "collegeId": " "
        }))
        .unwrap();
        assert_eq!(nulls.address, "");
        assert_eq!(nulls.age, None);
        assert_eq!(nulls.college_id, None);

        let sparse: Student = serde_json::from_value(json!({"id": "d"})).unwrap();
        assert_eq!(sparse.name, "");
        assert_eq!(sparse.college_id_text(), "");
    }

    #[test]
    fn details_dash_out_missing_numbers() {
        let student = Student {
            id: None,
            name: "Eve".to_string(),
            address: String::new(),
            age: None,
            college_id: Some(4),
        };
        let details = student.details();
        assert!(details.contains("Age: -"));
        assert!(details.contains("College ID: 4"));
    }

    #[test]
    fn college_is_optional_in_listing() {
        let item: StudentWithCollege = serde_json::from_value(json!({
            "student": {"id": "a", "name": "Dan", "address": "x", "age": "22", "collegeId": "3"}
        }))
        .unwrap();
        assert!(item.college.is_none());
        assert_eq!(item.student.name, "Dan");
    }
}
