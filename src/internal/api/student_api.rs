use std::sync::Arc;

use reqwest::Url;

use super::endpoint::{decode, decode_list, endpoint};
use crate::internal::gateway::{Outcome, RequestConfig, Requester};
use crate::internal::models::{NewStudent, Student, StudentWithCollege};

/// Client for the student record service.
#[derive(Clone)]
pub struct StudentApi {
    requester: Arc<dyn Requester>,
    base_url: Url,
}

impl StudentApi {
    pub fn new(requester: Arc<dyn Requester>, base_url: Url) -> Self {
        Self {
            requester,
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /student/`
    pub async fn save(&self, student: &NewStudent) -> Outcome<Student> {
        let url = endpoint(&self.base_url, &["student", ""])?;
        let body = serde_json::to_value(student)?;
        let value = self.requester.request(&url, RequestConfig::post(body)).await?;
        decode(&url, value)
    }

    /// `GET /student/api/all`
    pub async fn get_all(&self) -> Outcome<Vec<Student>> {
        let url = endpoint(&self.base_url, &["student", "api", "all"])?;
        let value = self.requester.request(&url, RequestConfig::get()).await?;
        decode_list(&url, value)
    }

    /// `GET /student/name/{name}`
    pub async fn get_by_name(&self, name: &str) -> Outcome<Student> {
        let url = endpoint(&self.base_url, &["student", "name", name])?;
        let value = self.requester.request(&url, RequestConfig::get()).await?;
        decode(&url, value)
    }

    /// `GET /student/college/{collegeId}`. The service answers 204 when the
    /// college has no students, which decodes as an empty list.
    pub async fn get_by_college_id(&self, college_id: u64) -> Outcome<Vec<StudentWithCollege>> {
        let college_id = college_id.to_string();
        let url = endpoint(&self.base_url, &["student", "college", &college_id])?;
        let value = self.requester.request(&url, RequestConfig::get()).await?;
        decode_list(&url, value)
    }

    /// `DELETE /student/{id}`
    pub async fn delete(&self, id: &str) -> Outcome<()> {
        let url = endpoint(&self.base_url, &["student", id])?;
        self.requester.request(&url, RequestConfig::delete()).await?;
        Ok(())
    }
}
