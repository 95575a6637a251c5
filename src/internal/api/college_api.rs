use std::sync::Arc;

use reqwest::Url;

use super::endpoint::{decode, endpoint};
use crate::internal::gateway::{Outcome, RequestConfig, Requester};
use crate::internal::models::{College, NewCollege};

/// Client for the college record service.
#[derive(Clone)]
pub struct CollegeApi {
    requester: Arc<dyn Requester>,
    base_url: Url,
}

impl CollegeApi {
    pub fn new(requester: Arc<dyn Requester>, base_url: Url) -> Self {
        Self {
            requester,
            base_url,
        }
    }

    /// `POST /college/`
    pub async fn save(&self, college: &NewCollege) -> Outcome<College> {
        let url = endpoint(&self.base_url, &["college", ""])?;
        let body = serde_json::to_value(college)?;
        let value = self.requester.request(&url, RequestConfig::post(body)).await?;
        decode(&url, value)
    }
}
