use serde::{Deserialize, Serialize};

/// A college record as returned by the college service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub college_name: String,
    pub address: String,
    pub university: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollege {
    pub college_name: String,
    pub address: String,
    pub university: String,
}
