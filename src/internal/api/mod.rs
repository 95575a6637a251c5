pub mod college_api;
pub(crate) mod endpoint;
pub mod student_api;

pub use college_api::CollegeApi;
pub use student_api::StudentApi;
