pub mod college;
pub mod lenient;
pub mod student;

pub use college::{College, NewCollege};
pub use student::{NewStudent, Student, StudentWithCollege};
