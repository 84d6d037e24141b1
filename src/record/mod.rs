pub mod parse;
pub mod types;

pub use parse::CourseParseError;
pub use types::{demo_record, Course, StudentRecord};
