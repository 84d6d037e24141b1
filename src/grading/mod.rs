pub mod calculator;
pub mod config;
pub mod engine;
pub mod policy;
pub mod validation;

pub use calculator::GpaCalculator;
pub use config::*;
pub use engine::{calculate_gpa, CourseBreakdown, Report, ReportRow};
pub use policy::{normalize_score, score_to_points, BonusPolicy};
pub use validation::{validate_grading, validate_record};
