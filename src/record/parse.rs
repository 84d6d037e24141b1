use std::str::FromStr;

use thiserror::Error;

use super::types::Course;

/// Errors from the compact `CODE:CREDITS:SCORE[:ABSENCES[:TITLE]]` course form
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CourseParseError {
    #[error("expected CODE:CREDITS:SCORE[:ABSENCES[:TITLE]], got '{0}'")]
    Shape(String),

    #[error("course code must not be empty")]
    EmptyCode,

    #[error("invalid credits '{0}'")]
    Credits(String),

    #[error("invalid score '{0}'")]
    Score(String),

    #[error("invalid absence count '{0}'")]
    Absences(String),
}

impl FromStr for Course {
    type Err = CourseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Title is last so it may itself contain ':'
        let parts: Vec<&str> = s.trim().splitn(5, ':').collect();
        if parts.len() < 3 {
            return Err(CourseParseError::Shape(s.to_string()));
        }

        let code = parts[0].trim();
        if code.is_empty() {
            return Err(CourseParseError::EmptyCode);
        }

        let credits: i64 = parts[1]
            .trim()
            .parse()
            .map_err(|_| CourseParseError::Credits(parts[1].to_string()))?;
        let score: f64 = parts[2]
            .trim()
            .parse()
            .map_err(|_| CourseParseError::Score(parts[2].to_string()))?;
        let absences: u32 = match parts.get(3).map(|a| a.trim()) {
            Some(a) if !a.is_empty() => a
                .parse()
                .map_err(|_| CourseParseError::Absences(a.to_string()))?,
            _ => 0,
        };
        let title = parts.get(4).map(|t| t.trim()).unwrap_or(code);

        Ok(Course::new(code, title, credits, score, absences))
    }
}
