use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,  // e.g. "CS101"
    pub title: String, // descriptive only, never used in grading
    pub credits: i64,  // credit-weight; expected positive but not enforced
    pub score: f64,    // raw score, expected 0..100
    #[serde(default)]
    pub absences: u32,
}

impl Course {
    pub fn new(code: &str, title: &str, credits: i64, score: f64, absences: u32) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            credits,
            score,
            absences,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl StudentRecord {
    pub fn new(student: &str, courses: Vec<Course>) -> Self {
        Self {
            student: student.to_string(),
            courses,
        }
    }

    /// Sum of credit-weights across all courses, saturating at the i64 bounds
    pub fn total_credits(&self) -> i64 {
        self.courses
            .iter()
            .fold(0i64, |total, c| total.saturating_add(c.credits))
    }
}

/// Sample record used when no courses are given on the command line.
///
/// Expected GPA with default grading settings is 2.814.
pub fn demo_record() -> StudentRecord {
    StudentRecord::new(
        "Oleksandr",
        vec![
            Course::new("CS101", "Intro to CS", 5, 88.0, 1),
            Course::new("MA121", "Calculus I", 4, 93.0, 0),
            Course::new("PH110", "Physics", 3, 76.0, 3),
            Course::new("EN201", "English", 2, 65.0, 0),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_record_shape() {
        let record = demo_record();
        assert_eq!(record.student, "Oleksandr");
        assert_eq!(record.courses.len(), 4);
        assert_eq!(record.courses[2].code, "PH110");
        assert_eq!(record.courses[2].absences, 3);
    }

    #[test]
    fn test_total_credits() {
        assert_eq!(demo_record().total_credits(), 14);
        assert_eq!(StudentRecord::new("empty", vec![]).total_credits(), 0);
    }

    #[test]
    fn test_total_credits_saturates() {
        let record = StudentRecord::new(
            "huge",
            vec![
                Course::new("A", "Huge", i64::MAX, 95.0, 0),
                Course::new("B", "One", 1, 95.0, 0),
            ],
        );
        assert_eq!(record.total_credits(), i64::MAX);
    }

    #[test]
    fn test_absences_default_when_missing() {
        let json = r#"{"code":"CS101","title":"Intro","credits":5,"score":88.0}"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.absences, 0);
    }
}
