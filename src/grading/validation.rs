use super::config::GradingConfig;
use super::policy::{BonusPolicy, MAX_SCORE, MIN_SCORE};
use crate::record::StudentRecord;

/// Validate grading configuration for strict mode.
/// Returns all validation errors at once (not just the first).
pub fn validate_grading(config: &GradingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(curve) = config.curve {
        if !curve.is_finite() {
            errors.push(format!("grading.curve: must be a finite number, got {}", curve));
        }
    }

    if let Some(ref policy) = config.bonus_policy {
        if let Err(e) = BonusPolicy::parse_strict(policy) {
            errors.push(format!(
                "grading.bonus_policy: invalid '{}' - {}",
                policy, e
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate course data for strict mode.
/// Grading itself accepts any input; this rejects values that are
/// technically gradable but almost certainly data-entry mistakes.
pub fn validate_record(record: &StudentRecord) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, course) in record.courses.iter().enumerate() {
        if course.credits <= 0 {
            errors.push(format!(
                "courses[{}] ({}).credits: must be positive, got {}",
                i, course.code, course.credits
            ));
        }
        if !course.score.is_finite() || course.score < MIN_SCORE || course.score > MAX_SCORE {
            errors.push(format!(
                "courses[{}] ({}).score: must be within {}..{}, got {}",
                i, course.code, MIN_SCORE, MAX_SCORE, course.score
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
