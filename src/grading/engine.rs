use serde::Serialize;
use tracing::debug;

use super::config::{GradingConfig, ResolvedConfig};
use super::policy::{
    score_to_points, ABSENCE_LIMIT, ABSENCE_PENALTY, HONORS_PREFIX, MAX_SCORE, MIN_SCORE,
    TOP_POINTS,
};
use crate::record::StudentRecord;

/// One report line per course, in input order.
///
/// `points` is the mapped value before any honors bonus; the bonus only
/// shows up in the GPA.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReportRow {
    pub course: String,
    pub credits: i64,
    pub points: f64,
}

/// Intermediate values for one course, kept for verbose output
#[derive(Debug, Clone, PartialEq)]
pub struct CourseBreakdown {
    pub course: String,
    pub normalized_score: f64,
    pub points: f64,   // mapped points before bonus
    pub bonus: f64,    // 0.0 unless points hit the top of the scale
    pub weighted: f64, // (points + bonus) * credits
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub student: String,
    pub gpa: f64,
    pub total_credits: i64,
    pub rows: Vec<ReportRow>,
    pub meta: ResolvedConfig,
    #[serde(skip)]
    pub breakdown: Vec<CourseBreakdown>,
}

impl Report {
    /// List every observable difference from `other`. Empty means equivalent.
    pub fn differences(&self, other: &Report) -> Vec<String> {
        let mut diffs = Vec::new();

        if self.student != other.student {
            diffs.push(format!("student: '{}' vs '{}'", self.student, other.student));
        }
        if !same_value(self.gpa, other.gpa) {
            diffs.push(format!("gpa: {} vs {}", self.gpa, other.gpa));
        }
        if self.total_credits != other.total_credits {
            diffs.push(format!(
                "total_credits: {} vs {}",
                self.total_credits, other.total_credits
            ));
        }
        if !same_value(self.meta.curve, other.meta.curve) {
            diffs.push(format!("meta.curve: {} vs {}", self.meta.curve, other.meta.curve));
        }
        if self.meta.bonus_policy != other.meta.bonus_policy {
            diffs.push(format!(
                "meta.bonus_policy: '{}' vs '{}'",
                self.meta.bonus_policy, other.meta.bonus_policy
            ));
        }
        if self.rows.len() != other.rows.len() {
            diffs.push(format!("rows: {} vs {}", self.rows.len(), other.rows.len()));
        }
        for (i, (a, b)) in self.rows.iter().zip(&other.rows).enumerate() {
            if a.course != b.course || a.credits != b.credits || !same_value(a.points, b.points) {
                diffs.push(format!("rows[{}]: {:?} vs {:?}", i, a, b));
            }
        }

        diffs
    }
}

/// NaN-tolerant equality: two NaNs count as the same reported value
fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Round to `decimals` places, ties to even (0.0625 -> 0.062)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Compute a GPA report in a single pass over the record.
///
/// Never fails: a malformed bonus suffix counts as zero bonus and a
/// non-positive credit total yields a GPA of 0.0.
pub fn calculate_gpa(record: &StudentRecord, config: &GradingConfig) -> Report {
    let resolved = config.resolve();
    let honors = resolved.bonus_policy.starts_with(HONORS_PREFIX);

    let mut total_credits: i64 = 0;
    let mut weighted_total = 0.0;
    let mut rows = Vec::with_capacity(record.courses.len());
    let mut breakdown = Vec::with_capacity(record.courses.len());

    for course in &record.courses {
        let curved_score = course.score + resolved.curve;
        let capped_score = if curved_score > MAX_SCORE {
            MAX_SCORE
        } else {
            curved_score
        };
        let penalized_score = if course.absences >= ABSENCE_LIMIT {
            capped_score - ABSENCE_PENALTY
        } else {
            capped_score
        };
        let normalized_score = if penalized_score < MIN_SCORE {
            MIN_SCORE
        } else {
            penalized_score
        };

        let points = score_to_points(normalized_score);
        let bonus = if honors && points == TOP_POINTS {
            resolved
                .bonus_policy
                .split('+')
                .nth(1)
                .and_then(|suffix| suffix.trim().parse::<f64>().ok())
                .unwrap_or(0.0)
        } else {
            0.0
        };

        let adjusted_points = points + bonus;
        let weighted = adjusted_points * course.credits as f64;
        weighted_total += weighted;
        total_credits = total_credits.saturating_add(course.credits);

        debug!(
            course = %course.code,
            normalized_score,
            points,
            bonus,
            weighted,
            "graded course"
        );

        rows.push(ReportRow {
            course: course.code.clone(),
            credits: course.credits,
            points: round_to(points, 2),
        });
        breakdown.push(CourseBreakdown {
            course: course.code.clone(),
            normalized_score,
            points,
            bonus,
            weighted,
        });
    }

    let gpa = if total_credits > 0 {
        weighted_total / total_credits as f64
    } else {
        0.0
    };

    Report {
        student: record.student.clone(),
        gpa: round_to(gpa, 3),
        total_credits,
        rows,
        meta: resolved,
        breakdown,
    }
}
