use tracing::{debug, trace};

use super::config::{GradingConfig, ResolvedConfig};
use super::engine::{round_to, CourseBreakdown, Report, ReportRow};
use super::policy::{normalize_score, score_to_points, BonusPolicy};
use crate::record::{Course, StudentRecord};

/// Stepwise GPA computation for one record.
///
/// Holds the resolved settings and the running totals, and exposes each
/// step of the per-course pipeline as its own method. Produces the same
/// report as [`calculate_gpa`](super::engine::calculate_gpa).
#[derive(Debug)]
pub struct GpaCalculator<'a> {
    record: &'a StudentRecord,
    config: ResolvedConfig,
    bonus_policy: BonusPolicy,
    total_credits: i64,
    acc_weighted_points: f64,
    rows: Vec<ReportRow>,
    breakdown: Vec<CourseBreakdown>,
}

impl<'a> GpaCalculator<'a> {
    pub fn new(record: &'a StudentRecord, config: &GradingConfig) -> Self {
        let resolved = config.resolve();
        let bonus_policy = BonusPolicy::parse(&resolved.bonus_policy);
        trace!(?resolved, ?bonus_policy, "resolved grading config");

        Self {
            record,
            config: resolved,
            bonus_policy,
            total_credits: 0,
            acc_weighted_points: 0.0,
            rows: Vec::with_capacity(record.courses.len()),
            breakdown: Vec::with_capacity(record.courses.len()),
        }
    }

    /// Step 1: curve, ceiling, absence penalty, floor
    pub fn normalized_score(&self, course: &Course) -> f64 {
        normalize_score(course.score, self.config.curve, course.absences)
    }

    /// Step 2: honors bonus earned at the given mapped points
    pub fn bonus(&self, step_points: f64) -> f64 {
        self.bonus_policy.bonus_for(step_points)
    }

    /// Step 3: fold one course into the running totals, returning its weighted points
    fn accumulate(&mut self, adjusted_points: f64, credits: i64) -> f64 {
        let weighted_points = adjusted_points * credits as f64;
        self.acc_weighted_points += weighted_points;
        self.total_credits = self.total_credits.saturating_add(credits);
        weighted_points
    }

    fn gpa(&self) -> f64 {
        if self.total_credits > 0 {
            self.acc_weighted_points / self.total_credits as f64
        } else {
            0.0
        }
    }

    pub fn run(mut self) -> Report {
        let record = self.record;

        for course in &record.courses {
            let step_score = self.normalized_score(course);
            let step_points = score_to_points(step_score);
            let bonus = self.bonus(step_points);
            let weighted_points = self.accumulate(step_points + bonus, course.credits);

            debug!(
                course = %course.code,
                step_score,
                step_points,
                bonus,
                weighted_points,
                "graded course"
            );

            self.rows.push(ReportRow {
                course: course.code.clone(),
                credits: course.credits,
                points: round_to(step_points, 2),
            });
            self.breakdown.push(CourseBreakdown {
                course: course.code.clone(),
                normalized_score: step_score,
                points: step_points,
                bonus,
                weighted: weighted_points,
            });
        }

        let gpa = self.gpa();
        Report {
            student: record.student.clone(),
            gpa: round_to(gpa, 3),
            total_credits: self.total_credits,
            rows: self.rows,
            meta: self.config,
            breakdown: self.breakdown,
        }
    }
}
