use anyhow::{bail, Result};

pub const MAX_SCORE: f64 = 100.0;
pub const MIN_SCORE: f64 = 0.0;

/// Absence count at which the penalty kicks in
pub const ABSENCE_LIMIT: u32 = 3;
pub const ABSENCE_PENALTY: f64 = 5.0;

/// Top of the 4.0 scale; only courses mapped here earn the honors bonus
pub const TOP_POINTS: f64 = 4.0;

pub const HONORS_PREFIX: &str = "honors";

/// Score thresholds, checked in order, first match wins
const GRADE_THRESHOLDS: [(f64, f64); 4] = [(90.0, 4.0), (80.0, 3.0), (70.0, 2.0), (60.0, 1.0)];

/// Map a normalized score to points on the 4.0 scale.
pub fn score_to_points(score: f64) -> f64 {
    GRADE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// Apply curve, the 100 ceiling, the absence penalty and the 0 floor, in that order.
pub fn normalize_score(raw_score: f64, curve: f64, absences: u32) -> f64 {
    let mut normalized = raw_score + curve;
    if normalized > MAX_SCORE {
        normalized = MAX_SCORE;
    }
    if absences >= ABSENCE_LIMIT {
        normalized -= ABSENCE_PENALTY;
    }
    if normalized < MIN_SCORE {
        normalized = MIN_SCORE;
    }
    normalized
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BonusPolicy {
    /// "honors+N": add N to courses at the top of the scale
    Honors(f64),
    /// Any policy not starting with "honors"
    Disabled,
}

impl BonusPolicy {
    /// Lenient parse used by grading. Never fails: a missing or malformed
    /// suffix after "honors" yields a zero bonus.
    pub fn parse(s: &str) -> Self {
        if !s.starts_with(HONORS_PREFIX) {
            return BonusPolicy::Disabled;
        }
        let bonus = s
            .split('+')
            .nth(1)
            .and_then(|suffix| suffix.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        BonusPolicy::Honors(bonus)
    }

    /// Strict parse used by validation: an honors policy must carry a finite bonus.
    pub fn parse_strict(s: &str) -> Result<Self> {
        if !s.starts_with(HONORS_PREFIX) {
            return Ok(BonusPolicy::Disabled);
        }
        let Some(suffix) = s.split('+').nth(1) else {
            bail!("honors policy needs a '+<bonus>' suffix: {}", s)
        };
        let bonus: f64 = suffix.trim().parse()?;
        if !bonus.is_finite() {
            bail!("bonus must be a finite number: {}", s)
        }
        Ok(BonusPolicy::Honors(bonus))
    }

    pub fn bonus(&self) -> f64 {
        match self {
            BonusPolicy::Honors(n) => *n,
            BonusPolicy::Disabled => 0.0,
        }
    }

    /// Bonus earned by a course with the given mapped points.
    pub fn bonus_for(&self, points: f64) -> f64 {
        if points == TOP_POINTS {
            self.bonus()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_boundaries() {
        assert_eq!(score_to_points(100.0), 4.0);
        assert_eq!(score_to_points(90.0), 4.0);
        assert_eq!(score_to_points(89.999), 3.0);
        assert_eq!(score_to_points(80.0), 3.0);
        assert_eq!(score_to_points(70.0), 2.0);
        assert_eq!(score_to_points(60.0), 1.0);
        assert_eq!(score_to_points(59.999), 0.0);
        assert_eq!(score_to_points(0.0), 0.0);
    }

    #[test]
    fn test_normalize_plain() {
        assert_eq!(normalize_score(88.0, 0.0, 1), 88.0);
    }

    #[test]
    fn test_normalize_absence_penalty() {
        assert_eq!(normalize_score(76.0, 0.0, 3), 71.0);
        assert_eq!(normalize_score(76.0, 0.0, 2), 76.0);
    }

    #[test]
    fn test_normalize_ceiling_before_penalty() {
        // 98 + 10 caps at 100, then the penalty takes it to 95
        assert_eq!(normalize_score(98.0, 10.0, 4), 95.0);
    }

    #[test]
    fn test_normalize_floor() {
        assert_eq!(normalize_score(3.0, 0.0, 3), 0.0);
        assert_eq!(normalize_score(50.0, -80.0, 0), 0.0);
    }

    #[test]
    fn test_parse_honors() {
        assert_eq!(BonusPolicy::parse("honors+0.1"), BonusPolicy::Honors(0.1));
        assert_eq!(BonusPolicy::parse("honors+ 0.5 "), BonusPolicy::Honors(0.5));
    }

    #[test]
    fn test_parse_honors_malformed_suffix() {
        assert_eq!(BonusPolicy::parse("honors+abc"), BonusPolicy::Honors(0.0));
        assert_eq!(BonusPolicy::parse("honors"), BonusPolicy::Honors(0.0));
        assert_eq!(BonusPolicy::parse("honors-0.2"), BonusPolicy::Honors(0.0));
    }

    #[test]
    fn test_parse_only_second_segment_counts() {
        assert_eq!(BonusPolicy::parse("honors+0.2+9"), BonusPolicy::Honors(0.2));
    }

    #[test]
    fn test_parse_disabled() {
        assert_eq!(BonusPolicy::parse("none"), BonusPolicy::Disabled);
        assert_eq!(BonusPolicy::parse(""), BonusPolicy::Disabled);
        assert_eq!(BonusPolicy::parse("Honors+0.1"), BonusPolicy::Disabled);
        assert_eq!(BonusPolicy::parse("dean+0.3"), BonusPolicy::Disabled);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(
            BonusPolicy::parse_strict("honors+0.3").unwrap(),
            BonusPolicy::Honors(0.3)
        );
        assert_eq!(BonusPolicy::parse_strict("none").unwrap(), BonusPolicy::Disabled);
        assert!(BonusPolicy::parse_strict("honors").is_err());
        assert!(BonusPolicy::parse_strict("honors+abc").is_err());
        assert!(BonusPolicy::parse_strict("honors+inf").is_err());
    }

    #[test]
    fn test_bonus_only_for_top_points() {
        let policy = BonusPolicy::Honors(0.1);
        assert_eq!(policy.bonus_for(4.0), 0.1);
        assert_eq!(policy.bonus_for(3.0), 0.0);
        assert_eq!(BonusPolicy::Disabled.bonus_for(4.0), 0.0);
    }
}
