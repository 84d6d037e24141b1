use serde::{Deserialize, Serialize};

/// Curve applied when none is configured
pub const DEFAULT_CURVE: f64 = 0.0;

/// Bonus policy applied when none is configured
pub const DEFAULT_BONUS_POLICY: &str = "honors+0.1";

/// Grading configuration as supplied by the caller.
///
/// Both settings are optional; unset values fall back to
/// [`DEFAULT_CURVE`] and [`DEFAULT_BONUS_POLICY`] when resolved.
///
/// Example YAML:
/// ```yaml
/// curve: 2.5
/// bonus_policy: "honors+0.1"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GradingConfig {
    /// Flat amount added to every raw score before mapping to points
    #[serde(default)]
    pub curve: Option<f64>,

    /// Bonus policy string, format "honors+<bonus>"
    /// Any string not starting with "honors" disables the bonus
    #[serde(default)]
    pub bonus_policy: Option<String>,
}

impl GradingConfig {
    pub fn new(curve: Option<f64>, bonus_policy: Option<&str>) -> Self {
        Self {
            curve,
            bonus_policy: bonus_policy.map(str::to_string),
        }
    }

    /// Build the effective settings without touching `self`.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            curve: self.curve.unwrap_or(DEFAULT_CURVE),
            bonus_policy: self
                .bonus_policy
                .clone()
                .unwrap_or_else(|| DEFAULT_BONUS_POLICY.to_string()),
        }
    }
}

/// Effective grading settings, echoed in every report as `meta`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ResolvedConfig {
    pub curve: f64,
    pub bonus_policy: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        GradingConfig::default().resolve()
    }
}
