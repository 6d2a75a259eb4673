use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning parameters for the scoring pipeline.
///
/// Every constant the alignment math depends on lives here with a named
/// default, loadable from an optional `alignmeter.toml`. The inflation
/// factor and the tie threshold in particular are calibration values with
/// no closed-form derivation; deployments may re-tune them against real
/// response data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    #[serde(default)]
    pub scoring: ScoringTuning,

    #[serde(default)]
    pub alignment: AlignmentTuning,

    #[serde(default)]
    pub differential: DifferentialTuning,
}

/// Axis-score computation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTuning {
    /// Symmetric bound of each axis; scores land in [-axis_range, axis_range].
    #[serde(default = "default_axis_range")]
    pub axis_range: f64,

    /// Scale applied to the normalized axis ratio before clamping.
    #[serde(default = "default_score_multiplier")]
    pub score_multiplier: f64,

    /// Dead zone for axis-direction inference: baseline-vs-others
    /// divergence below this magnitude resolves to "indeterminate".
    #[serde(default = "default_direction_epsilon")]
    pub direction_epsilon: f64,
}

/// Alignment ranking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentTuning {
    /// The maximum scoring distance is the largest centered extent times
    /// this factor, so 100% alignment is reachable only at zero distance
    /// and the percentage scale does not saturate near the party cluster.
    #[serde(default = "default_max_distance_factor")]
    pub max_distance_factor: f64,

    /// Default near-tie window in percentage points. Callers supply their
    /// own threshold to `top_aligned`; this is what the CLI uses.
    #[serde(default = "default_tie_threshold")]
    pub tie_threshold: f64,
}

/// Differential-analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialTuning {
    /// Minimum stance gap for a question to count as a key difference.
    #[serde(default = "default_key_difference_threshold")]
    pub key_difference_threshold: u8,

    /// Mean stance magnitude from which shared positions are labelled
    /// "strongly" held.
    #[serde(default = "default_strong_stance_threshold")]
    pub strong_stance_threshold: f64,

    /// Default truncation for key-difference and common-ground lists.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_axis_range() -> f64 {
    10.0
}

fn default_score_multiplier() -> f64 {
    1.0
}

fn default_direction_epsilon() -> f64 {
    0.1
}

fn default_max_distance_factor() -> f64 {
    2.5
}

fn default_tie_threshold() -> f64 {
    9.0
}

fn default_key_difference_threshold() -> u8 {
    2
}

fn default_strong_stance_threshold() -> f64 {
    1.5
}

fn default_result_limit() -> usize {
    5
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            axis_range: default_axis_range(),
            score_multiplier: default_score_multiplier(),
            direction_epsilon: default_direction_epsilon(),
        }
    }
}

impl Default for AlignmentTuning {
    fn default() -> Self {
        Self {
            max_distance_factor: default_max_distance_factor(),
            tie_threshold: default_tie_threshold(),
        }
    }
}

impl Default for DifferentialTuning {
    fn default() -> Self {
        Self {
            key_difference_threshold: default_key_difference_threshold(),
            strong_stance_threshold: default_strong_stance_threshold(),
            result_limit: default_result_limit(),
        }
    }
}

impl TuningConfig {
    /// Load tuning from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TuningConfig = toml::from_str(&content)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid tuning config: {}", e))?;
        Ok(config)
    }

    /// Load `alignmeter.toml` from the working directory if present,
    /// otherwise fall back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new("alignmeter.toml");
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    // Pure function: check a value is strictly positive
    fn validate_positive(value: f64, name: &str) -> Result<(), String> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(format!("{} must be positive, got {}", name, value))
        }
    }

    /// Validate that all tuning values are usable before scoring starts.
    pub fn validate(&self) -> Result<(), String> {
        Self::validate_positive(self.scoring.axis_range, "axis_range")?;
        Self::validate_positive(self.scoring.score_multiplier, "score_multiplier")?;
        Self::validate_positive(self.alignment.max_distance_factor, "max_distance_factor")?;
        if self.scoring.direction_epsilon < 0.0 {
            return Err(format!(
                "direction_epsilon must be non-negative, got {}",
                self.scoring.direction_epsilon
            ));
        }
        if self.alignment.tie_threshold < 0.0 {
            return Err(format!(
                "tie_threshold must be non-negative, got {}",
                self.alignment.tie_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(TuningConfig::default().validate().is_ok());
    }

    #[test]
    fn default_values_match_calibration() {
        let config = TuningConfig::default();
        assert_eq!(config.scoring.axis_range, 10.0);
        assert_eq!(config.scoring.direction_epsilon, 0.1);
        assert_eq!(config.alignment.max_distance_factor, 2.5);
        assert_eq!(config.alignment.tie_threshold, 9.0);
        assert_eq!(config.differential.key_difference_threshold, 2);
    }

    #[test]
    fn negative_axis_range_is_rejected() {
        let mut config = TuningConfig::default();
        config.scoring.axis_range = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: TuningConfig = toml::from_str(
            r#"
            [alignment]
            tie_threshold = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(config.alignment.tie_threshold, 5.0);
        assert_eq!(config.alignment.max_distance_factor, 2.5);
        assert_eq!(config.scoring.axis_range, 10.0);
    }
}
