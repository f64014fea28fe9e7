//! Augmentation configuration.
//!
//! [`AugmentationConfig::default()`] matches the settings used for
//! production training runs. The config is serde-serializable so a training
//! run can record exactly what it used.

use rand::Rng;
use serde::{Deserialize, Serialize};
use signseq_core::{ConfigError, SignSeqResult};

/// Closed interval a random factor is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    pub low: f32,
    pub high: f32,
}

impl FactorRange {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Draw a factor uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.low >= self.high {
            return self.low;
        }
        rng.gen_range(self.low..=self.high)
    }

    fn validate(&self, name: &'static str, max: f32) -> Result<(), ConfigError> {
        let ok = self.low.is_finite()
            && self.high.is_finite()
            && self.low > 0.0
            && self.low <= self.high
            && self.high <= max;
        if ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                low: self.low,
                high: self.high,
            })
        }
    }
}

/// Default uniform-scale range
pub const DEFAULT_SCALE_RANGE: FactorRange = FactorRange::new(0.9, 1.1);

/// Default time-warp range
pub const DEFAULT_TIME_WARP_RANGE: FactorRange = FactorRange::new(0.8, 1.2);

/// Largest time-warp factor accepted by the transforms
pub const MAX_TIME_WARP_FACTOR: f32 = 8.0;

/// Default jitter standard deviation
pub const DEFAULT_JITTER_SIGMA: f32 = 0.02;

/// Which transforms the sample pipeline may apply, and how often
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    /// Master switch; when off samples are returned as normalized
    pub enabled: bool,

    /// Probability of adding Gaussian jitter. Default: **0.5**.
    pub jitter_prob: f64,
    /// Jitter standard deviation. Default: **0.02**.
    pub jitter_sigma: f32,

    /// Probability of a uniform scale. Default: **0.3**.
    pub scale_prob: f64,
    pub scale_range: FactorRange,

    /// Probability of a length-preserving time warp. Default: **0.3**.
    pub time_warp_prob: f64,
    pub time_warp_range: FactorRange,

    /// Probability of left/right mirroring. Default: **0.5**.
    pub mirror_prob: f64,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        AugmentationConfig {
            enabled: true,
            jitter_prob: 0.5,
            jitter_sigma: DEFAULT_JITTER_SIGMA,
            scale_prob: 0.3,
            scale_range: DEFAULT_SCALE_RANGE,
            time_warp_prob: 0.3,
            time_warp_range: DEFAULT_TIME_WARP_RANGE,
            mirror_prob: 0.5,
        }
    }
}

impl AugmentationConfig {
    /// Settings used for training runs
    pub fn production() -> Self {
        Self::default()
    }

    /// No augmentation (evaluation, export)
    pub fn disabled() -> Self {
        AugmentationConfig {
            enabled: false,
            ..Self::default()
        }
    }

    /// Apply every transform on every sample
    pub fn always() -> Self {
        AugmentationConfig {
            jitter_prob: 1.0,
            scale_prob: 1.0,
            time_warp_prob: 1.0,
            mirror_prob: 1.0,
            ..Self::default()
        }
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("jitter_prob", self.jitter_prob),
            ("scale_prob", self.scale_prob),
            ("time_warp_prob", self.time_warp_prob),
            ("mirror_prob", self.mirror_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        if !self.jitter_sigma.is_finite() || self.jitter_sigma < 0.0 {
            return Err(ConfigError::InvalidSigma(self.jitter_sigma));
        }

        self.scale_range.validate("scale_range", f32::MAX)?;
        self.time_warp_range.validate("time_warp_range", MAX_TIME_WARP_FACTOR)?;
        Ok(())
    }

    /// Parse from JSON and validate
    pub fn from_json_str(data: &str) -> SignSeqResult<Self> {
        let config: AugmentationConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use signseq_core::SignSeqError;

    #[test]
    fn test_default_is_valid() {
        let config = AugmentationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enabled);
        assert_eq!(config.jitter_prob, 0.5);
        assert_eq!(config.scale_prob, 0.3);
        assert_eq!(config.time_warp_prob, 0.3);
        assert_eq!(config.mirror_prob, 0.5);
    }

    #[test]
    fn test_presets() {
        assert!(!AugmentationConfig::disabled().enabled);
        assert!(AugmentationConfig::always().validate().is_ok());
        assert_eq!(AugmentationConfig::production(), AugmentationConfig::default());
    }

    #[test]
    fn test_bad_probability() {
        let config = AugmentationConfig {
            mirror_prob: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidProbability {
                name: "mirror_prob",
                value: 1.5
            })
        );

        let nan = AugmentationConfig {
            jitter_prob: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_bad_range_and_sigma() {
        let inverted = AugmentationConfig {
            scale_range: FactorRange::new(1.2, 0.8),
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(ConfigError::InvalidRange { name: "scale_range", .. })
        ));

        let negative = AugmentationConfig {
            time_warp_range: FactorRange::new(-1.0, 1.0),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let oversized = AugmentationConfig {
            time_warp_range: FactorRange::new(0.8, f32::INFINITY),
            ..Default::default()
        };
        assert!(matches!(
            oversized.validate(),
            Err(ConfigError::InvalidRange { name: "time_warp_range", .. })
        ));

        let too_fast = AugmentationConfig {
            time_warp_range: FactorRange::new(0.8, MAX_TIME_WARP_FACTOR * 2.0),
            ..Default::default()
        };
        assert!(too_fast.validate().is_err());

        let sigma = AugmentationConfig {
            jitter_sigma: -0.1,
            ..Default::default()
        };
        assert_eq!(sigma.validate(), Err(ConfigError::InvalidSigma(-0.1)));
    }

    #[test]
    fn test_from_json_partial() {
        let config = AugmentationConfig::from_json_str(r#"{"mirror_prob": 0.0}"#).unwrap();
        assert_eq!(config.mirror_prob, 0.0);
        assert_eq!(config.jitter_prob, 0.5);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        let err = AugmentationConfig::from_json_str(r#"{"scale_prob": 2.0}"#).unwrap_err();
        assert!(matches!(err, SignSeqError::Config(_)));

        let err = AugmentationConfig::from_json_str("[]").unwrap_err();
        assert!(matches!(err, SignSeqError::Json(_)));
    }

    #[test]
    fn test_factor_sample_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let f = DEFAULT_TIME_WARP_RANGE.sample(&mut rng);
            assert!((0.8..=1.2).contains(&f));
        }
        assert_eq!(FactorRange::new(1.0, 1.0).sample(&mut rng), 1.0);
    }
}
