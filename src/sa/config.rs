//! Annealing parameters and the geometric cooling schedule.

use crate::instance::Instance;

/// Acceptance probability a worsening move of one penalty unit should
/// have at the start temperature.
const START_ACCEPTANCE: f64 = 0.9;

/// Acceptance probability of the same move at the minimum temperature.
const END_ACCEPTANCE: f64 = 0.0001;

/// Configuration for one annealing run.
///
/// # Examples
///
/// ```
/// use u_maxsat::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_alpha(0.98)
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Start temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Cooling factor in (0, 1): `T_{k+1} = alpha * T_k`.
    pub alpha: f64,

    /// The run ends once `T <= min_temperature`.
    pub min_temperature: f64,

    /// Number of candidate moves tried at each temperature level.
    pub iterations_per_temperature: usize,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            alpha: 0.99,
            min_temperature: 0.1,
            iterations_per_temperature: 100,
        }
    }
}

impl SaConfig {
    /// Derives parameters from the instance.
    ///
    /// With `scale = base_penalty / avg_weight + 1`:
    /// `T_0 = -scale / ln(0.9)`, `T_min = -scale / ln(0.0001)`,
    /// `iterations = 3 * num_vars` and `alpha = 0.99`.
    pub fn auto_tuned(instance: &Instance) -> Self {
        let num_vars = instance.num_vars().max(1);
        let base_penalty = instance.total_weight() as f64;
        let avg_weight = base_penalty / num_vars as f64;
        let scale = if avg_weight > 0.0 {
            base_penalty / avg_weight + 1.0
        } else {
            num_vars as f64 + 1.0
        };

        Self {
            initial_temperature: -scale / START_ACCEPTANCE.ln(),
            alpha: 0.99,
            min_temperature: -scale / END_ACCEPTANCE.ln(),
            iterations_per_temperature: 3 * num_vars,
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err("min_temperature must be positive".into());
        }
        if !self.initial_temperature.is_finite() {
            return Err("initial_temperature must be finite".into());
        }
        if self.initial_temperature <= self.min_temperature {
            return Err("initial_temperature must be greater than min_temperature".into());
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }
        if self.iterations_per_temperature == 0 {
            return Err("iterations_per_temperature must be positive".into());
        }
        Ok(())
    }

    /// One geometric cooling step.
    pub fn cool(&self, temperature: f64) -> f64 {
        temperature * self.alpha
    }

    /// Whether the schedule has reached its terminal state.
    pub fn frozen(&self, temperature: f64) -> bool {
        temperature <= self.min_temperature
    }

    /// Whether the inner loop has run its full length at this temperature.
    pub fn equilibrium(&self, iterations_at_temperature: usize) -> bool {
        iterations_at_temperature >= self.iterations_per_temperature
    }

    /// Number of temperature levels between start and minimum temperature:
    /// `ceil((ln T_min - ln T_0) / ln alpha)`.
    pub fn cooling_steps(&self) -> usize {
        let steps = (self.min_temperature.ln() - self.initial_temperature.ln()) / self.alpha.ln();
        if steps.is_finite() && steps > 0.0 {
            steps.ceil() as usize
        } else {
            0
        }
    }

    /// Upper bound on consecutive rejected moves:
    /// `max(cooling_steps * iterations / 2, num_vars * 100)`.
    ///
    /// Reported with every run; the schedule never restarts on it.
    pub fn stagnation_bound(&self, num_vars: usize) -> usize {
        let total = self
            .cooling_steps()
            .saturating_mul(self.iterations_per_temperature);
        (total / 2).max(num_vars.saturating_mul(100))
    }
}

/// How annealing parameters are chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamMode {
    /// Use the caller's parameters as given.
    Explicit(SaConfig),
    /// Derive parameters from the instance, see [`SaConfig::auto_tuned`].
    Auto,
}

impl ParamMode {
    pub fn resolve(&self, instance: &Instance) -> SaConfig {
        match self {
            ParamMode::Explicit(config) => *config,
            ParamMode::Auto => SaConfig::auto_tuned(instance),
        }
    }
}

impl From<SaConfig> for ParamMode {
    fn from(config: SaConfig) -> Self {
        ParamMode::Explicit(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.alpha - 0.99).abs() < 1e-12);
        assert_eq!(config.iterations_per_temperature, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_min() {
        let config = SaConfig::default().with_min_temperature(0.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_min_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite() {
        let config = SaConfig::default().with_initial_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
        let config = SaConfig::default()
            .with_initial_temperature(f64::INFINITY)
            .with_min_temperature(f64::INFINITY);
        assert!(config.validate().is_err());
        assert!(SaConfig::default().with_alpha(f64::NAN).validate().is_err());
        assert!(SaConfig::default()
            .with_initial_temperature(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_alpha() {
        assert!(SaConfig::default().with_alpha(1.0).validate().is_err());
        assert!(SaConfig::default().with_alpha(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_auto_tuned() {
        let instance = Instance::new("a", 4, vec![1, 2, 3, 6], vec![vec![1]]).unwrap();
        let config = SaConfig::auto_tuned(&instance);
        // base / avg = num_vars
        let scale = 5.0;
        assert!((config.initial_temperature - (-scale / 0.9f64.ln())).abs() < 1e-9);
        assert!((config.min_temperature - (-scale / 0.0001f64.ln())).abs() < 1e-9);
        assert_eq!(config.iterations_per_temperature, 12);
        assert!((config.alpha - 0.99).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_param_mode_resolve() {
        let instance = Instance::new("a", 2, vec![1, 1], vec![vec![1]]).unwrap();
        let explicit = SaConfig::default().with_alpha(0.9);
        assert_eq!(ParamMode::from(explicit).resolve(&instance), explicit);
        assert_eq!(
            ParamMode::Auto.resolve(&instance),
            SaConfig::auto_tuned(&instance)
        );
    }

    #[test]
    fn test_cooling_steps_and_stagnation_bound() {
        let config = SaConfig::default()
            .with_initial_temperature(100.0)
            .with_min_temperature(1.0)
            .with_alpha(0.5)
            .with_iterations_per_temperature(10);
        // ln(0.01) / ln(0.5) = 6.64 -> 7
        assert_eq!(config.cooling_steps(), 7);
        assert_eq!(config.stagnation_bound(0), 35);
        assert_eq!(config.stagnation_bound(2), 200);
    }

    #[test]
    fn test_frozen_and_equilibrium() {
        let config = SaConfig::default().with_min_temperature(1.0);
        assert!(config.frozen(1.0));
        assert!(!config.frozen(1.5));
        assert!(config.equilibrium(100));
        assert!(!config.equilibrium(99));
    }

    proptest! {
        #[test]
        fn prop_cooling_terminates(
            t0 in 1.0f64..1e4,
            ratio in 1e-4f64..0.9,
            alpha in 0.5f64..0.999,
        ) {
            let config = SaConfig::default()
                .with_initial_temperature(t0)
                .with_min_temperature(t0 * ratio)
                .with_alpha(alpha);
            let mut t = config.initial_temperature;
            let mut levels = 0usize;
            while !config.frozen(t) {
                let next = config.cool(t);
                prop_assert!(next < t);
                t = next;
                levels += 1;
                prop_assert!(levels <= config.cooling_steps() + 1);
            }
        }
    }
}
