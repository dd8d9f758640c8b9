use json::JsonValue;
use thiserror::Error;

pub const DEFAULT_GOAL_BIAS: f64 = 0.05;
pub const DEFAULT_PLANNER_NAME: &str = "RTP";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse planner configuration: {0}")]
    Parse(#[from] json::Error),
    #[error("planner configuration must be a JSON object")]
    NotAnObject,
    #[error("unknown planner configuration key `{0}`")]
    UnknownKey(String),
    #[error("planner configuration key `{key}` must be {expected}")]
    InvalidType { key: String, expected: &'static str },
    #[error("goal bias must lie in [0, 1], got {0}")]
    GoalBiasOutOfRange(f64),
    #[error("planner name must not be empty")]
    EmptyName,
}

/// Tunable parameters of the RTP planner.
#[derive(Clone, Debug, PartialEq)]
pub struct RtpConfig {
    /// Name the planner registers its solutions under.
    pub name: String,
    /// Probability of sampling from the goal region instead of the whole space.
    pub goal_bias: f64,
    /// Seed for the goal bias draws and the state sampler. Unseeded planners draw from entropy.
    pub seed: Option<u64>,
}

impl Default for RtpConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLANNER_NAME.to_string(),
            goal_bias: DEFAULT_GOAL_BIAS,
            seed: None,
        }
    }
}

impl RtpConfig {
    pub fn with_goal_bias(mut self, goal_bias: f64) -> Self {
        self.goal_bias = goal_bias;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.goal_bias) {
            return Err(ConfigError::GoalBiasOutOfRange(self.goal_bias));
        }
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(())
    }

    /// Parses a configuration such as `{"goal_bias": 0.1, "seed": 7}`. Missing keys keep their
    /// defaults; `null` leaves the seed unset.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value = json::parse(text)?;
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }

        let mut config = Self::default();
        for (key, entry) in value.entries() {
            match key {
                "name" => {
                    config.name = entry
                        .as_str()
                        .ok_or_else(|| invalid_type(key, "a string"))?
                        .to_string();
                }
                "goal_bias" => {
                    config.goal_bias = entry.as_f64().ok_or_else(|| invalid_type(key, "a number"))?;
                }
                "seed" => {
                    config.seed = if entry.is_null() {
                        None
                    } else {
                        Some(
                            entry
                                .as_u64()
                                .ok_or_else(|| invalid_type(key, "a non-negative integer"))?,
                        )
                    };
                }
                _ => return Err(ConfigError::UnknownKey(key.to_string())),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> JsonValue {
        let seed = match self.seed {
            Some(seed) => JsonValue::from(seed),
            None => JsonValue::Null,
        };
        json::object! {
            name: self.name.as_str(),
            goal_bias: self.goal_bias,
            seed: seed,
        }
    }
}

fn invalid_type(key: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidType {
        key: key.to_string(),
        expected,
    }
}
