use thiserror::Error;

/// Runtime knobs for the session engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Seed for join-code draws and turn hand-offs. `None` seeds from the
    /// OS; tests pin it for reproducible games.
    pub seed: Option<u64>,
    /// How many fresh join codes to draw before giving up on a collision
    /// streak.
    pub code_attempts: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            seed: None,
            code_attempts: 16,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "code_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
