//! Port range domain model.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest port handed out by default (first five-digit port).
pub const DEFAULT_MIN_PORT: u16 = 10000;

/// Highest port handed out by default.
pub const DEFAULT_MAX_PORT: u16 = 65535;

/// An inclusive range of TCP ports that candidates are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRange {
    /// Lowest allowed port.
    pub min: u16,
    /// Highest allowed port.
    pub max: u16,
}

impl PortRange {
    /// Create a validated port range.
    pub fn new(min: u16, max: u16) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    /// Check the bounds. Deserialized ranges skip `new`, so callers validate explicitly.
    pub fn validate(&self) -> Result<()> {
        if self.min == 0 {
            return Err(Error::InvalidRange(
                "port 0 is reserved for OS assignment".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(Error::InvalidRange(format!(
                "min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Whether `port` falls inside the range.
    pub fn contains(&self, port: u16) -> bool {
        (self.min..=self.max).contains(&port)
    }

    /// Draw a uniformly random candidate port.
    pub fn random_candidate(&self) -> u16 {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PORT,
            max: DEFAULT_MAX_PORT,
        }
    }
}

impl std::fmt::Display for PortRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
