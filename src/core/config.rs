//! Simulation configuration with documented policy constants
//!
//! Fixed rule-table numbers (base powers, radii, thresholds) live in
//! `rules::constants`. The values here are the probabilistic policy knobs a
//! scenario may override, plus the RNG seed.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the simulation RNG
    ///
    /// `None` seeds from OS entropy. Any fixed value makes a run fully
    /// reproducible, including push-back direction order.
    pub seed: Option<u64>,

    /// Turns between day/night transitions
    ///
    /// The phase toggles whenever the turn counter is a multiple of this.
    pub day_night_period: u32,

    /// Probability table for every random roll in the rule set
    pub chances: ChanceTable,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            day_night_period: 5,
            chances: ChanceTable::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_chances(mut self, chances: ChanceTable) -> Self {
        self.chances = chances;
        self
    }

    /// Validate that configuration values are sensible
    pub fn validate(&self) -> Result<()> {
        if self.day_night_period == 0 {
            return Err(SimError::InvalidConfig(
                "day_night_period must be positive".to_string(),
            ));
        }
        self.chances.validate()
    }
}

/// Per-roll probabilities, each in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChanceTable {
    /// Elf shot at a target exactly two cells away
    pub ranged_hit: f64,

    /// Orc raid on an adjacent carrying elf, by day
    pub raid_day: f64,

    /// Orc raid by night. Raids are meant to be likelier in the dark.
    pub raid_night: f64,

    /// Forager slipping out of an encounter before any power math
    pub dodge: f64,

    /// Close fight breaking off into a flight, on open ground
    pub escape: f64,

    /// Close fight breaking off on a mountain cell
    pub escape_mountain: f64,

    /// Panicker kicking its opponent away after the primary outcome
    pub kick: f64,
}

impl Default for ChanceTable {
    fn default() -> Self {
        Self {
            ranged_hit: 0.5,
            raid_day: 0.3,
            raid_night: 0.7,
            dodge: 0.3,
            escape: 0.2,
            escape_mountain: 0.4,
            kick: 0.2,
        }
    }
}

impl ChanceTable {
    /// Every roll fails. Useful for isolating one rule in tests.
    pub fn never() -> Self {
        Self {
            ranged_hit: 0.0,
            raid_day: 0.0,
            raid_night: 0.0,
            dodge: 0.0,
            escape: 0.0,
            escape_mountain: 0.0,
            kick: 0.0,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("ranged_hit", self.ranged_hit),
            ("raid_day", self.raid_day),
            ("raid_night", self.raid_night),
            ("dodge", self.dodge),
            ("escape", self.escape),
            ("escape_mountain", self.escape_mountain),
            ("kick", self.kick),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, p) in self.entries() {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert!(SimulationConfig::seeded(7).validate().is_ok());
    }

    #[test]
    fn test_night_raids_likelier_than_day() {
        let chances = ChanceTable::default();
        assert!(chances.raid_night > chances.raid_day);
        assert!(chances.escape_mountain > chances.escape);
    }

    #[test]
    fn test_rejects_zero_period() {
        let config = SimulationConfig {
            day_night_period: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let mut chances = ChanceTable::never();
        chances.kick = 1.5;
        let config = SimulationConfig::default().with_chances(chances);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            seed = 9
            [chances]
            dodge = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.day_night_period, 5);
        assert_eq!(config.chances.dodge, 0.0);
        assert_eq!(config.chances.kick, 0.2);
    }
}
