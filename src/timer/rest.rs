//! Rest duration calculation

use serde::{Deserialize, Serialize};

/// Ratio configuration that turns worked time into earned rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Floor for any rest period, in minutes
    pub min_rest_minutes: u64,
    /// Rest minutes granted for every `work_ratio` minutes worked
    pub rest_ratio: u64,
    /// Work minutes that earn one `rest_ratio` block (must be positive)
    pub work_ratio: u64,
}

impl RestConfig {
    pub const DEFAULT_MIN_REST_MINUTES: u64 = 5;
    pub const DEFAULT_REST_RATIO: u64 = 5;
    pub const DEFAULT_WORK_RATIO: u64 = 25;

    pub fn new(min_rest_minutes: u64, rest_ratio: u64, work_ratio: u64) -> Self {
        Self {
            min_rest_minutes,
            rest_ratio,
            work_ratio,
        }
    }

    /// Rest seconds earned by `work_seconds` of work under this configuration
    pub fn calculate_rest_duration(&self, work_seconds: u64) -> u64 {
        calculate_rest_duration(work_seconds, self)
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MIN_REST_MINUTES,
            Self::DEFAULT_REST_RATIO,
            Self::DEFAULT_WORK_RATIO,
        )
    }
}

/// Compute the rest duration in seconds for a given amount of work.
///
/// Whole work blocks earn `rest_ratio` minutes each and any partial block
/// earns a full extra block. The result never drops below
/// `min_rest_minutes`, so zero work still yields the minimum rest.
/// `config.work_ratio` must be non-zero.
pub fn calculate_rest_duration(work_seconds: u64, config: &RestConfig) -> u64 {
    debug_assert!(config.work_ratio > 0, "work_ratio must be positive");

    let work_minutes = work_seconds / 60;
    let mut rest_minutes = (work_minutes / config.work_ratio) * config.rest_ratio;

    if work_minutes % config.work_ratio > 0 {
        rest_minutes += config.rest_ratio;
    }

    rest_minutes.max(config.min_rest_minutes) * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_work_gets_minimum_rest() {
        assert_eq!(calculate_rest_duration(0, &RestConfig::default()), 300);
    }

    #[test]
    fn short_work_gets_minimum_rest() {
        assert_eq!(calculate_rest_duration(600, &RestConfig::default()), 300);
    }

    #[test]
    fn exact_block_earns_one_rest_block() {
        assert_eq!(calculate_rest_duration(1500, &RestConfig::default()), 300);
    }

    #[test]
    fn two_blocks_earn_two_rest_blocks() {
        assert_eq!(calculate_rest_duration(3000, &RestConfig::default()), 600);
    }

    #[test]
    fn partial_block_rounds_up() {
        assert_eq!(calculate_rest_duration(1800, &RestConfig::default()), 600);
    }

    #[test]
    fn leftover_seconds_below_a_minute_do_not_count() {
        // 25 minutes and 59 seconds is still exactly one block
        assert_eq!(calculate_rest_duration(1559, &RestConfig::default()), 300);
    }

    #[test]
    fn custom_ratios_apply() {
        let config = RestConfig::new(0, 10, 50);
        assert_eq!(config.calculate_rest_duration(0), 0);
        assert_eq!(config.calculate_rest_duration(60), 600);
        assert_eq!(config.calculate_rest_duration(50 * 60), 600);
        assert_eq!(config.calculate_rest_duration(101 * 60), 1800);
    }

    #[test]
    fn floor_wins_over_small_ratio() {
        let config = RestConfig::new(15, 5, 25);
        assert_eq!(config.calculate_rest_duration(3000), 900);
        assert_eq!(config.calculate_rest_duration(4 * 1500), 1200);
    }
}
