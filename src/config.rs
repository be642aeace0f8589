use std::env;

/// Engine settings. Every field has a default so the library works without
/// any environment; embedding processes can override via `from_env`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Task-due digest schedule (sec min hour dom month dow).
    pub task_digest_cron: String,
    /// Mood-check digest schedule.
    pub mood_digest_cron: String,
    /// How often the per-record reminder checker scans, in seconds.
    pub check_interval_secs: u64,
    /// How often the scheduler loop polls its cron jobs, in seconds.
    pub scheduler_poll_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            task_digest_cron: "0 0 9 * * *".into(),
            mood_digest_cron: "0 0 20 * * *".into(),
            check_interval_secs: 900,
            scheduler_poll_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Digest times and intervals from the process environment; anything
    /// unset or unparseable falls back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            task_digest_cron: env::var("TASK_DIGEST_CRON")
                .unwrap_or(defaults.task_digest_cron),
            mood_digest_cron: env::var("MOOD_DIGEST_CRON")
                .unwrap_or(defaults.mood_digest_cron),
            check_interval_secs: env::var("CHECK_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.check_interval_secs),
            scheduler_poll_secs: env::var("SCHEDULER_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scheduler_poll_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_digest_schedule() {
        let config = EngineConfig::default();
        assert_eq!(config.task_digest_cron, "0 0 9 * * *");
        assert_eq!(config.mood_digest_cron, "0 0 20 * * *");
        assert_eq!(config.check_interval_secs, 900);
        assert_eq!(config.scheduler_poll_secs, 60);
    }

    #[test]
    fn from_env_falls_back_when_unset() {
        let config = EngineConfig::from_env();
        assert_eq!(config.scheduler_poll_secs, EngineConfig::default().scheduler_poll_secs);
    }
}
