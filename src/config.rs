//! Conversion settings

use std::time::{Duration, Instant};

use serde::Deserialize;

/// Settings shared by every stage of the conversion
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Sent as `User-Agent` and written as the GPX creator
    pub user_agent: String,
    /// Timeout of a single HTTP attempt, in seconds
    pub http_timeout: u64,
    /// Max number of HTTP attempts
    pub max_retries: u32,
    /// Pause between two HTTP attempts, in seconds
    pub retry_interval: u64,
    /// Time budget of the whole conversion, in seconds
    pub deadline: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            user_agent: "tour2gpx".to_string(),
            http_timeout: 10,
            max_retries: 3,
            retry_interval: 2,
            deadline: 30,
        }
    }
}

impl Configuration {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval)
    }

    /// Attempts to run, at least one
    pub fn attempts(&self) -> u32 {
        if self.max_retries < 1 {
            1
        } else {
            self.max_retries
        }
    }

    /// Start the overall deadline now
    pub fn start_deadline(&self) -> Deadline {
        Deadline::after(Duration::from_secs(self.deadline))
    }
}

/// Point in time after which the conversion gives up
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    /// `None` when the budget is too large to be represented
    expires_at: Option<Instant>,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(budget),
        }
    }

    /// Time left, `None` once expired
    pub fn remaining(&self) -> Option<Duration> {
        match self.expires_at {
            Some(at) => at
                .checked_duration_since(Instant::now())
                .filter(|left| !left.is_zero()),
            None => Some(Duration::MAX),
        }
    }

    pub fn expired(&self) -> bool {
        self.remaining().is_none()
    }

    /// Shortens `wanted` so it never goes past the deadline
    pub fn clamp(&self, wanted: Duration) -> Option<Duration> {
        self.remaining().map(|left| left.min(wanted))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Configuration, Deadline};

    #[test]
    fn defaults() {
        let config = Configuration::default();

        assert_eq!("tour2gpx", config.user_agent);
        assert_eq!(Duration::from_secs(10), config.http_timeout());
        assert_eq!(Duration::from_secs(2), config.retry_interval());
        assert_eq!(3, config.attempts());
    }

    #[test]
    fn at_least_one_attempt() {
        let config = Configuration {
            max_retries: 0,
            ..Default::default()
        };

        assert_eq!(1, config.attempts());
    }

    #[test]
    fn partial_yaml() -> Result<(), String> {
        let config: Configuration =
            serde_yaml::from_str("max_retries: 5\nuser_agent: tester").map_err(|e| e.to_string())?;

        assert_eq!(
            Configuration {
                user_agent: "tester".to_string(),
                max_retries: 5,
                ..Default::default()
            },
            config
        );

        Ok(())
    }

    #[test]
    fn deadline_clamp() {
        let deadline = Deadline::after(Duration::from_secs(60));
        let clamped = deadline.clamp(Duration::from_secs(1));
        assert_eq!(Some(Duration::from_secs(1)), clamped);
        assert!(!deadline.expired());

        let gone = Deadline::after(Duration::ZERO);
        assert!(gone.expired());
        assert_eq!(None, gone.clamp(Duration::from_secs(1)));
    }

    #[test]
    fn huge_deadline() -> Result<(), String> {
        let config: Configuration =
            serde_yaml::from_str("deadline: 18446744073709551615").map_err(|e| e.to_string())?;

        let deadline = config.start_deadline();
        assert!(!deadline.expired());
        assert_eq!(
            Some(Duration::from_secs(2)),
            deadline.clamp(Duration::from_secs(2))
        );

        Ok(())
    }
}
