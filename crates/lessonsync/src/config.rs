use std::{env, time::Duration};

/// Settings read from the environment that have no command line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seconds to wait for further stream emissions (default: 3)
    pub stream_wait_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STREAM_WAIT_SECONDS` - Stream quiet period in seconds (default: 3)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            stream_wait_seconds: lookup("STREAM_WAIT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        }
    }

    /// Get the stream quiet period as a Duration.
    pub fn stream_wait(&self) -> Duration {
        Duration::from_secs(self.stream_wait_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
