use std::time::Duration;

/// Default Showdown websocket endpoint
pub const DEFAULT_SERVER_URL: &str = "wss://sim3.psim.us/showdown/websocket";

/// Tuning for one live session: queue size, keepalive and reconnection
#[derive(Debug, Clone)]
pub struct PumpConfig {
    pub server_url: String,
    /// Frames buffered between the reader and the session loop
    pub queue_capacity: usize,
    pub keepalive_interval: Duration,
    /// Transport failures tolerated over the whole session
    pub max_attempts: usize,
    pub retry_delay: Duration,
    /// Session is cancelled once this elapses
    pub session_deadline: Option<Duration>,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            queue_capacity: 100,
            keepalive_interval: Duration::from_secs(20),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            session_deadline: Some(Duration::from_secs(600)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PumpConfig::default();
        assert_eq!(config.queue_capacity, 100);
        assert_eq!(config.keepalive_interval, Duration::from_secs(20));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert!(config.server_url.starts_with("wss://"));
    }
}
