use std::time::Duration;

/// Delay used for the first rate-limit pause when the server sends no hint.
pub const MIN_BACKOFF: Duration = Duration::from_secs(10);

/// Unbounded exponential backoff for rate-limited requests.
///
/// Each call to [`Backoff::next_delay`] returns how long to sleep before the
/// next attempt. A server-supplied delay replaces the current value for that
/// one pause; doubling then continues from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    current: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            current: MIN_BACKOFF,
        }
    }

    pub fn next_delay(&mut self, server_hint: Option<Duration>) -> Duration {
        let delay = server_hint.unwrap_or(self.current);
        // a zero Retry-After would otherwise pin the loop at zero
        self.current = if delay.is_zero() {
            MIN_BACKOFF
        } else {
            delay.saturating_mul(2)
        };
        delay
    }
}
