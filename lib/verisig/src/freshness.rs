//!
//! Temporal freshness of signed requests
//!

use crate::Error;
use std::time::{Duration, SystemTime};

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Bounds on how far a request's `Date` may lie from the verifier's clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FreshnessWindow {
    max_age: Duration,
    max_future_skew: Option<Duration>,
}

impl FreshnessWindow {
    /// Accept requests up to `max_age` old
    ///
    /// Requests dated in the future are accepted unless a skew bound is set via
    /// [`FreshnessWindow::with_max_future_skew`].
    #[must_use]
    pub const fn new(max_age: Duration) -> Self {
        Self {
            max_age,
            max_future_skew: None,
        }
    }

    /// Accept requests up to `hours` hours old
    ///
    /// Windows too large to represent saturate.
    #[must_use]
    pub const fn from_hours(hours: u64) -> Self {
        Self::new(Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR)))
    }

    /// Reject requests dated further than `skew` in the future
    #[must_use]
    pub const fn with_max_future_skew(mut self, skew: Duration) -> Self {
        self.max_future_skew = Some(skew);
        self
    }

    /// Maximum accepted age
    #[must_use]
    pub const fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Check a request dated `date` against the clock reading `now`
    pub fn check(&self, date: SystemTime, now: SystemTime) -> Result<(), Error> {
        match now.duration_since(date) {
            Ok(age) if age > self.max_age => Err(Error::RequestTooOld {
                age,
                max_age: self.max_age,
            }),
            Ok(..) => Ok(()),
            Err(error) => {
                let skew = error.duration();
                match self.max_future_skew {
                    Some(max_skew) if skew > max_skew => {
                        Err(Error::RequestFromFuture { skew, max_skew })
                    }
                    _ => Ok(()),
                }
            }
        }
    }
}

impl Default for FreshnessWindow {
    fn default() -> Self {
        Self::from_hours(12)
    }
}

#[cfg(test)]
mod test {
    use super::FreshnessWindow;
    use crate::Error;
    use std::time::{Duration, SystemTime};

    const HOUR: Duration = Duration::from_secs(60 * 60);

    #[test]
    fn boundary() {
        let window = FreshnessWindow::from_hours(12);
        let now = SystemTime::now();

        assert!(window.check(now, now).is_ok());
        assert!(window.check(now - 11 * HOUR, now).is_ok());
        assert!(window.check(now - 12 * HOUR, now).is_ok());
        assert!(matches!(
            window.check(now - 13 * HOUR, now),
            Err(Error::RequestTooOld { max_age, .. }) if max_age == 12 * HOUR
        ));
    }

    #[test]
    fn huge_window_saturates() {
        let window = FreshnessWindow::from_hours(u64::MAX);
        assert_eq!(window.max_age(), Duration::from_secs(u64::MAX));

        let now = SystemTime::now();
        assert!(window.check(SystemTime::UNIX_EPOCH, now).is_ok());
    }

    #[test]
    fn future_accepted_by_default() {
        let window = FreshnessWindow::from_hours(1);
        let now = SystemTime::now();

        assert!(window.check(now + 48 * HOUR, now).is_ok());
    }

    #[test]
    fn future_skew() {
        let window = FreshnessWindow::from_hours(1).with_max_future_skew(Duration::from_secs(30));
        let now = SystemTime::now();

        assert!(window.check(now + Duration::from_secs(30), now).is_ok());
        assert!(matches!(
            window.check(now + Duration::from_secs(31), now),
            Err(Error::RequestFromFuture { .. })
        ));
    }
}
