// Outbound call-volume limiter

use crate::error::{ApiError, Result};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Per-second and per-month ceilings for outbound API calls.
#[derive(Debug, Clone, Copy)]
pub struct RateLimits {
    pub per_second: u32,
    pub per_month: u64,
}

impl Default for RateLimits {
    fn default() -> Self {
        // Free-plan defaults
        Self {
            per_second: 1,
            per_month: 15_000,
        }
    }
}

#[derive(Debug)]
struct Counters {
    second: u32,
    month: u64,
    last_reset: Instant,
}

/// Counts outbound API calls and rejects those that would exceed the
/// configured ceilings.
///
/// The per-second window resets lazily: any check arriving more than one
/// second after the last recorded reset zeroes the per-second count before
/// the ceiling is evaluated. The per-month count never resets within a
/// running process; restarting the process is the only reset.
#[derive(Debug)]
pub struct RateLimiter {
    limits: RateLimits,
    counters: Mutex<Counters>,
}

impl RateLimiter {
    pub fn new(limits: RateLimits) -> Self {
        Self {
            limits,
            counters: Mutex::new(Counters {
                second: 0,
                month: 0,
                last_reset: Instant::now(),
            }),
        }
    }

    /// Admit one outbound call, or fail with [`ApiError::RateLimitExceeded`].
    ///
    /// Counters are only incremented when the call is admitted.
    pub fn check(&self) -> Result<()> {
        let mut counters = self.counters.lock().expect("rate limiter poisoned");

        if counters.last_reset.elapsed() > Duration::from_secs(1) {
            counters.second = 0;
            counters.last_reset = Instant::now();
        }

        if counters.second >= self.limits.per_second
            || counters.month >= self.limits.per_month
        {
            return Err(ApiError::RateLimitExceeded);
        }

        counters.second += 1;
        counters.month += 1;

        Ok(())
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(limiter: &RateLimiter) -> (u32, u64) {
        let counters = limiter.counters.lock().unwrap();
        (counters.second, counters.month)
    }

    #[test]
    fn admits_up_to_per_second_ceiling() {
        let limiter = RateLimiter::new(RateLimits {
            per_second: 3,
            per_month: 100,
        });

        for _ in 0..3 {
            limiter.check().unwrap();
        }

        assert!(matches!(limiter.check(), Err(ApiError::RateLimitExceeded)));
        // The rejected call must not have incremented anything
        assert_eq!(counts(&limiter), (3, 3));
    }

    #[test]
    fn window_reset_zeroes_per_second_count() {
        let limiter = RateLimiter::new(RateLimits {
            per_second: 1,
            per_month: 100,
        });

        limiter.check().unwrap();
        assert!(limiter.check().is_err());

        // Pretend more than a second has passed since the last reset
        limiter.counters.lock().unwrap().last_reset =
            Instant::now() - Duration::from_millis(1100);

        limiter.check().unwrap();
        assert_eq!(counts(&limiter), (1, 2));
    }

    #[test]
    fn monthly_ceiling_is_not_reset_by_the_window() {
        let limiter = RateLimiter::new(RateLimits {
            per_second: 10,
            per_month: 2,
        });

        limiter.check().unwrap();
        limiter.check().unwrap();

        limiter.counters.lock().unwrap().last_reset =
            Instant::now() - Duration::from_millis(1100);

        assert!(matches!(limiter.check(), Err(ApiError::RateLimitExceeded)));
        assert_eq!(counts(&limiter), (0, 2));
    }

    #[test]
    fn independent_limiters_do_not_share_state() {
        let a = RateLimiter::new(RateLimits {
            per_second: 1,
            per_month: 10,
        });
        let b = RateLimiter::new(RateLimits {
            per_second: 1,
            per_month: 10,
        });

        a.check().unwrap();
        assert!(a.check().is_err());
        b.check().unwrap();
    }
}
