//! Wall-clock source for cache timestamps

use chrono::Utc;

/// Source of the current time in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that only moves when told to
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now: AtomicI64,
    }

    impl ManualClock {
        pub fn at(millis: i64) -> Self {
            Self {
                now: AtomicI64::new(millis),
            }
        }

        pub fn set(&self, millis: i64) {
            self.now.store(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.now.load(Ordering::SeqCst)
        }
    }
}
