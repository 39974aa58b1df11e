//! Countdown renderer state.
//!
//! The displayed value is the time elapsed *since* the target instant. While
//! the target is still in the future every field stays at zero.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Tick period of [`CountdownTimer`]
pub const TICK: Duration = Duration::from_secs(1);

/// A duration split into display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TimeParts {
    /// Whole days
    pub days: i64,
    /// Hours within the day
    pub hours: i64,
    /// Minutes within the hour
    pub minutes: i64,
    /// Seconds within the minute, truncated
    pub seconds: i64,
}

impl TimeParts {
    /// Splits a millisecond difference into days, hours, minutes and seconds.
    #[must_use]
    pub const fn from_millis(difference: i64) -> Self {
        Self {
            days: difference / MS_PER_DAY,
            hours: (difference % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (difference % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (difference % MS_PER_MINUTE) / MS_PER_SECOND,
        }
    }

    /// Time elapsed since `target`, or `None` if `now` has not passed it.
    #[must_use]
    pub fn elapsed_since(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let difference = (now - target).num_milliseconds();
        (difference > 0).then(|| Self::from_millis(difference))
    }

    /// Values paired with their on-screen labels.
    #[must_use]
    pub const fn labelled(&self) -> [(i64, &'static str); 4] {
        [
            (self.days, "দিন"),
            (self.hours, "ঘন্টা"),
            (self.minutes, "মিনিট"),
            (self.seconds, "সেকেন্ড"),
        ]
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Background ticker publishing a fresh [`TimeParts`] every second
///
/// The first tick fires immediately. Dropping the timer stops the task.
pub struct CountdownTimer {
    parts: watch::Receiver<TimeParts>,
    task: JoinHandle<()>,
}

impl CountdownTimer {
    /// Starts ticking against the system clock. Must be called inside a tokio runtime.
    #[must_use]
    pub fn start(target: DateTime<Utc>) -> Self {
        Self::start_with_clock(target, Utc::now)
    }

    /// Starts ticking against a caller-supplied clock.
    #[must_use]
    pub fn start_with_clock<C>(target: DateTime<Utc>, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let (tx, parts) = watch::channel(TimeParts::default());

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            loop {
                interval.tick().await;
                // Unreached targets keep the previous value
                if let Some(next) = TimeParts::elapsed_since(target, clock()) {
                    tx.send_modify(|parts| *parts = next);
                }
            }
        });

        Self { parts, task }
    }

    /// Latest published value.
    #[must_use]
    pub fn current(&self) -> TimeParts {
        *self.parts.borrow()
    }

    /// A receiver notified on every published value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimeParts> {
        self.parts.clone()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;
    use tokio::time::Instant;

    fn target() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 18, 0, 0, 0).unwrap()
    }

    /// Wall clock pinned to `base` that advances with tokio's (paused) clock
    fn paused_clock(base: DateTime<Utc>) -> impl Fn() -> DateTime<Utc> + Send + 'static {
        let start = Instant::now();
        move || base + chrono::Duration::from_std(start.elapsed()).unwrap()
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(
            TimeParts::from_millis(90_061_001),
            TimeParts {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
        assert_eq!(TimeParts::from_millis(999), TimeParts::default());
        assert_eq!(
            TimeParts::from_millis(MS_PER_DAY - 1),
            TimeParts {
                days: 0,
                hours: 23,
                minutes: 59,
                seconds: 59
            }
        );
    }

    #[test]
    fn test_elapsed_since_direction() {
        let target = target();
        assert_eq!(TimeParts::elapsed_since(target, target), None);
        assert_eq!(
            TimeParts::elapsed_since(target, target - chrono::Duration::seconds(5)),
            None
        );
        assert_eq!(
            TimeParts::elapsed_since(target, target + chrono::Duration::milliseconds(90_061_001)),
            Some(TimeParts::from_millis(90_061_001))
        );
    }

    #[test]
    fn test_display_and_labels() {
        let parts = TimeParts::from_millis(90_061_001);
        assert_eq!(parts.to_string(), "1d 1h 1m 1s");
        assert_eq!(parts.labelled()[0], (1, "দিন"));
        assert_eq!(parts.labelled()[3], (1, "সেকেন্ড"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_every_second() {
        let base = target() + chrono::Duration::milliseconds(90_061_001);
        let timer = CountdownTimer::start_with_clock(target(), paused_clock(base));
        let mut rx = timer.subscribe();

        // First tick is immediate
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), TimeParts::from_millis(90_061_001));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().seconds, 2);
        assert_eq!(timer.current().seconds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreached_target_stays_zero() {
        let base = target() - chrono::Duration::hours(1);
        let timer = CountdownTimer::start_with_clock(target(), paused_clock(base));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(timer.current(), TimeParts::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticking() {
        let timer = CountdownTimer::start_with_clock(target(), paused_clock(Utc::now()));
        let mut rx = timer.subscribe();
        drop(timer);

        // Sender goes away with the aborted task
        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }
}
