//! Converts wall-clock ticks into a number of search steps.

use std::time::{Duration, Instant};

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 1000;

/// Upper bound on steps per tick. A larger backlog is dropped rather than
/// replayed.
pub const MAX_STEPS_PER_TICK: u32 = 64;

/// Schedules steps at a fixed rate in steps per second.
#[derive(Debug, Clone)]
pub struct Pacer {
    speed: u32,
    last: Option<Instant>,
}

impl Pacer {
    /// `speed` is clamped to `MIN_SPEED..=MAX_SPEED`.
    pub fn new(speed: u32) -> Self {
        Self {
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            last: None,
        }
    }

    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Double the speed, up to `MAX_SPEED`.
    pub fn faster(&mut self) {
        self.set_speed(self.speed.saturating_mul(2));
    }

    /// Halve the speed, down to `MIN_SPEED`.
    pub fn slower(&mut self) {
        self.set_speed(self.speed / 2);
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.speed))
    }

    /// Forget the last tick; the next call to [`due`](Self::due) starts
    /// counting afresh.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Number of steps owed at `now`.
    ///
    /// The first call after a reset only records the time and returns 0.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last else {
            self.last = Some(now);
            return 0;
        };
        let interval = self.interval();
        let owed = now.saturating_duration_since(last).as_nanos() / interval.as_nanos();
        if owed == 0 {
            return 0;
        }
        if owed > u128::from(MAX_STEPS_PER_TICK) {
            self.last = Some(now);
            return MAX_STEPS_PER_TICK;
        }
        // `owed` fits in a u32 here; the remainder carries to the next tick.
        let owed = owed as u32;
        self.last = Some(last + interval * owed);
        owed
    }
}

/// Counts ticks and reports how many arrived during the last full second.
#[derive(Debug, Clone, Default)]
pub struct TickRate {
    count: u32,
    since: Option<Instant>,
    rate: u32,
}

impl TickRate {
    pub fn tick(&mut self, now: Instant) {
        let since = *self.since.get_or_insert(now);
        self.count += 1;
        if now.saturating_duration_since(since) >= Duration::from_secs(1) {
            self.rate = self.count;
            self.count = 0;
            self.since = Some(now);
        }
    }

    /// Ticks per second; 0 until a full second has passed.
    #[inline]
    pub fn rate(&self) -> u32 {
        self.rate
    }
}
