//! Time abstraction traits and the per-stage elapsed-time clock.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations must saturate to `ZERO` if `earlier` is actually later,
    /// so a non-monotonic host clock never yields a negative delta.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Elapsed-time tracker owned by a single pipeline stage.
///
/// The instant the clock is created is the baseline for the first sample, so
/// the first tick of a stage sees the interval since construction.
pub struct Clock<'t, I: TimeInstant, T: TimeSource<I>> {
    time_source: &'t T,
    last: I,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Clock<'t, I, T> {
    /// Creates a clock baselined at the current instant.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            last: time_source.now(),
        }
    }

    /// Returns milliseconds elapsed since the previous sample and stores "now".
    pub fn sample(&mut self) -> u64 {
        let now = self.time_source.now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta.as_millis()
    }

    /// Re-baselines the clock without producing a delta.
    pub fn reset(&mut self) {
        self.last = self.time_source.now();
    }
}
