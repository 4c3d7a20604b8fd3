use embedded_hal::delay::DelayNs;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Virtual monotonic clock, in nanoseconds. Only moves when a [`Delay`] waits or a test
/// advances it.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    nanos: Rc<Cell<u64>>,
}

impl Clock {
    pub fn new() -> Clock {
        Clock::default()
    }

    /// Current time in microseconds.
    pub fn now(&self) -> u64 {
        self.nanos.get() / 1_000
    }

    pub fn advance(&self, duration: Duration) {
        self.nanos.set(self.nanos.get() + duration.as_nanos() as u64);
    }

    /// Moves the clock to `micros`. Never moves backwards.
    pub fn set(&self, micros: u64) {
        assert!(micros * 1_000 >= self.nanos.get(), "clock cannot go backwards");
        self.nanos.set(micros * 1_000);
    }

    pub fn elapsed_since(&self, micros: u64) -> Duration {
        Duration::from_micros(self.now() - micros)
    }

    pub fn delay(&self) -> Delay {
        Delay {
            clock: self.clone(),
        }
    }
}

/// A delay that returns immediately after moving the shared clock forward.
#[derive(Debug)]
pub struct Delay {
    clock: Clock,
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(Duration::from_nanos(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(Duration::from_millis(ms as u64));
    }
}
