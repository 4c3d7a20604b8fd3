use crate::error::Error;
use crate::frame::{BitThreshold, Frame, Reading, FRAME_BITS};
use crate::guard::PreemptionGuard;
use crate::line::{Direction, Level, Line};
use crate::pulse::wait_for_level_change;
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use log::{debug, warn};

/// How long the host holds the line low to wake the sensor.
pub const START_LOW_MS: u32 = 20;
/// How long the host holds the line high before handing it to the sensor.
pub const START_HIGH_US: u32 = 40;
/// Budget for each half of the sensor's acknowledgment, in ticks.
pub const RESPONSE_TICKS: u32 = 80;
/// Budget for the low start marker that precedes every bit, in ticks.
pub const BIT_START_TICKS: u32 = 50;
/// Budget for the high pulse that carries every bit, in ticks.
pub const BIT_DATA_TICKS: u32 = 80;

/// The minimum read interval of a DHT11.
///
/// The sensor cannot sample again before this has passed since the last attempt. Reads inside
/// the interval are served from the cache.
pub const MIN_READ_INTERVAL: Duration = Duration::from_micros(2_000_000);

/// Options to modify the behavior of the driver.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// The minimum time interval between physical reads. Cannot be below [`MIN_READ_INTERVAL`].
    pub min_read_interval: Duration,
    /// Split point between 0 and 1 bits. Tune this if reads from a particular board keep failing
    /// their checksum.
    pub bit_threshold: BitThreshold,
}

pub const DEFAULT_OPTIONS: Options = Options {
    min_read_interval: MIN_READ_INTERVAL,
    bit_threshold: BitThreshold::DEFAULT,
};

/// How current a [`Sample`] is.
#[derive(Debug, PartialEq)]
pub enum Freshness<TError> {
    /// The sensor was read just now.
    Fresh,
    /// The minimum read interval has not passed, so the sensor was left alone.
    Cached,
    /// The sensor was read but the read failed. The reading is the last good one.
    Stale(Error<TError>),
}

/// A reading along with where it came from.
#[derive(Debug, PartialEq)]
pub struct Sample<TError> {
    pub reading: Reading,
    pub freshness: Freshness<TError>,
}

impl<TError> Sample<TError> {
    pub fn is_fresh(&self) -> bool {
        matches!(self.freshness, Freshness::Fresh)
    }
}

/// A DHT11 bound to one data line.
///
/// The provided `time_fn` closure should provide some representation of a given instant that can
/// be used with `elapsed_since_fn` to determine how much time has passed since then. It does not
/// need to reflect real dates and times, only reasonably accurate durations.
#[derive(Debug)]
pub struct Dht11<TLine, TDelay, TGuard, TimeFn, ElapsedFn, TTime>
where
    TimeFn: Fn() -> TTime,
    ElapsedFn: Fn(TTime) -> Duration,
    TTime: Copy,
{
    line: TLine,
    delay: TDelay,
    guard: TGuard,
    time_fn: TimeFn,
    elapsed_since_fn: ElapsedFn,
    options: Options,
    last_reading: Reading,
    last_attempt: Option<TTime>,
}

impl<TLine, TDelay, TGuard, TError, TimeFn, ElapsedFn, TTime>
    Dht11<TLine, TDelay, TGuard, TimeFn, ElapsedFn, TTime>
where
    TLine: Line<Error = TError>,
    TDelay: DelayNs,
    TGuard: PreemptionGuard,
    TError: core::fmt::Debug,
    TimeFn: Fn() -> TTime,
    ElapsedFn: Fn(TTime) -> Duration,
    TTime: Copy,
{
    /// Constructs a sensor that reads from the given line.
    ///
    /// If `options` is `None`, [`DEFAULT_OPTIONS`] is used. Fails with [`Error::InvalidArgument`]
    /// if the minimum read interval is below [`MIN_READ_INTERVAL`] or the bit threshold is zero.
    ///
    /// The line is not touched until the first read, which always goes to the sensor.
    pub fn new(
        line: TLine,
        delay: TDelay,
        guard: TGuard,
        time_fn: TimeFn,
        elapsed_since_fn: ElapsedFn,
        options: Option<Options>,
    ) -> Result<Dht11<TLine, TDelay, TGuard, TimeFn, ElapsedFn, TTime>, Error<TError>> {
        let options = options.unwrap_or(DEFAULT_OPTIONS);
        if options.min_read_interval < MIN_READ_INTERVAL || options.bit_threshold.0 == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(Dht11 {
            line,
            delay,
            guard,
            time_fn,
            elapsed_since_fn,
            options,
            last_reading: Reading::default(),
            last_attempt: None,
        })
    }

    /// Returns the latest valid reading.
    ///
    /// Goes to the sensor only if the minimum read interval has passed since the last attempt.
    /// If that read fails, the previous reading is returned. Before the first successful read
    /// that is the zero reading. See [`read_detailed`](Self::read_detailed) to tell these cases
    /// apart.
    ///
    /// A physical read blocks for about 25ms: the 20ms start pulse plus up to ~5ms of polling.
    pub fn read(&mut self) -> Reading {
        self.read_detailed().reading
    }

    /// Like [`read`](Self::read), but also reports whether the reading is fresh, cached, or stale
    /// and why.
    pub fn read_detailed(&mut self) -> Sample<TError> {
        if let Some(last_attempt) = self.last_attempt {
            if (self.elapsed_since_fn)(last_attempt) < self.options.min_read_interval {
                return Sample {
                    reading: self.last_reading,
                    freshness: Freshness::Cached,
                };
            }
        }

        let now = (self.time_fn)();
        let result = self.read_frame();
        self.last_attempt = Some(now);

        let freshness = match result.and_then(|frame| decode(&frame)) {
            Ok(reading) => {
                debug!(
                    "DHT11 read: RH {}%, T {}C",
                    reading.humidity, reading.temperature
                );
                self.last_reading = reading;
                Freshness::Fresh
            }
            Err(err) => {
                warn!("DHT11 read failed, keeping last reading: {}", err);
                Freshness::Stale(err)
            }
        };
        Sample {
            reading: self.last_reading,
            freshness,
        }
    }

    /// The cached reading. Never touches the line.
    pub fn last_reading(&self) -> Reading {
        self.last_reading
    }

    /// Releases the line, delay and guard.
    pub fn release(self) -> (TLine, TDelay, TGuard) {
        (self.line, self.delay, self.guard)
    }

    /// Runs one physical read with preemption disabled.
    fn read_frame(&mut self) -> Result<Frame, Error<TError>> {
        let line = &mut self.line;
        let delay = &mut self.delay;
        let threshold = self.options.bit_threshold;
        self.guard.with(|| {
            send_start(line, delay)?;
            await_response(line, delay)?;
            sample_frame(line, delay, threshold)
        })
    }
}

fn decode<TError>(frame: &Frame) -> Result<Reading, Error<TError>> {
    frame.reading().ok_or(Error::ChecksumMismatch {
        expected: frame.expected_checksum(),
        actual: frame.checksum(),
    })
}

/// Drives the host's start pulse, then hands the line to the sensor.
pub fn send_start<TLine, TDelay, TError>(
    line: &mut TLine,
    delay: &mut TDelay,
) -> Result<(), Error<TError>>
where
    TLine: Line<Error = TError>,
    TDelay: DelayNs,
{
    line.set_direction(Direction::Output)?;
    line.set_level(Level::Low)?;
    delay.delay_ms(START_LOW_MS);
    line.set_level(Level::High)?;
    delay.delay_us(START_HIGH_US);
    line.set_direction(Direction::Input)?;
    Ok(())
}

/// Waits out the sensor's acknowledgment: ~80µs low, then ~80µs high.
pub fn await_response<TLine, TDelay, TError>(
    line: &mut TLine,
    delay: &mut TDelay,
) -> Result<(), Error<TError>>
where
    TLine: Line<Error = TError>,
    TDelay: DelayNs,
{
    wait_for_level_change(line, delay, Level::Low, RESPONSE_TICKS, Error::ResponseTimeout)?;
    wait_for_level_change(line, delay, Level::High, RESPONSE_TICKS, Error::ResponseTimeout)?;
    Ok(())
}

/// Samples the 40 data bits into a frame. Does not check the checksum.
///
/// Every bit is a low start marker followed by a high pulse whose width is the bit value. Any
/// timeout aborts the frame immediately.
pub fn sample_frame<TLine, TDelay, TError>(
    line: &mut TLine,
    delay: &mut TDelay,
    threshold: BitThreshold,
) -> Result<Frame, Error<TError>>
where
    TLine: Line<Error = TError>,
    TDelay: DelayNs,
{
    let mut frame = Frame::default();
    for i in 0..FRAME_BITS {
        let bit = i as u8;
        wait_for_level_change(
            line,
            delay,
            Level::Low,
            BIT_START_TICKS,
            Error::BitTimeout { bit },
        )?;
        let high_ticks = wait_for_level_change(
            line,
            delay,
            Level::High,
            BIT_DATA_TICKS,
            Error::BitTimeout { bit },
        )?;
        frame.set_bit(i, threshold.classify(high_ticks));
    }
    Ok(frame)
}
