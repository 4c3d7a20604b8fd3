use crate::error::Error;
use crate::line::{Level, Line};
use embedded_hal::delay::DelayNs;

/// Duration of one polling tick, in microseconds.
pub const TICK_US: u32 = 1;

/// Counts how many ticks the line stays at `level`.
///
/// Each tick samples the line once and then waits [`TICK_US`]. Returns the tick count as soon as
/// a sample differs from `level`. If the count exceeds `timeout_ticks` first, returns
/// `on_timeout` instead. This is the only place the driver waits on the sensor, so every phase of
/// a read is bounded.
#[inline]
pub fn wait_for_level_change<TLine, TDelay, TError>(
    line: &mut TLine,
    delay: &mut TDelay,
    level: Level,
    timeout_ticks: u32,
    on_timeout: Error<TError>,
) -> Result<u32, Error<TError>>
where
    TLine: Line<Error = TError>,
    TDelay: DelayNs,
{
    let mut ticks = 0u32;
    while line.get_level()? == level {
        if ticks > timeout_ticks {
            return Err(on_timeout);
        }
        ticks += 1;
        delay.delay_us(TICK_US);
    }
    Ok(ticks)
}
