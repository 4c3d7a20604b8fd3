pub mod clock;
pub mod guard;

use clock::{Clock, Delay};
use digital::Line;
use guard::CountingGuard;
use simple_dht::dht11::{Dht11, Options};
use std::time::Duration;

pub type FakeDht11<TimeFn, ElapsedFn> = Dht11<Line, Delay, CountingGuard, TimeFn, ElapsedFn, u64>;

/// A sensor wired to a fake line, with a shared virtual clock driving both the delay and the
/// sensor's notion of time.
pub fn new_dht11(
    line: Line,
    clock: &Clock,
    guard: CountingGuard,
    options: Option<Options>,
) -> Result<
    FakeDht11<impl Fn() -> u64, impl Fn(u64) -> Duration>,
    simple_dht::error::Error<digital::Error>,
> {
    let now = clock.clone();
    let elapsed = clock.clone();
    Dht11::new(
        line,
        clock.delay(),
        guard,
        move || now.now(),
        move |since: u64| elapsed.elapsed_since(since),
        options,
    )
}
