//! A `no_std` driver for DHT11-class humidity and temperature sensors.
//!
//! The sensor talks over a single data line. The host pulls the line low to wake it, the sensor
//! acknowledges, then sends 40 bits where the width of each high pulse is the bit value. The
//! driver measures those widths by busy-polling the line in ~1µs ticks, with preemption
//! disabled for the duration of the read, and caches the result for the sensor's 2 second
//! recovery interval.
//!
//! ```ignore
//! use simple_dht::dht11::Dht11;
//! use simple_dht::guard::CriticalSection;
//! use simple_dht::line::OpenDrain;
//!
//! let mut sensor = Dht11::new(
//!     OpenDrain::new(pin),
//!     delay,
//!     CriticalSection,
//!     || timer.now(),
//!     |since| timer.now() - since,
//!     None,
//! )?;
//! let (temperature, humidity) = sensor.read().into();
//! ```
#![no_std]

/// Driver for the DHT11: the wire protocol and the reading cache.
pub mod dht11;
pub mod error;
/// The 5-byte frame, its checksum, and bit classification.
pub mod frame;
pub mod guard;
/// The data line abstraction.
pub mod line;
/// The bounded busy-wait every protocol phase is built on.
pub mod pulse;
