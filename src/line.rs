use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

/// Whether the host drives the line or listens to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Logic level of the data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<Level> for PinState {
    fn from(level: Level) -> PinState {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

impl From<bool> for Level {
    fn from(is_high: bool) -> Level {
        if is_high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// A single bidirectional digital line.
///
/// This is the only view of the hardware the protocol needs. Implement it directly for a pin
/// type that can switch direction, or wrap an open-drain `embedded-hal` pin in [`OpenDrain`].
pub trait Line {
    type Error;

    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error>;
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;
    fn get_level(&mut self) -> Result<Level, Self::Error>;
}

/// Adapts an open-drain pin with a pull-up, that is both an [`InputPin`] and an [`OutputPin`],
/// into a [`Line`].
///
/// Such a pin has no separate input mode. Switching to [`Direction::Input`] releases the line
/// (drives it high) so the pull-up holds it and the sensor is free to pull it low.
#[derive(Debug)]
pub struct OpenDrain<TPin> {
    pin: TPin,
}

impl<TPin> OpenDrain<TPin>
where
    TPin: InputPin + OutputPin,
{
    pub fn new(pin: TPin) -> OpenDrain<TPin> {
        OpenDrain { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> TPin {
        self.pin
    }
}

impl<TPin> Line for OpenDrain<TPin>
where
    TPin: InputPin + OutputPin,
{
    type Error = <TPin as ErrorType>::Error;

    fn set_direction(&mut self, direction: Direction) -> Result<(), Self::Error> {
        match direction {
            Direction::Input => self.pin.set_high(),
            Direction::Output => Ok(()),
        }
    }

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        self.pin.set_state(level.into())
    }

    fn get_level(&mut self) -> Result<Level, Self::Error> {
        Ok(self.pin.is_high()?.into())
    }
}
