/// Number of data bits in one transmission.
pub const FRAME_BITS: usize = 40;

/// Humidity and temperature decoded from a valid [`Frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Relative humidity, in percent.
    pub humidity: f32,
    /// Temperature, in degrees Celsius.
    pub temperature: f32,
}

impl Reading {
    pub fn get_humidity(&self) -> f32 {
        self.humidity
    }

    pub fn get_temperature(&self) -> f32 {
        self.temperature
    }
}

/// `(temperature, humidity)`.
impl From<Reading> for (f32, f32) {
    fn from(reading: Reading) -> (f32, f32) {
        (reading.temperature, reading.humidity)
    }
}

/// The raw 5-byte payload: humidity integer, humidity fraction, temperature integer,
/// temperature fraction, checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub bytes: [u8; 5],
}

impl Frame {
    pub fn new(bytes: [u8; 5]) -> Frame {
        Frame { bytes }
    }

    /// Builds a frame from the four data bytes, with a matching checksum.
    pub fn from_data(data: [u8; 4]) -> Frame {
        Frame {
            bytes: [data[0], data[1], data[2], data[3], checksum(&data)],
        }
    }

    /// The checksum byte the data bytes call for.
    pub fn expected_checksum(&self) -> u8 {
        checksum(&[self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }

    /// The checksum byte that was transmitted.
    pub fn checksum(&self) -> u8 {
        self.bytes[4]
    }

    pub fn validate(&self) -> bool {
        self.checksum() == self.expected_checksum()
    }

    /// Decodes the frame, or `None` if the checksum does not match.
    pub fn reading(&self) -> Option<Reading> {
        if !self.validate() {
            return None;
        }
        Some(Reading {
            humidity: self.bytes[0] as f32 + self.bytes[1] as f32 / 10.0,
            temperature: self.bytes[2] as f32 + self.bytes[3] as f32 / 10.0,
        })
    }

    /// Sets or clears bit `index` of the 40-bit stream. Bits arrive MSB first.
    pub(crate) fn set_bit(&mut self, index: usize, bit: bool) {
        let mask = 1u8 << (7 - index % 8);
        if bit {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }
}

/// The low 8 bits of the sum of the data bytes.
pub fn checksum(data: &[u8; 4]) -> u8 {
    data.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte))
}

/// Classifies a measured high-pulse width as a 0 or 1 bit.
///
/// Nominal widths are ~26 µs for a 0 and ~70 µs for a 1, but the polling loop's overhead makes
/// measured tick counts run short, so the split point is tuned per board. Widths strictly above
/// the threshold are 1s. Everything else, including the ambiguous 20-30 tick band at the
/// default threshold, is a 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitThreshold(pub u32);

impl BitThreshold {
    pub const DEFAULT: BitThreshold = BitThreshold(30);

    #[inline]
    pub fn classify(&self, high_ticks: u32) -> bool {
        high_ticks > self.0
    }
}

impl Default for BitThreshold {
    fn default() -> BitThreshold {
        BitThreshold::DEFAULT
    }
}
