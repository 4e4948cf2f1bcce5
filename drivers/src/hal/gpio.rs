//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! Line-level vocabulary shared by port drivers. Code written against
//! [`GpioController`] does not need to know how a driver lays out its
//! direction, output and input registers.

/// Level of a line, as sampled or as driven. Maps to a register bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Bit clear.
    Low,
    /// Bit set.
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

impl core::ops::Not for PinLevel {
    type Output = PinLevel;

    fn not(self) -> PinLevel {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

/// Line direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Line is sampled; the driver does not drive it.
    Input,
    /// Line is driven from the output register.
    Output,
}

/// Biasing of a line configured as input.
///
/// Not every driver can express every mode; drivers report the ones they
/// cannot through their error type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PullMode {
    /// Floating (high impedance).
    None,
    /// Weakly held high.
    Up,
    /// Weakly held low.
    Down,
}

/// Line-addressed control of a group of GPIO lines.
///
/// Every operation is a direct register access: nothing blocks, retries or
/// buffers. Errors are returned to the caller and leave the hardware as it
/// was.
pub trait GpioController {
    /// Line identifier, usually a bit index.
    type Pin: Copy + Clone;

    /// Reason an operation was rejected.
    type Error: core::fmt::Debug;

    /// Configure a line as input or output.
    fn set_direction(&mut self, pin: Self::Pin, direction: Direction) -> Result<(), Self::Error>;

    /// Switch a line to input with the given biasing.
    fn set_pull(&mut self, pin: Self::Pin, pull: PullMode) -> Result<(), Self::Error>;

    /// Drive an output line high.
    fn set_high(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Drive an output line low.
    fn set_low(&mut self, pin: Self::Pin) -> Result<(), Self::Error>;

    /// Sample a line.
    fn read(&self, pin: Self::Pin) -> Result<PinLevel, Self::Error>;

    /// Drive an output line to `level`.
    fn set_level(&mut self, pin: Self::Pin, level: PinLevel) -> Result<(), Self::Error> {
        match level {
            PinLevel::High => self.set_high(pin),
            PinLevel::Low => self.set_low(pin),
        }
    }

    /// Invert a line, using the sampled level as the starting point.
    fn toggle(&mut self, pin: Self::Pin) -> Result<(), Self::Error> {
        let level = self.read(pin)?;
        self.set_level(pin, !level)
    }
}
