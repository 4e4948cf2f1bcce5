//! Register-backed parallel I/O port.
//!
//! Classic 8-bit microcontrollers expose each I/O port as three registers:
//!
//! - a data direction register (`DDRx`): bit set means output, clear means input
//! - an output register (`PORTx`): value driven on output lines; on input
//!   lines it selects pull-up (set) or high impedance (clear)
//! - an input register (`PINx`): sampled level of every line
//!
//! [`Port`] wraps borrowed handles to those three registers and exposes
//! whole-port and single-line operations. A port may use fewer lines than
//! the register is wide; every access is masked so that the upper bits,
//! which may belong to an unrelated peripheral, are never modified.
//!
//! # Concurrency
//!
//! Every write is an unsynchronized read-modify-write of the target
//! register. If an interrupt handler or another port shares the same
//! physical register, the caller must serialize access (for example by
//! masking interrupts around the call).
//!
//! # Example
//!
//! ```
//! use drivers::{Port, PortError};
//!
//! let (mut ddr, mut out, pin) = (0u8, 0u8, 0b1_0110u8);
//! let mut port = Port::<u8, 5>::new(&mut ddr, &mut out, &pin);
//!
//! port.set_output_bit(0)?;
//! port.write_bit(0, true)?;
//! assert_eq!(port.write_bit(1, true), Err(PortError::DirectionMismatch { lines: 0b10 }));
//! assert_eq!(port.read_all(), 0b1_0110);
//! # Ok::<(), PortError>(())
//! ```

use crate::hal::gpio::{Direction, GpioController, PinLevel, PullMode};
use common::register::{Register, Word};
use core::fmt;

/// Port over plain 8-bit cells.
pub type Port8<'a, const LINES: u32> = Port<'a, u8, LINES>;
/// Port over plain 16-bit cells.
pub type Port16<'a, const LINES: u32> = Port<'a, u16, LINES>;
/// Port over plain 32-bit cells.
pub type Port32<'a, const LINES: u32> = Port<'a, u32, LINES>;
/// Port over plain 64-bit cells.
pub type Port64<'a, const LINES: u32> = Port<'a, u64, LINES>;

/// I/O port with `LINES` active lines in the low bits of its registers.
///
/// The port only borrows its registers and has no side effects on drop;
/// the register contents outlive it unchanged.
#[derive(Debug)]
pub struct Port<'a, R: Register, const LINES: u32> {
    /// Data direction register (1 = output).
    direction: &'a mut R,
    /// Output register.
    output: &'a mut R,
    /// Input register, read-only.
    input: &'a R,
    /// Active lines, fixed at construction.
    mask: R::Word,
}

impl<'a, R: Register, const LINES: u32> Port<'a, R, LINES> {
    const LINES_FIT: () = assert!(
        LINES >= 1 && LINES <= <R::Word as Word>::BITS,
        "line count must be between 1 and the register width"
    );

    /// Bind a port to its direction, output and input registers.
    ///
    /// No register is read or written. A line count of zero or one wider
    /// than the register word is rejected at compile time:
    ///
    /// ```compile_fail
    /// let (mut ddr, mut out, pin) = (0u8, 0u8, 0u8);
    /// let _port = drivers::Port::<u8, 0>::new(&mut ddr, &mut out, &pin);
    /// ```
    ///
    /// ```compile_fail
    /// let (mut ddr, mut out, pin) = (0u8, 0u8, 0u8);
    /// let _port = drivers::Port::<u8, 9>::new(&mut ddr, &mut out, &pin);
    /// ```
    ///
    /// A port may span the whole register:
    ///
    /// ```
    /// let (mut ddr, mut out, pin) = (0u64, 0u64, u64::MAX);
    /// let port = drivers::Port::<u64, 64>::new(&mut ddr, &mut out, &pin);
    /// assert_eq!(port.mask(), u64::MAX);
    /// assert_eq!(port.read_all(), u64::MAX);
    /// ```
    pub fn new(direction: &'a mut R, output: &'a mut R, input: &'a R) -> Self {
        let () = Self::LINES_FIT;

        Self {
            direction,
            output,
            input,
            mask: <R::Word as Word>::low_mask(LINES),
        }
    }

    /// Number of active lines.
    pub const fn lines(&self) -> u32 {
        LINES
    }

    /// Mask with one bit set per active line.
    pub fn mask(&self) -> R::Word {
        self.mask
    }

    /// Raw contents of the direction register, including foreign bits.
    pub fn direction(&self) -> R::Word {
        self.direction.read()
    }

    /// Raw contents of the output register, including foreign bits.
    pub fn output(&self) -> R::Word {
        self.output.read()
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Sample all lines. Bits above the line count read as zero.
    pub fn read_all(&self) -> R::Word {
        self.input.read() & self.mask
    }

    /// Sample a single line.
    pub fn read_bit(&self, bit: u32) -> Result<bool, PortError> {
        check_bit::<LINES>(bit)?;
        Ok(self.input.read().is_set(bit))
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Drive all lines with `value`.
    ///
    /// Every line must be configured as output, otherwise nothing is
    /// written. Bits of `value` above the line count are ignored and the
    /// corresponding output register bits are preserved.
    pub fn write_all(&mut self, value: R::Word) -> Result<(), PortError> {
        let not_output = !self.direction.read() & self.mask;
        if not_output != R::Word::ZERO {
            return Err(PortError::DirectionMismatch {
                lines: not_output.into(),
            });
        }

        let mask = self.mask;
        self.output.modify(|out| (out & !mask) | (value & mask));
        Ok(())
    }

    /// Drive a single output line.
    pub fn write_bit(&mut self, bit: u32, value: bool) -> Result<(), PortError> {
        check_bit::<LINES>(bit)?;
        if !self.direction.read().is_set(bit) {
            return Err(PortError::DirectionMismatch {
                lines: R::Word::bit(bit).into(),
            });
        }

        assign_bit(self.output, bit, value);
        Ok(())
    }

    // ========================================================================
    // Direction and line mode
    // ========================================================================

    /// Configure every line as output.
    pub fn set_output_all(&mut self) {
        let mask = self.mask;
        self.direction.modify(|ddr| ddr | mask);
    }

    /// Configure a single line as output.
    pub fn set_output_bit(&mut self, bit: u32) -> Result<(), PortError> {
        check_bit::<LINES>(bit)?;
        assign_bit(self.direction, bit, true);
        Ok(())
    }

    /// Configure every line as input. Output register bits are left alone,
    /// so lines that were driven high become pulled up.
    pub fn set_input_all(&mut self) {
        let mask = self.mask;
        self.direction.modify(|ddr| ddr & !mask);
    }

    /// Configure a single line as input.
    pub fn set_input_bit(&mut self, bit: u32) -> Result<(), PortError> {
        check_bit::<LINES>(bit)?;
        assign_bit(self.direction, bit, false);
        Ok(())
    }

    /// Put a line in high-impedance mode: input, output bit cleared.
    pub fn set_high_z(&mut self, bit: u32) -> Result<(), PortError> {
        check_bit::<LINES>(bit)?;
        assign_bit(self.direction, bit, false);
        assign_bit(self.output, bit, false);
        Ok(())
    }

    /// Put a line in pull-up mode: input, output bit set.
    pub fn set_pull_up(&mut self, bit: u32) -> Result<(), PortError> {
        check_bit::<LINES>(bit)?;
        assign_bit(self.direction, bit, false);
        assign_bit(self.output, bit, true);
        Ok(())
    }
}

fn check_bit<const LINES: u32>(bit: u32) -> Result<(), PortError> {
    if bit < LINES {
        Ok(())
    } else {
        Err(PortError::InvalidBitIndex { index: bit, lines: LINES })
    }
}

/// Set or clear one bit of `reg`. `bit` must already be validated.
fn assign_bit<R: Register>(reg: &mut R, bit: u32, value: bool) {
    let bit = R::Word::bit(bit);
    if value {
        reg.modify(|v| v | bit);
    } else {
        reg.modify(|v| v & !bit);
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl<R: Register, const LINES: u32> GpioController for Port<'_, R, LINES> {
    type Pin = u32;
    type Error = PortError;

    fn set_direction(&mut self, pin: u32, direction: Direction) -> Result<(), PortError> {
        match direction {
            Direction::Output => self.set_output_bit(pin),
            Direction::Input => self.set_input_bit(pin),
        }
    }

    fn set_pull(&mut self, pin: u32, pull: PullMode) -> Result<(), PortError> {
        match pull {
            PullMode::None => self.set_high_z(pin),
            PullMode::Up => self.set_pull_up(pin),
            PullMode::Down => {
                check_bit::<LINES>(pin)?;
                Err(PortError::UnsupportedPull)
            }
        }
    }

    fn set_high(&mut self, pin: u32) -> Result<(), PortError> {
        self.write_bit(pin, true)
    }

    fn set_low(&mut self, pin: u32) -> Result<(), PortError> {
        self.write_bit(pin, false)
    }

    fn read(&self, pin: u32) -> Result<PinLevel, PortError> {
        self.read_bit(pin).map(PinLevel::from)
    }

    /// Invert the level the port drives on `pin`.
    ///
    /// The driven level comes from the output register, not the input
    /// register, so external loading on the line does not affect the result.
    fn toggle(&mut self, pin: u32) -> Result<(), PortError> {
        check_bit::<LINES>(pin)?;
        let driven = self.output.read().is_set(pin);
        self.write_bit(pin, !driven)
    }
}

/// I/O port errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Line index at or beyond the port's line count.
    InvalidBitIndex { index: u32, lines: u32 },
    /// Lines that must be configured as output are not.
    DirectionMismatch { lines: u64 },
    /// Pull configuration the port registers cannot express.
    UnsupportedPull,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::InvalidBitIndex { index, lines } => {
                write!(f, "line {index} out of range for a {lines}-line port")
            }
            PortError::DirectionMismatch { lines } => {
                write!(f, "lines {lines:#b} are not configured as output")
            }
            PortError::UnsupportedPull => f.write_str("pull mode not supported by this port"),
        }
    }
}
