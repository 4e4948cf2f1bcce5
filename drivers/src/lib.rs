//! GPIO Port Driver Subsystem
//!
//! This crate provides a typed abstraction over microcontroller-style I/O
//! ports built from three registers: data direction, output and input.
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions
//! - [`peripheral`]: Reusable peripheral drivers
//!
//! # Usage Example
//!
//! ```
//! use drivers::{GpioController, PinLevel, Port};
//!
//! // Dummy registers; on hardware these would be `Volatile` overlays.
//! let (mut ddr, mut port, pin) = (0u8, 0u8, 0b0001_0000u8);
//! let mut porta = Port::<u8, 5>::new(&mut ddr, &mut port, &pin);
//!
//! porta.set_output_bit(0)?;
//! porta.set_high(0)?;
//! assert_eq!(porta.read(4)?, PinLevel::High);
//! # Ok::<(), drivers::PortError>(())
//! ```

#![no_std]

pub mod hal;
pub mod peripheral;

// Re-export commonly used types
pub use common::register::{Register, Volatile, Word};
pub use hal::gpio::{Direction, GpioController, PinLevel, PullMode};
pub use peripheral::ioport::{Port, Port8, Port16, Port32, Port64, PortError};
