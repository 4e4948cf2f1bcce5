//! Peripheral Drivers
//!
//! This module contains drivers for reusable peripherals that
//! can be found across different platforms.
//!
//! # Available Peripherals
//!
//! - [`ioport`]: Register-backed parallel I/O port (DDR/PORT/PIN style)

pub mod ioport;
