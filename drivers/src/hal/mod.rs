//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines generic traits for interacting with hardware
//! peripherals. These traits are implemented by peripheral drivers,
//! allowing application code to be written in a platform-independent
//! manner.
//!
//! # Available Interfaces
//!
//! - [`gpio`]: General Purpose Input/Output control

pub mod gpio;
