//! Low-level primitives shared by the driver crates.

#![no_std]

pub mod register;

pub use register::{Register, Volatile, Word};
