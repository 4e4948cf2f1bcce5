//! Drives a 5-line port backed by dummy 8-bit registers.
//!
//! The registers stand in for an AVR-style DDRA/PORTA/PINA triple whose
//! three upper bits are reserved for other uses.

mod logging;

use drivers::{GpioController, PinLevel, Port8, PortError};
use log::{debug, error, info, warn};
use std::process::ExitCode;

type PortA<'a> = Port8<'a, 5>;

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("logger setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let mut ddra: u8 = 0;
    let mut porta: u8 = 0;
    let pina: u8 = 0b1_0110;

    let result = run(&mut PortA::new(&mut ddra, &mut porta, &pina));

    info!("final DDRA={ddra:#010b} PORTA={porta:#010b} PINA={pina:#010b}");
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("port sequence failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(port: &mut PortA<'_>) -> Result<(), PortError> {
    info!("port A: {} lines, mask {:#010b}", port.lines(), port.mask());

    port.set_output_bit(0)?;
    port.set_output_bit(2)?;
    debug!("DDRA={:#010b}", port.direction());

    port.write_bit(0, true)?;
    info!("line 0 high, PORTA={:#010b}", port.output());
    port.write_bit(2, true)?;
    info!("line 2 high, PORTA={:#010b}", port.output());

    match port.write_bit(1, true) {
        Err(err @ PortError::DirectionMismatch { .. }) => warn!("line 1 rejected: {err}"),
        other => other?,
    }

    info!("PINA sample {:#07b}", port.read_all());
    for line in 0..port.lines() {
        let level = port.read(line)?;
        debug!("line {line}: {level:?}");
    }

    match port.read_bit(6) {
        Err(err @ PortError::InvalidBitIndex { .. }) => warn!("line 6 rejected: {err}"),
        other => {
            other?;
        }
    }

    port.set_pull_up(4)?;
    port.set_high_z(3)?;
    port.set_level(2, PinLevel::Low)?;
    info!(
        "pull-up on 4, hi-z on 3, line 2 low: DDRA={:#010b} PORTA={:#010b}",
        port.direction(),
        port.output()
    );

    Ok(())
}
